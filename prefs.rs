/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor preferences.
//!
//! Every field has a default matching the stock editor, so a preferences
//! file only needs to name the values it overrides:
//!
//! ```toml
//! history_limit = 64
//!
//! [placement]
//! jitter_x = 80.0
//!
//! [style]
//! font_size = "14px"
//! ```

use std::path::Path;

use euclid::default::Point2D;
use rand::Rng;
use serde::Deserialize;

use crate::model::graph::FontStyle;
use crate::model::history::DEFAULT_HISTORY_LIMIT;

/// Offset policy for nodes created next to an existing position.
///
/// Children and pasted copies land `vertical_step` below their anchor with a
/// random horizontal jitter in `[-jitter_x, jitter_x)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementPolicy {
    pub jitter_x: f32,
    pub vertical_step: f32,
}

impl PlacementPolicy {
    pub fn place<R: Rng + ?Sized>(&self, anchor: Point2D<f32>, rng: &mut R) -> Point2D<f32> {
        let dx = if self.jitter_x > 0.0 && (2.0 * self.jitter_x).is_finite() {
            rng.gen_range(-self.jitter_x..self.jitter_x)
        } else {
            0.0
        };
        Point2D::new(anchor.x + dx, anchor.y + self.vertical_step)
    }

    /// The jitter band `[-jitter_x, jitter_x)` must have a finite width.
    fn validate(&self) -> Result<(), PrefsError> {
        if !self.jitter_x.is_finite() || !(2.0 * self.jitter_x).is_finite() {
            return Err(PrefsError::Invalid(format!(
                "placement.jitter_x = {} is out of range",
                self.jitter_x
            )));
        }
        if !self.vertical_step.is_finite() {
            return Err(PrefsError::Invalid(format!(
                "placement.vertical_step = {} is not finite",
                self.vertical_step
            )));
        }
        Ok(())
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            jitter_x: 50.0,
            vertical_step: 100.0,
        }
    }
}

/// Fallback style values the host renders when an element leaves an
/// attribute unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    pub font_size: String,
    pub font_style: FontStyle,
    pub font_color: String,
    pub edge_color: String,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_size: "12px".to_string(),
            font_style: FontStyle::Normal,
            font_color: "#000".to_string(),
            edge_color: "#000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Id of the root node, which is also the toolbar's default anchor.
    pub root_id: String,
    pub root_label: String,
    pub root_position: [f32; 2],
    pub new_node_label: String,
    /// Maximum undo depth; 0 keeps every step.
    pub history_limit: usize,
    pub placement: PlacementPolicy,
    pub style: StyleDefaults,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            root_id: "1".to_string(),
            root_label: "Central Idea".to_string(),
            root_position: [250.0, 250.0],
            new_node_label: "New Idea".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            placement: PlacementPolicy::default(),
            style: StyleDefaults::default(),
        }
    }
}

impl EditorPreferences {
    /// Parse, then reject geometry placement cannot sample from.
    pub fn from_toml_str(raw: &str) -> Result<Self, PrefsError> {
        let prefs: Self = toml::from_str(raw).map_err(|e| PrefsError::Parse(e.to_string()))?;
        prefs.validate()?;
        Ok(prefs)
    }

    pub fn validate(&self) -> Result<(), PrefsError> {
        if self.root_position.iter().any(|c| !c.is_finite()) {
            return Err(PrefsError::Invalid(format!(
                "root_position = {:?} is not finite",
                self.root_position
            )));
        }
        self.placement.validate()
    }

    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PrefsError::Io(e.to_string()))?;
        Self::from_toml_str(&raw)
    }

    pub fn root_point(&self) -> Point2D<f32> {
        Point2D::new(self.root_position[0], self.root_position[1])
    }
}

/// Errors from loading preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsError {
    Io(String),
    Parse(String),
    /// Well-formed TOML carrying a value the editor cannot use.
    Invalid(String),
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {e}"),
            PrefsError::Parse(e) => write!(f, "Parse error: {e}"),
            PrefsError::Invalid(e) => write!(f, "Invalid preference: {e}"),
        }
    }
}

impl std::error::Error for PrefsError {}
