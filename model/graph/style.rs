/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Style propagation over nodes and edges.

use std::collections::HashSet;

use serde::Deserialize;

use super::{Edge, EdgeStyle, Graph, Node, NodeId, NodeStyle};
use crate::model::EditorError;
use crate::prefs::StyleDefaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Italic => "italic",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim() {
            "normal" => Some(Self::Normal),
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            _ => None,
        }
    }
}

/// Toolbar style attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    FontSize,
    FontStyle,
    FontColor,
    /// Branch color: stroke of the edges leaving a node.
    EdgeColor,
}

impl StyleProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FontSize => "fontSize",
            Self::FontStyle => "fontStyle",
            Self::FontColor => "fontColor",
            Self::EdgeColor => "edgeColor",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim() {
            "fontSize" => Some(Self::FontSize),
            "fontStyle" => Some(Self::FontStyle),
            "fontColor" => Some(Self::FontColor),
            "edgeColor" | "strokeColor" => Some(Self::EdgeColor),
            _ => None,
        }
    }

    pub fn targets_edges(self) -> bool {
        matches!(self, Self::EdgeColor)
    }
}

/// Which nodes a style change applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StyleScope {
    #[default]
    All,
    Nodes(HashSet<NodeId>),
}

impl StyleScope {
    pub fn includes(&self, id: &NodeId) -> bool {
        match self {
            Self::All => true,
            Self::Nodes(ids) => ids.contains(id),
        }
    }
}

/// Parsed style value. An empty string clears the attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StyleValue {
    Text(Option<String>),
    FontStyle(Option<FontStyle>),
}

impl StyleValue {
    fn parse(property: StyleProperty, raw: &str) -> Result<Self, EditorError> {
        let trimmed = raw.trim();
        if property != StyleProperty::FontStyle {
            let text = (!trimmed.is_empty()).then(|| trimmed.to_string());
            return Ok(Self::Text(text));
        }
        if trimmed.is_empty() {
            return Ok(Self::FontStyle(None));
        }
        FontStyle::from_name(trimmed)
            .map(|style| Self::FontStyle(Some(style)))
            .ok_or_else(|| EditorError::InvalidStyleValue {
                property: property.as_str().to_string(),
                value: raw.to_string(),
            })
    }
}

fn apply_to_node(node: &mut Node, property: StyleProperty, value: &StyleValue) -> bool {
    let style = &mut node.style;
    match (property, value) {
        (StyleProperty::FontSize, StyleValue::Text(text)) => replace(&mut style.font_size, text),
        (StyleProperty::FontColor, StyleValue::Text(text)) => replace(&mut style.font_color, text),
        (StyleProperty::FontStyle, StyleValue::FontStyle(font)) => {
            replace(&mut style.font_style, font)
        },
        _ => false,
    }
}

fn apply_to_edge(edge: &mut Edge, value: &StyleValue) -> bool {
    match value {
        StyleValue::Text(text) => replace(&mut edge.style.stroke_color, text),
        StyleValue::FontStyle(_) => false,
    }
}

fn replace<T: Clone + PartialEq>(slot: &mut Option<T>, value: &Option<T>) -> bool {
    if slot == value {
        return false;
    }
    slot.clone_from(value);
    true
}

impl Graph {
    /// Apply one style attribute across `scope`.
    ///
    /// Node attributes go to every node in scope; `EdgeColor` goes to every
    /// edge whose source is in scope. The value is validated before anything
    /// changes. Returns how many elements actually changed.
    pub(crate) fn restyle(
        &mut self,
        property: StyleProperty,
        raw_value: &str,
        scope: &StyleScope,
    ) -> Result<usize, EditorError> {
        let value = StyleValue::parse(property, raw_value)?;
        let mut changed = 0usize;
        if property.targets_edges() {
            for edge in self.edges_mut() {
                if scope.includes(&edge.source) && apply_to_edge(edge, &value) {
                    changed += 1;
                }
            }
        } else {
            for node in self.nodes_mut() {
                if scope.includes(&node.id) && apply_to_node(node, property, &value) {
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }
}

/// Node style with every attribute filled in from the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNodeStyle {
    pub font_size: String,
    pub font_style: FontStyle,
    pub font_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEdgeStyle {
    pub stroke_color: String,
}

impl NodeStyle {
    pub fn resolve(&self, defaults: &StyleDefaults) -> ResolvedNodeStyle {
        ResolvedNodeStyle {
            font_size: self
                .font_size
                .clone()
                .unwrap_or_else(|| defaults.font_size.clone()),
            font_style: self.font_style.unwrap_or(defaults.font_style),
            font_color: self
                .font_color
                .clone()
                .unwrap_or_else(|| defaults.font_color.clone()),
        }
    }
}

impl EdgeStyle {
    pub fn resolve(&self, defaults: &StyleDefaults) -> ResolvedEdgeStyle {
        ResolvedEdgeStyle {
            stroke_color: self
                .stroke_color
                .clone()
                .unwrap_or_else(|| defaults.edge_color.clone()),
        }
    }
}
