/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Document model: graph store, history, selection and clipboard.

pub mod clipboard;
pub mod graph;
pub mod history;
pub mod selection;

use graph::NodeId;

/// Errors surfaced to the host by editing commands.
///
/// Empty operations (nothing selected, nothing to undo, empty clipboard) are
/// not errors; commands report them as a `false`/`None` outcome instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A referenced node id is not in the graph.
    NodeNotFound(NodeId),
    /// A node or edge id is already taken.
    DuplicateId(String),
    /// Style property name the editor does not know.
    UnknownStyleProperty(String),
    /// Value rejected for a known style property.
    InvalidStyleValue { property: String, value: String },
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::NodeNotFound(id) => write!(f, "node '{id}' not found"),
            EditorError::DuplicateId(id) => write!(f, "id '{id}' is already in use"),
            EditorError::UnknownStyleProperty(name) => {
                write!(f, "unknown style property '{name}'")
            },
            EditorError::InvalidStyleValue { property, value } => {
                write!(f, "invalid value '{value}' for style property '{property}'")
            },
        }
    }
}

impl std::error::Error for EditorError {}
