/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Mind-map editing core.
//!
//! `EditorSession` owns the document graph, its undo/redo history, the
//! current selection and the clipboard. Hosts render from the read model and
//! feed gestures and toolbar commands back in through the session.

pub mod app;
pub mod model;
pub mod prefs;

pub use app::{EditorIntent, EditorSession};
pub use model::EditorError;
pub use model::clipboard::Clipboard;
pub use model::graph::{
    Edge, EdgeId, EdgeStyle, FontStyle, Graph, GraphSnapshot, Node, NodeId, NodeStyle,
    ResolvedEdgeStyle, ResolvedNodeStyle, StyleProperty, StyleScope,
};
pub use model::history::History;
pub use model::selection::SelectionState;
pub use prefs::{EditorPreferences, PlacementPolicy, PrefsError, StyleDefaults};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
