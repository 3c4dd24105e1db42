/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editing session state for the mind-map editor.
//!
//! Every committing command computes the next graph on a working copy and
//! only swaps it in, and records it in history, once it fully succeeded.

use euclid::default::Point2D;
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::EditorError;
use crate::model::clipboard::Clipboard;
use crate::model::graph::{
    Edge, EdgeId, EdgeStyle, Graph, GraphSnapshot, Node, NodeId, NodeStyle, ResolvedEdgeStyle,
    ResolvedNodeStyle, StyleProperty, StyleScope,
};
use crate::model::history::History;
use crate::model::selection::SelectionState;
use crate::prefs::{EditorPreferences, StyleDefaults};

/// Host-facing command and gesture boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    /// Toolbar "+" (no parent) or a node's own "+" affordance.
    AddNode {
        parent: Option<NodeId>,
    },
    DeleteSelection,
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    SetStyle {
        property: String,
        value: String,
    },
    Connect {
        source: NodeId,
        target: NodeId,
    },
    Relabel {
        node: NodeId,
        label: String,
    },
    /// `None` means the host sent a notification without a payload.
    SelectionChanged {
        nodes: Option<Vec<NodeId>>,
    },
    NodeMoved {
        node: NodeId,
        position: Point2D<f32>,
    },
}

/// One open document: graph, history, selection and clipboard.
#[derive(Debug, Clone)]
pub struct EditorSession {
    graph: Graph,
    history: History,
    selection: SelectionState,
    clipboard: Option<Clipboard>,
    prefs: EditorPreferences,
    /// Parent for toolbar adds: the first node created.
    anchor: NodeId,
    rng: StdRng,
}

impl EditorSession {
    pub fn new(prefs: EditorPreferences) -> Self {
        Self::with_rng(prefs, StdRng::from_entropy())
    }

    /// Session whose placement jitter and generated ids are reproducible.
    pub fn with_seed(prefs: EditorPreferences, seed: u64) -> Self {
        Self::with_rng(prefs, StdRng::seed_from_u64(seed))
    }

    fn with_rng(prefs: EditorPreferences, rng: StdRng) -> Self {
        let anchor = NodeId::new(prefs.root_id.clone());
        let initial = GraphSnapshot {
            nodes: vec![Node {
                id: anchor.clone(),
                position: prefs.root_point(),
                label: prefs.root_label.clone(),
                style: NodeStyle::default(),
            }],
            edges: Vec::new(),
        };
        let graph = Graph::from_snapshot(&initial);
        let history = History::new(initial, prefs.history_limit);
        Self {
            graph,
            history,
            selection: SelectionState::new(),
            clipboard: None,
            prefs,
            anchor,
            rng,
        }
    }

    /// Apply a batch of intents deterministically in insertion order.
    /// Returns the errors surfaced along the way; each is also logged.
    pub fn apply_intents<I>(&mut self, intents: I) -> Vec<EditorError>
    where
        I: IntoIterator<Item = EditorIntent>,
    {
        let mut errors = Vec::new();
        for intent in intents {
            if let Err(e) = self.apply_intent(intent) {
                warn!("Editor command failed: {e}");
                errors.push(e);
            }
        }
        errors
    }

    pub fn apply_intent(&mut self, intent: EditorIntent) -> Result<(), EditorError> {
        match intent {
            EditorIntent::AddNode { parent } => {
                self.add(parent.as_ref())?;
            },
            EditorIntent::DeleteSelection => {
                self.delete();
            },
            EditorIntent::Undo => {
                self.undo();
            },
            EditorIntent::Redo => {
                self.redo();
            },
            EditorIntent::Copy => {
                self.copy();
            },
            EditorIntent::Cut => {
                self.cut();
            },
            EditorIntent::Paste => {
                self.paste()?;
            },
            EditorIntent::SetStyle { property, value } => {
                self.set_style(&property, &value)?;
            },
            EditorIntent::Connect { source, target } => {
                self.connect(&source, &target)?;
            },
            EditorIntent::Relabel { node, label } => {
                self.relabel(&node, &label);
            },
            EditorIntent::SelectionChanged { nodes } => self.on_selection_changed(nodes),
            EditorIntent::NodeMoved { node, position } => {
                self.on_node_moved(&node, position);
            },
        }
        Ok(())
    }

    /// Add a child node. `None` attaches it to the default anchor.
    pub fn add(&mut self, parent: Option<&NodeId>) -> Result<NodeId, EditorError> {
        let parent = parent.unwrap_or(&self.anchor).clone();
        let branch_style = EdgeStyle::stroked(self.prefs.style.edge_color.clone());
        let mut next = self.graph.clone();
        let child = next.add_child(
            &parent,
            self.prefs.new_node_label.clone(),
            &self.prefs.placement,
            branch_style,
            &mut self.rng,
        )?;
        self.commit(next, "add");
        Ok(child)
    }

    /// Delete the selected nodes and their edges, then clear the selection.
    /// Returns false without touching history when nothing is selected.
    pub fn delete(&mut self) -> bool {
        if self.selection.is_empty() {
            trace!("Delete ignored: empty selection");
            return false;
        }
        let mut next = self.graph.clone();
        next.remove_nodes(&self.selection);
        self.selection.clear();
        self.commit(next, "delete");
        true
    }

    /// Copy the selection's induced subgraph into the clipboard.
    pub fn copy(&mut self) -> bool {
        if self.selection.is_empty() {
            trace!("Copy ignored: empty selection");
            return false;
        }
        let clipboard = Clipboard::capture(&self.graph, &self.selection);
        debug!(
            "Copied {} nodes and {} edges",
            clipboard.nodes().len(),
            clipboard.edges().len()
        );
        self.clipboard = Some(clipboard);
        true
    }

    /// Copy, then delete. Copy never commits, so a cut is one undo step.
    pub fn cut(&mut self) -> bool {
        if !self.copy() {
            return false;
        }
        self.delete()
    }

    /// Paste a fresh copy of the clipboard. Returns the new node ids in
    /// clipboard order, or `Ok(None)` when there was nothing to paste.
    /// A rejected paste leaves the graph and history untouched.
    pub fn paste(&mut self) -> Result<Option<Vec<NodeId>>, EditorError> {
        let Some(clipboard) = self.clipboard.as_ref().filter(|c| !c.is_empty()) else {
            trace!("Paste ignored: clipboard empty");
            return Ok(None);
        };
        let pasted = clipboard.instantiate(&self.graph, &self.prefs.placement, &mut self.rng);
        let ids: Vec<NodeId> = pasted.nodes.iter().map(|node| node.id.clone()).collect();

        let mut next = self.graph.clone();
        next.merge(pasted.nodes, pasted.edges)?;
        self.commit(next, "paste");
        Ok(Some(ids))
    }

    /// Connect two existing nodes (drag-to-connect gesture).
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<EdgeId, EditorError> {
        let mut next = self.graph.clone();
        let edge = next.connect(source, target, EdgeStyle::default(), &mut self.rng)?;
        self.commit(next, "connect");
        Ok(edge)
    }

    /// Apply a toolbar style change to every node (or, for `edgeColor`,
    /// every edge). Returns whether anything changed and was committed.
    pub fn set_style(&mut self, property: &str, value: &str) -> Result<bool, EditorError> {
        self.restyle(property, value, StyleScope::All)
    }

    /// Like `set_style`, limited to the selected nodes and their outgoing
    /// edges.
    pub fn set_style_for_selection(
        &mut self,
        property: &str,
        value: &str,
    ) -> Result<bool, EditorError> {
        if self.selection.is_empty() {
            trace!("Scoped style ignored: empty selection");
            return Ok(false);
        }
        let scope = StyleScope::Nodes(self.selection.to_set());
        self.restyle(property, value, scope)
    }

    fn restyle(
        &mut self,
        property: &str,
        value: &str,
        scope: StyleScope,
    ) -> Result<bool, EditorError> {
        let property = StyleProperty::from_name(property)
            .ok_or_else(|| EditorError::UnknownStyleProperty(property.to_string()))?;
        let mut next = self.graph.clone();
        if next.restyle(property, value, &scope)? == 0 {
            trace!("Style {} unchanged", property.as_str());
            return Ok(false);
        }
        self.commit(next, property.as_str());
        Ok(true)
    }

    /// Rename a node. Missing nodes and unchanged labels are ignored.
    pub fn relabel(&mut self, node: &NodeId, label: &str) -> bool {
        if !self.graph.relabel(node, label) {
            trace!("Relabel ignored for '{node}'");
            return false;
        }
        self.commit_current("relabel");
        true
    }

    /// Replace the selection from a host notification. A notification
    /// without payload is ignored; an empty list clears the selection.
    pub fn on_selection_changed(&mut self, nodes: Option<Vec<NodeId>>) {
        let Some(nodes) = nodes else {
            trace!("Selection notification without payload ignored");
            return;
        };
        let graph = &self.graph;
        self.selection
            .replace(nodes.into_iter().filter(|id| graph.contains_node(id)));
    }

    /// Record a drag. Moves amend the current history entry instead of
    /// adding an undo step.
    pub fn on_node_moved(&mut self, node: &NodeId, position: Point2D<f32>) -> bool {
        if !self.graph.set_position(node, position) {
            return false;
        }
        self.history.amend_present(self.graph.snapshot());
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            trace!("Nothing to undo");
            return false;
        };
        self.graph = Graph::from_snapshot(snapshot);
        self.retain_live_selection();
        debug!("Undo: {} steps left", self.history.past_len());
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            trace!("Nothing to redo");
            return false;
        };
        self.graph = Graph::from_snapshot(snapshot);
        self.retain_live_selection();
        debug!("Redo: {} steps left", self.history.future_len());
        true
    }

    fn commit(&mut self, next: Graph, command: &str) {
        self.graph = next;
        self.commit_current(command);
    }

    fn commit_current(&mut self, command: &str) {
        self.history.commit(self.graph.snapshot());
        self.retain_live_selection();
        debug!(
            "Committed {command}: {} nodes, {} edges, undo depth {}",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.history.past_len()
        );
    }

    fn retain_live_selection(&mut self) {
        let graph = &self.graph;
        self.selection.retain(|id| graph.contains_node(id));
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.graph.edges()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn style_defaults(&self) -> &StyleDefaults {
        &self.prefs.style
    }

    pub fn resolved_node_style(&self, id: &NodeId) -> Option<ResolvedNodeStyle> {
        Some(self.graph.node(id)?.style.resolve(&self.prefs.style))
    }

    pub fn resolved_edge_style(&self, id: &EdgeId) -> Option<ResolvedEdgeStyle> {
        Some(self.graph.edge(id)?.style.resolve(&self.prefs.style))
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn anchor(&self) -> &NodeId {
        &self.anchor
    }

    pub fn prefs(&self) -> &EditorPreferences {
        &self.prefs
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorPreferences::default())
    }
}
