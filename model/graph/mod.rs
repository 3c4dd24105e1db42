/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the mind-map document.
//!
//! Core structures:
//! - `Graph`: Main graph container backed by petgraph::StableGraph
//! - `Node`: Labeled, positioned, styleable vertex
//! - `Edge`: Directed, styleable connection between two nodes
//! - `GraphSnapshot`: Immutable node/edge capture used by history
//!
//! Boundary: topology mutators are `pub(crate)`. Hosts mutate through
//! `EditorSession` so every change lands in history.

use std::collections::{HashMap, HashSet};
use std::fmt;

use euclid::default::Point2D;
use log::warn;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use rand::Rng;
use uuid::Uuid;

use crate::model::EditorError;
use crate::prefs::PlacementPolicy;

pub mod style;

pub use style::{
    FontStyle, ResolvedEdgeStyle, ResolvedNodeStyle, StyleProperty, StyleScope,
};

/// Stable node handle (petgraph NodeIndex, survives other deletions)
pub type NodeKey = NodeIndex;

/// Stable edge handle (petgraph EdgeIndex)
pub type EdgeKey = EdgeIndex;

/// Host-visible node identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_uuid(rng).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Host-visible edge identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_uuid(rng).to_string())
    }

    /// Id of the branch edge created together with a child node.
    pub fn branch(parent: &NodeId, child: &NodeId) -> Self {
        Self(format!("{parent}-{child}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Version-4 UUID built from `rng` so seeded sessions are reproducible.
pub(crate) fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

/// Per-node text style. Unset attributes fall back to `StyleDefaults`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStyle {
    pub font_size: Option<String>,
    pub font_style: Option<FontStyle>,
    pub font_color: Option<String>,
}

/// Per-edge stroke style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeStyle {
    pub stroke_color: Option<String>,
}

impl EdgeStyle {
    pub fn stroked(color: impl Into<String>) -> Self {
        Self {
            stroke_color: Some(color.into()),
        }
    }
}

/// A mind-map node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable node identity.
    pub id: NodeId,

    /// Position in graph space
    pub position: Point2D<f32>,

    /// Displayed text
    pub label: String,

    pub style: NodeStyle,
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub style: EdgeStyle,
}

/// Immutable capture of a whole document.
///
/// Nodes and edges are kept in graph iteration order, so restoring a
/// snapshot and taking a new one yields an equal value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Main graph structure backed by petgraph::StableGraph
#[derive(Debug, Clone)]
pub struct Graph {
    /// The underlying petgraph stable graph
    inner: StableGraph<Node, Edge, Directed>,

    id_to_node: HashMap<NodeId, NodeKey>,

    id_to_edge: HashMap<EdgeId, EdgeKey>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            id_to_edge: HashMap::new(),
        }
    }

    /// Insert a fully formed node. Fails if the id is taken.
    pub(crate) fn insert_node(&mut self, node: Node) -> Result<NodeKey, EditorError> {
        if self.id_to_node.contains_key(&node.id) {
            return Err(EditorError::DuplicateId(node.id.to_string()));
        }
        let id = node.id.clone();
        let key = self.inner.add_node(node);
        self.id_to_node.insert(id, key);
        Ok(key)
    }

    /// Insert a fully formed edge. Both endpoints must exist.
    pub(crate) fn insert_edge(&mut self, edge: Edge) -> Result<EdgeKey, EditorError> {
        if self.id_to_edge.contains_key(&edge.id) {
            return Err(EditorError::DuplicateId(edge.id.to_string()));
        }
        let from = self.key_of(&edge.source)?;
        let to = self.key_of(&edge.target)?;
        let id = edge.id.clone();
        let key = self.inner.add_edge(from, to, edge);
        self.id_to_edge.insert(id, key);
        Ok(key)
    }

    /// Append nodes, then edges. Stops at the first rejected element; callers
    /// run this on a working copy so a failure leaves the live graph alone.
    pub(crate) fn merge(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), EditorError> {
        for node in nodes {
            self.insert_node(node)?;
        }
        for edge in edges {
            self.insert_edge(edge)?;
        }
        Ok(())
    }

    /// Create a child below `parent` and the branch edge leading to it.
    pub(crate) fn add_child<R: Rng + ?Sized>(
        &mut self,
        parent: &NodeId,
        label: impl Into<String>,
        placement: &PlacementPolicy,
        branch_style: EdgeStyle,
        rng: &mut R,
    ) -> Result<NodeId, EditorError> {
        let anchor = self
            .node(parent)
            .ok_or_else(|| EditorError::NodeNotFound(parent.clone()))?
            .position;

        let mut id = NodeId::random(rng);
        while self.contains_node(&id) {
            id = NodeId::random(rng);
        }
        let position = placement.place(anchor, rng);
        self.insert_node(Node {
            id: id.clone(),
            position,
            label: label.into(),
            style: NodeStyle::default(),
        })?;

        let edge = Edge {
            id: EdgeId::branch(parent, &id),
            source: parent.clone(),
            target: id.clone(),
            style: branch_style,
        };
        if let Err(e) = self.insert_edge(edge) {
            let _ = self.remove_nodes(&HashSet::from([id]));
            return Err(e);
        }
        Ok(id)
    }

    /// Connect two existing nodes. Self-loops and parallel edges are allowed.
    pub(crate) fn connect<R: Rng + ?Sized>(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        style: EdgeStyle,
        rng: &mut R,
    ) -> Result<EdgeId, EditorError> {
        let mut id = EdgeId::random(rng);
        while self.id_to_edge.contains_key(&id) {
            id = EdgeId::random(rng);
        }
        self.insert_edge(Edge {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
            style,
        })?;
        Ok(id)
    }

    /// Remove the listed nodes and every edge touching them.
    /// Unknown ids are skipped. Returns how many nodes were removed.
    pub(crate) fn remove_nodes(&mut self, ids: &HashSet<NodeId>) -> usize {
        let mut removed = 0usize;
        for id in ids {
            let Some(key) = self.id_to_node.get(id).copied() else {
                continue;
            };
            let incident: Vec<EdgeId> = self
                .inner
                .edges_directed(key, Direction::Outgoing)
                .chain(self.inner.edges_directed(key, Direction::Incoming))
                .map(|edge| edge.weight().id.clone())
                .collect();
            for edge_id in incident {
                self.id_to_edge.remove(&edge_id);
            }
            if self.inner.remove_node(key).is_some() {
                self.id_to_node.remove(id);
                removed += 1;
            }
        }
        removed
    }

    /// Replace a node's label. Returns false when the node is missing or the
    /// label is unchanged.
    pub(crate) fn relabel(&mut self, id: &NodeId, label: &str) -> bool {
        match self.node_mut(id) {
            Some(node) if node.label != label => {
                node.label = label.to_string();
                true
            },
            _ => false,
        }
    }

    pub(crate) fn set_position(&mut self, id: &NodeId, position: Point2D<f32>) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            },
            None => false,
        }
    }

    fn key_of(&self, id: &NodeId) -> Result<NodeKey, EditorError> {
        self.id_to_node
            .get(id)
            .copied()
            .ok_or_else(|| EditorError::NodeNotFound(id.clone()))
    }

    /// Get a node by id
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        let key = *self.id_to_node.get(id)?;
        self.inner.node_weight(key)
    }

    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        let key = *self.id_to_node.get(id)?;
        self.inner.node_weight_mut(key)
    }

    /// Get an edge by id
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        let key = *self.id_to_edge.get(id)?;
        self.inner.edge_weight(key)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.id_to_node.contains_key(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.id_to_edge.contains_key(id)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.inner
            .node_indices()
            .map(move |idx| &self.inner[idx])
    }

    /// Iterate over all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> + '_ {
        self.inner.edge_weights_mut()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> + '_ {
        self.inner.node_weights_mut()
    }

    /// Ids of nodes reachable by one outgoing edge
    pub fn out_neighbors(&self, id: &NodeId) -> Vec<&NodeId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Ids of nodes with an edge pointing at `id`
    pub fn in_neighbors(&self, id: &NodeId) -> Vec<&NodeId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &NodeId, direction: Direction) -> Vec<&NodeId> {
        let Some(key) = self.id_to_node.get(id).copied() else {
            return Vec::new();
        };
        self.inner
            .neighbors_directed(key, direction)
            .filter_map(|neighbor| self.inner.node_weight(neighbor))
            .map(|node| &node.id)
            .collect()
    }

    /// All directed edges from `source` to `target`
    pub fn edges_between<'a>(
        &'a self,
        source: &'a NodeId,
        target: &'a NodeId,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges()
            .filter(move |edge| &edge.source == source && &edge.target == target)
    }

    /// Count of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Count of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }

    /// Rebuild a graph from a snapshot. Duplicate ids and edges with a
    /// missing endpoint are dropped.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut graph = Graph::new();
        for node in &snapshot.nodes {
            if let Err(e) = graph.insert_node(node.clone()) {
                warn!("Skipping snapshot node: {e}");
            }
        }
        for edge in &snapshot.edges {
            if let Err(e) = graph.insert_edge(edge.clone()) {
                warn!("Skipping snapshot edge '{}': {e}", edge.id);
            }
        }
        graph
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
