/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Detached subgraph copies and their re-identified paste instances.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::model::graph::{Edge, EdgeId, Graph, Node, NodeId, random_uuid};
use crate::prefs::PlacementPolicy;

/// Owned copy of an induced subgraph. Later edits to the live graph never
/// reach it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Fresh nodes and edges produced by one paste.
#[derive(Debug, Clone)]
pub(crate) struct PastedSubgraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl Clipboard {
    /// Copy the selected nodes and the edges running between them. Edges
    /// that cross the selection boundary are left behind.
    pub fn capture(graph: &Graph, selected: &HashSet<NodeId>) -> Self {
        let nodes = graph
            .nodes()
            .filter(|node| selected.contains(&node.id))
            .cloned()
            .collect();
        let edges = graph
            .edges()
            .filter(|edge| selected.contains(&edge.source) && selected.contains(&edge.target))
            .cloned()
            .collect();
        Self { nodes, edges }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a paste instance with identities unused in `graph`.
    ///
    /// Every id gets the same per-paste suffix, and edge endpoints are
    /// remapped through this paste's own substitution table, so pasted edges
    /// only ever join copies made by the same paste. Positions are offset
    /// from the stored clipboard positions.
    pub(crate) fn instantiate<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        placement: &PlacementPolicy,
        rng: &mut R,
    ) -> PastedSubgraph {
        let (suffix, node_ids) = loop {
            let suffix = random_uuid(rng).simple().to_string();
            let node_ids: HashMap<&NodeId, NodeId> = self
                .nodes
                .iter()
                .map(|node| (&node.id, NodeId::new(format!("{}-{suffix}", node.id))))
                .collect();
            let edge_collision = self
                .edges
                .iter()
                .any(|edge| graph.contains_edge(&EdgeId::new(format!("{}-{suffix}", edge.id))));
            if !edge_collision && node_ids.values().all(|id| !graph.contains_node(id)) {
                break (suffix, node_ids);
            }
        };

        let nodes = self
            .nodes
            .iter()
            .map(|node| Node {
                id: node_ids[&node.id].clone(),
                position: placement.place(node.position, rng),
                label: node.label.clone(),
                style: node.style.clone(),
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .filter_map(|edge| {
                Some(Edge {
                    id: EdgeId::new(format!("{}-{suffix}", edge.id)),
                    source: node_ids.get(&edge.source)?.clone(),
                    target: node_ids.get(&edge.target)?.clone(),
                    style: edge.style.clone(),
                })
            })
            .collect();

        PastedSubgraph { nodes, edges }
    }
}
