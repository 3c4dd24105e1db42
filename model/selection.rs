/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashSet;
use std::ops::Deref;

use crate::model::graph::NodeId;

/// Canonical node-selection state.
///
/// This wraps the selected-node set with explicit metadata so consumers can
/// reason about selection changes deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    nodes: HashSet<NodeId>,
    order: Vec<NodeId>,
    primary: Option<NodeId>,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic revision incremented whenever the selection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Primary selected node (most recently selected).
    pub fn primary(&self) -> Option<&NodeId> {
        self.primary.as_ref()
    }

    /// Selected ids in the order they were reported.
    pub fn ordered(&self) -> &[NodeId] {
        &self.order
    }

    /// Replace the whole selection. Duplicate ids keep their first position.
    pub fn replace<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.nodes.clear();
        self.order.clear();
        for key in keys {
            if self.nodes.insert(key.clone()) {
                self.order.push(key);
            }
        }
        self.primary = self.order.last().cloned();
        self.revision = self.revision.saturating_add(1);
    }

    pub fn clear(&mut self) {
        if self.nodes.is_empty() && self.primary.is_none() {
            return;
        }
        self.nodes.clear();
        self.order.clear();
        self.primary = None;
        self.revision = self.revision.saturating_add(1);
    }

    /// Drop ids for which `keep` returns false.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&NodeId) -> bool,
    {
        let before = self.order.len();
        self.order.retain(|key| keep(key));
        if self.order.len() == before {
            return;
        }
        self.nodes = self.order.iter().cloned().collect();
        self.primary = self.order.last().cloned();
        self.revision = self.revision.saturating_add(1);
    }

    pub fn to_set(&self) -> HashSet<NodeId> {
        self.nodes.clone()
    }
}

impl Deref for SelectionState {
    type Target = HashSet<NodeId>;

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}
