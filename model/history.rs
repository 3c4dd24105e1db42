/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Linear undo/redo history over graph snapshots.
//!
//! `present` is always the committed state the graph store shows. A new
//! commit discards the redo lineage; branching history is not kept.

use std::collections::VecDeque;

use crate::model::graph::GraphSnapshot;

/// Default undo depth.
pub const DEFAULT_HISTORY_LIMIT: usize = 128;

#[derive(Debug, Clone)]
pub struct History {
    /// Oldest at the front.
    past: VecDeque<GraphSnapshot>,
    present: GraphSnapshot,
    /// Nearest redo step at the back.
    future: Vec<GraphSnapshot>,
    /// Max `past` length; 0 means unbounded.
    limit: usize,
}

impl History {
    pub fn new(present: GraphSnapshot, limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: Vec::new(),
            limit,
        }
    }

    /// Record `snapshot` as the new present.
    pub fn commit(&mut self, snapshot: GraphSnapshot) {
        let previous = std::mem::replace(&mut self.present, snapshot);
        self.past.push_back(previous);
        self.future.clear();
        if self.limit > 0 && self.past.len() > self.limit {
            let excess = self.past.len() - self.limit;
            self.past.drain(0..excess);
        }
    }

    /// Step back one commit. Returns the restored present.
    pub fn undo(&mut self) -> Option<&GraphSnapshot> {
        let previous = self.past.pop_back()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        Some(&self.present)
    }

    /// Step forward one undone commit. Returns the restored present.
    pub fn redo(&mut self) -> Option<&GraphSnapshot> {
        let next = self.future.pop()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        Some(&self.present)
    }

    /// Overwrite the present without creating an undo step.
    pub fn amend_present(&mut self, snapshot: GraphSnapshot) {
        self.present = snapshot;
    }

    pub fn present(&self) -> &GraphSnapshot {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Undo steps, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &GraphSnapshot> + '_ {
        self.past.iter()
    }

    /// Redo steps, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &GraphSnapshot> + '_ {
        self.future.iter().rev()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
