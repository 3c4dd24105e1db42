/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashSet;

use mindshell::NodeId;

use super::harness::TestHarness;

#[test]
fn test_copy_takes_induced_subgraph_only() {
    let mut harness = TestHarness::new();
    let (root, a, _b) = harness.chain();
    harness.select(&[&root, &a]);

    assert!(harness.session.copy());
    let clipboard = harness.session.clipboard().unwrap();
    assert_eq!(clipboard.nodes().len(), 2);
    assert_eq!(clipboard.edges().len(), 1);
    assert_eq!(clipboard.edges()[0].source, root);
    assert_eq!(clipboard.edges()[0].target, a);
}

#[test]
fn test_copy_does_not_commit() {
    let mut harness = TestHarness::new();
    let (root, _, _) = harness.chain();
    harness.select(&[&root]);
    let steps = harness.undo_steps();

    assert!(harness.session.copy());
    assert_eq!(harness.undo_steps(), steps);
}

#[test]
fn test_copy_with_empty_selection_keeps_previous_clipboard() {
    let mut harness = TestHarness::new();
    let root = harness.root();
    harness.select(&[&root]);
    harness.session.copy();

    harness.select(&[]);
    assert!(!harness.session.copy());
    assert_eq!(harness.session.clipboard().unwrap().nodes()[0].id, root);
}

#[test]
fn test_paste_after_originals_deleted() {
    let mut harness = TestHarness::new();
    let (_, a, b) = harness.chain();
    harness.session.relabel(&b, "Leaf");
    harness.select(&[&a, &b]);
    assert!(harness.session.copy());
    assert!(harness.session.delete());
    assert!(!harness.node_ids().contains(&a));

    let pasted = harness
        .session
        .paste()
        .unwrap()
        .expect("clipboard holds two nodes");
    assert_eq!(pasted.len(), 2);
    assert!(pasted.iter().all(|id| harness.session.node(id).is_some()));
    assert!(
        harness
            .session
            .nodes()
            .any(|node| node.label == "Leaf" && pasted.contains(&node.id))
    );
    assert_eq!(harness.session.graph().out_neighbors(&pasted[0]), vec![&pasted[1]]);
    assert!(harness.session.edges().all(|edge| {
        edge.source != a && edge.source != b && edge.target != a && edge.target != b
    }));
    harness.assert_invariants();
}

#[test]
fn test_repeated_paste_creates_disjoint_copies() {
    let mut harness = TestHarness::new();
    let (_, a, b) = harness.chain();
    harness.select(&[&a, &b]);
    harness.session.copy();

    let first: HashSet<NodeId> = harness.session.paste().unwrap().unwrap().into_iter().collect();
    let second: HashSet<NodeId> =
        harness.session.paste().unwrap().unwrap().into_iter().collect();
    assert!(first.is_disjoint(&second));
    assert_eq!(harness.session.graph().node_count(), 7);

    for edge in harness.session.edges() {
        let joins_first = first.contains(&edge.source) || first.contains(&edge.target);
        let joins_second = second.contains(&edge.source) || second.contains(&edge.target);
        assert!(!(joins_first && joins_second), "edge {} crosses pastes", edge.id);
        if joins_first {
            assert!(first.contains(&edge.source) && first.contains(&edge.target));
        }
    }
    harness.assert_invariants();
}

#[test]
fn test_paste_keeps_selection_and_is_one_undo_step() {
    let mut harness = TestHarness::new();
    let (root, a, _) = harness.chain();
    harness.select(&[&a]);
    harness.session.copy();
    harness.select(&[&root]);
    let steps = harness.undo_steps();

    let pasted = harness.session.paste().unwrap().unwrap();
    assert_eq!(harness.undo_steps(), steps + 1);
    assert_eq!(harness.session.selection().ordered(), &[root]);

    assert!(harness.session.undo());
    assert!(harness.session.node(&pasted[0]).is_none());
}

#[test]
fn test_paste_with_empty_clipboard_is_noop() {
    let mut harness = TestHarness::new();
    assert_eq!(harness.session.paste(), Ok(None));
    assert!(!harness.session.can_undo());
}

#[test]
fn test_clipboard_is_detached_from_later_edits() {
    let mut harness = TestHarness::new();
    let root = harness.root();
    harness.select(&[&root]);
    harness.session.copy();
    harness.session.relabel(&root, "Renamed");

    let pasted = harness.session.paste().unwrap().unwrap();
    assert_eq!(harness.session.node(&pasted[0]).unwrap().label, "Central Idea");
}

#[test]
fn test_pasted_node_lands_below_copied_position() {
    let mut harness = TestHarness::new();
    let root = harness.root();
    harness.select(&[&root]);
    harness.session.copy();

    let pasted = harness.session.paste().unwrap().unwrap();
    let position = harness.session.node(&pasted[0]).unwrap().position;
    assert_eq!(position.y, 350.0);
    assert!((200.0..=300.0).contains(&position.x));
}

#[test]
fn test_cut_is_a_single_undo_step() {
    let mut harness = TestHarness::new();
    let (_, a, b) = harness.chain();
    harness.select(&[&a, &b]);
    let steps = harness.undo_steps();

    assert!(harness.session.cut());
    assert_eq!(harness.undo_steps(), steps + 1);
    assert_eq!(harness.session.graph().node_count(), 1);
    assert!(harness.session.selection().is_empty());
    assert_eq!(harness.session.clipboard().unwrap().nodes().len(), 2);

    assert!(harness.session.undo());
    assert_eq!(harness.session.graph().node_count(), 3);
    assert_eq!(harness.session.clipboard().unwrap().nodes().len(), 2);
}

#[test]
fn test_cut_with_empty_selection_does_nothing() {
    let mut harness = TestHarness::new();
    harness.chain();
    let steps = harness.undo_steps();
    assert!(!harness.session.cut());
    assert_eq!(harness.undo_steps(), steps);
    assert!(harness.session.clipboard().is_none());
}
