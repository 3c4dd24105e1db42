/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use euclid::default::Point2D;
use mindshell::NodeId;
use proptest::prelude::*;

use super::harness::TestHarness;

const STYLES: [(&str, &str); 5] = [
    ("fontSize", "20"),
    ("fontStyle", "bold"),
    ("fontColor", "#f00"),
    ("edgeColor", "#0f0"),
    ("fontSize", ""),
];

#[derive(Debug, Clone)]
enum Command {
    Add(usize),
    AddToAnchor,
    Select(Vec<usize>),
    Delete,
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    Connect(usize, usize),
    Style(usize),
    Move(usize, f32, f32),
    Relabel(usize),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => any::<usize>().prop_map(Command::Add),
        1 => Just(Command::AddToAnchor),
        2 => prop::collection::vec(any::<usize>(), 0..4).prop_map(Command::Select),
        1 => Just(Command::Delete),
        1 => Just(Command::Copy),
        1 => Just(Command::Cut),
        1 => Just(Command::Paste),
        1 => Just(Command::Undo),
        1 => Just(Command::Redo),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Command::Connect(a, b)),
        1 => (0..STYLES.len()).prop_map(Command::Style),
        1 => (any::<usize>(), -500.0f32..500.0, -500.0f32..500.0)
            .prop_map(|(i, x, y)| Command::Move(i, x, y)),
        1 => any::<usize>().prop_map(Command::Relabel),
    ]
}

fn pick(harness: &TestHarness, index: usize) -> Option<NodeId> {
    let nodes = harness.node_list();
    if nodes.is_empty() {
        return None;
    }
    Some(nodes[index % nodes.len()].clone())
}

fn run(harness: &mut TestHarness, command: Command) {
    match command {
        Command::Add(i) => {
            if let Some(parent) = pick(harness, i) {
                harness.add_child(&parent);
            }
        },
        Command::AddToAnchor => {
            let anchor_alive = harness.session.node(harness.session.anchor()).is_some();
            assert_eq!(harness.session.add(None).is_ok(), anchor_alive);
        },
        Command::Select(indices) => {
            let ids: Vec<NodeId> = indices.into_iter().filter_map(|i| pick(harness, i)).collect();
            harness.session.on_selection_changed(Some(ids));
        },
        Command::Delete => {
            harness.session.delete();
        },
        Command::Copy => {
            harness.session.copy();
        },
        Command::Cut => {
            harness.session.cut();
        },
        Command::Paste => {
            assert!(harness.session.paste().is_ok());
        },
        Command::Undo => {
            harness.session.undo();
        },
        Command::Redo => {
            harness.session.redo();
        },
        Command::Connect(a, b) => {
            if let (Some(source), Some(target)) = (pick(harness, a), pick(harness, b)) {
                assert!(harness.session.connect(&source, &target).is_ok());
            }
        },
        Command::Style(i) => {
            let (property, value) = STYLES[i];
            assert!(harness.session.set_style(property, value).is_ok());
        },
        Command::Move(i, x, y) => {
            if let Some(node) = pick(harness, i) {
                assert!(harness.session.on_node_moved(&node, Point2D::new(x, y)));
            }
        },
        Command::Relabel(i) => {
            if let Some(node) = pick(harness, i) {
                harness.session.relabel(&node, &format!("idea {i}"));
            }
        },
    }
}

proptest! {
    #[test]
    fn proptest_command_sequences_keep_graph_consistent(
        commands in prop::collection::vec(command(), 1..40)
    ) {
        let mut harness = TestHarness::new();
        for command in commands {
            run(&mut harness, command);
            harness.assert_invariants();
        }
    }

    #[test]
    fn proptest_full_undo_then_full_redo_returns_to_latest_state(
        commands in prop::collection::vec(command(), 1..40)
    ) {
        let mut harness = TestHarness::new();
        for command in commands {
            run(&mut harness, command);
        }
        let latest = harness.session.graph().snapshot();
        let redo_available = harness.session.history().future_len();

        let mut undone = 0;
        while harness.session.undo() {
            undone += 1;
        }
        prop_assert_eq!(harness.session.graph().node_count(), 1);
        for _ in 0..undone {
            prop_assert!(harness.session.redo());
        }
        prop_assert_eq!(harness.session.graph().snapshot(), latest);
        prop_assert_eq!(harness.session.history().future_len(), redo_available);
    }
}
