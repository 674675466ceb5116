//! Property tests for topology mutation.
//!
//! Under streaming-mode constraints, no sequence of mutations may ever
//! produce a cycle, exceed the incoming-degree cap, or hand out a
//! duplicate node label, for any seed and any target-count sequence.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

use graph_choreography::{
    available_node_id, constraint, mutate, Graph, LayoutConfig, ModePolicy, Node, NodeId, Point,
};

proptest! {
    #[test]
    fn streaming_mutations_preserve_dag_and_degree_cap(
        seed in any::<u64>(),
        targets in prop::collection::vec(1usize..=8, 1..12),
    ) {
        let policy = ModePolicy::streaming();
        let cfg = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::new();

        for target in targets {
            graph = mutate(&graph, target, &policy, &cfg, &mut rng).graph;

            // Incoming-degree cap
            for node in graph.nodes() {
                prop_assert!(constraint::incoming_degree(&graph, &node.id) <= 2);
            }

            // No mutual reachability anywhere in a DAG
            let ids: Vec<NodeId> = graph.node_ids().to_vec();
            for a in &ids {
                for b in &ids {
                    if a != b {
                        prop_assert!(
                            !(constraint::has_path(&graph, a, b)
                                && constraint::has_path(&graph, b, a))
                        );
                    }
                }
            }

            // Labels stay unique
            let unique: BTreeSet<&NodeId> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }

    #[test]
    fn fresh_labels_never_collide(present in 0usize..30) {
        let mut graph = Graph::new();
        let mut label = String::new();
        for i in 0..present {
            // Fill labels in allocation order: A..Z, then AA, AB, ...
            label.clear();
            if i < 26 {
                label.push((b'A' + i as u8) as char);
            } else {
                label.push('A');
                label.push((b'A' + (i - 26) as u8) as char);
            }
            graph.insert_node(Node::new(NodeId::new(label.clone()), Point::default()));
        }

        let fresh = available_node_id(&graph);
        prop_assert!(!graph.contains_node(&fresh));
    }
}

#[test]
fn label_fallback_after_z_is_aa() {
    let mut graph = Graph::new();
    for c in 'A'..='Z' {
        graph.insert_node(Node::new(NodeId::new(c.to_string()), Point::default()));
    }
    assert_eq!(available_node_id(&graph), NodeId::from("AA"));
}
