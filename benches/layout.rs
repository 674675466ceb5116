//! Performance benchmarks for reachability and layout.
//!
//! Run with: `cargo bench --bench layout`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | has_path, 256-node chain | <1ms | worst case: full traversal |
//! | build_levels, 8 nodes | <10µs | per-cycle cost in streaming mode |
//! | mutate, 8 nodes | <100µs | full mutation incl. layout |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use graph_choreography::{
    constraint, layout, mutate, Edge, Graph, LayoutConfig, ModePolicy, Node, NodeId, Point,
};

/// Linear chain: the worst case for reachability queries.
fn build_chain(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.insert_node(Node::new(
            NodeId::new(format!("N{i}")),
            Point::new(i as f64 * 10.0, 100.0),
        ));
    }
    for i in 1..n {
        g.push_edge(Edge::new(
            NodeId::new(format!("N{}", i - 1)),
            NodeId::new(format!("N{i}")),
            Point::default(),
        ));
    }
    g
}

/// A small branching graph at the engine's designed scale.
fn build_small_dag() -> Graph {
    let mut g = Graph::new();
    for label in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        g.insert_node(Node::new(NodeId::from(label), Point::default()));
    }
    for (from, to) in [
        ("A", "B"),
        ("A", "C"),
        ("B", "D"),
        ("C", "E"),
        ("D", "F"),
        ("E", "F"),
        ("F", "G"),
    ] {
        g.push_edge(Edge::new(NodeId::from(from), NodeId::from(to), Point::default()));
    }
    g
}

fn bench_has_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_path");
    for n in [8usize, 64, 256] {
        let graph = build_chain(n);
        let start = NodeId::from("N0");
        let target = NodeId::new(format!("N{}", n - 1));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| constraint::has_path(black_box(&graph), &start, &target));
        });
    }
    group.finish();
}

fn bench_build_levels(c: &mut Criterion) {
    let graph = build_small_dag();
    let cfg = LayoutConfig::default();
    c.bench_function("build_levels/8_nodes", |b| {
        b.iter(|| layout::build_levels(black_box(&graph), &cfg));
    });
}

fn bench_mutate(c: &mut Criterion) {
    let graph = build_small_dag();
    let policy = ModePolicy::streaming();
    let cfg = LayoutConfig::default();
    c.bench_function("mutate/8_to_6_nodes", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            mutate(black_box(&graph), 6, &policy, &cfg, &mut rng)
        });
    });
}

criterion_group!(benches, bench_has_path, bench_build_levels, bench_mutate);
criterion_main!(benches);
