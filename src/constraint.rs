//! Structural-validity checks over a graph.
//!
//! Pure query functions used by edge generation and placement: BFS
//! reachability (the cycle test), incoming-degree counting, the
//! minimum-separation collision test, and the directional-flow test.
//!
//! Reachability is iterative and queue-based; no recursion, so pathological
//! inputs cannot grow the stack. Graphs here are small (a handful of nodes)
//! and every query is sub-millisecond well past a few hundred nodes.

use std::collections::{BTreeSet, VecDeque};

use crate::types::{Graph, Node, NodeId, Point};

/// Minimum pairwise separation between node centers, in canvas units.
///
/// Two nodes exactly this far apart do NOT collide; collision requires
/// strictly closer placement.
pub const MIN_SEPARATION: f64 = 120.0;

/// Whether `target` is reachable from `start` following edge direction.
pub fn has_path(graph: &Graph, start: &NodeId, target: &NodeId) -> bool {
    if start == target {
        return true;
    }
    let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in graph.edges() {
            if &edge.from != current {
                continue;
            }
            if &edge.to == target {
                return true;
            }
            if visited.insert(&edge.to) {
                queue.push_back(&edge.to);
            }
        }
    }
    false
}

/// Whether adding `from → to` would close a cycle.
///
/// True iff the reverse path `to → … → from` already exists.
pub fn would_create_cycle(graph: &Graph, from: &NodeId, to: &NodeId) -> bool {
    has_path(graph, to, from)
}

/// Number of edges terminating at the given node.
pub fn incoming_degree(graph: &Graph, id: &NodeId) -> usize {
    graph.edges().iter().filter(|e| &e.to == id).count()
}

/// Whether any node (other than `exclude`) sits within [`MIN_SEPARATION`]
/// of the candidate position.
pub fn has_collision(graph: &Graph, candidate: Point, exclude: Option<&NodeId>) -> bool {
    graph.nodes().any(|node| {
        if exclude == Some(&node.id) {
            return false;
        }
        node.position.distance(candidate) < MIN_SEPARATION
    })
}

/// Directional-flow test: `b` lies strictly to the right of `a`.
///
/// Used only by the randomize mode's edge filter, never by streaming.
pub fn is_downstream(a: &Node, b: &Node) -> bool {
    b.position.x > a.position.x
}
