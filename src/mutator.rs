//! Topology mutation.
//!
//! Given the current graph and a target node count, decides which nodes
//! survive, synthesizes new ones, prunes and generates edges under the
//! active mode's constraints, and lays the result out. The whole process
//! is a pure transformation: it reads the current graph, returns a new
//! graph plus the set of structural deltas the choreographer needs to
//! drive transitions, and never fails: every randomness-driven shortfall
//! (no valid edge target, placement budget exhausted) degrades to a
//! smaller result, not an error.
//!
//! All collapse anchors for pruned edges are captured here, against the
//! pre-mutation graph, while every referenced node still exists.

use rand::Rng;

use crate::geometry;
use crate::layout::{self, LayoutConfig};
use crate::motion::CollapseTarget;
use crate::policy::{LayoutStrategy, ModePolicy};
use crate::types::{EdgeId, Graph, Node, NodeId, Point};

/// An edge pruned by a mutation, with its collapse already resolved
/// against pre-mutation anchors.
#[derive(Debug, Clone)]
pub struct PrunedEdge {
    /// The edge being removed.
    pub id: EdgeId,
    /// Which endpoint (or midpoint) the edge collapses into.
    pub kind: CollapseTarget,
    /// The captured collapse point.
    pub point: Point,
}

/// Structural changes of one mutation.
#[derive(Debug, Clone, Default)]
pub struct TopologyDelta {
    /// Nodes synthesized this mutation.
    pub nodes_added: Vec<NodeId>,
    /// Nodes dropped this mutation.
    pub nodes_removed: Vec<NodeId>,
    /// Edges generated this mutation.
    pub edges_added: Vec<EdgeId>,
    /// Edges pruned this mutation, with collapse targets.
    pub edges_pruned: Vec<PrunedEdge>,
}

/// A mutated graph plus the deltas that produced it.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    /// The post-mutation graph, laid out.
    pub graph: Graph,
    /// What changed.
    pub delta: TopologyDelta,
}

/// First unused node label.
///
/// Scans `A`–`Z`, then widens to two-letter labels `AA`, `AB`, …, `ZZ`,
/// so allocation never hands out a label already present. With all of
/// `A`–`Z` taken, the first fallback is `"AA"`.
pub fn available_node_id(graph: &Graph) -> NodeId {
    for c in 'A'..='Z' {
        let id = NodeId::new(c.to_string());
        if !graph.contains_node(&id) {
            return id;
        }
    }
    for a in 'A'..='Z' {
        for b in 'A'..='Z' {
            let id = NodeId::new(format!("{a}{b}"));
            if !graph.contains_node(&id) {
                return id;
            }
        }
    }
    // 702 labels cover any graph in the supported size range
    NodeId::new("ZZ")
}

/// Mutate the graph toward `target` nodes under `policy`.
pub fn mutate(
    current: &Graph,
    target: usize,
    policy: &ModePolicy,
    cfg: &LayoutConfig,
    rng: &mut impl Rng,
) -> MutationOutcome {
    let mut delta = TopologyDelta::default();
    let mut next = Graph::new();

    // Survivors: stable prefix of the current node order.
    let kept = target.min(current.node_count());
    for id in current.node_ids().iter().take(kept) {
        if let Some(node) = current.node(id) {
            next.insert_node(node.clone());
        }
    }
    delta.nodes_removed = current.node_ids().iter().skip(kept).cloned().collect();

    // Synthesize up to the target count.
    while next.node_count() < target {
        let id = available_node_id(&next);
        let position = match policy.layout {
            LayoutStrategy::Scatter => layout::random_position(&next, cfg, rng, None),
            LayoutStrategy::Tree => cfg.fallback,
        };
        next.insert_node(Node::entering(id.clone(), position));
        delta.nodes_added.push(id);
    }

    // Carry surviving edges (same id, same motion state); prune the rest.
    for edge in current.edges() {
        if edge.motion.is_collapsing() {
            // Already dying from an earlier cycle; not part of the topology.
            continue;
        }
        let from_survives = next.contains_node(&edge.from);
        let to_survives = next.contains_node(&edge.to);
        if from_survives && to_survives {
            next.push_edge(edge.clone());
        } else {
            let (kind, point) = collapse_anchor(current, edge, from_survives, to_survives);
            delta.edges_pruned.push(PrunedEdge {
                id: edge.id,
                kind,
                point,
            });
        }
    }

    // Generate new edges. An edge needs two nodes; below that, skip.
    let cap = policy.max_new_edges.min(target.saturating_sub(1));
    if cap > 0 {
        let goal = rng.gen_range(1..=cap);
        let ids: Vec<NodeId> = next.node_ids().to_vec();
        for _ in 0..goal {
            let source = ids[rng.gen_range(0..ids.len())].clone();
            let candidates: Vec<NodeId> = ids
                .iter()
                .filter(|to| next.check_edge(&source, to, policy).is_ok())
                .cloned()
                .collect();
            // No valid target for this source: the attempt is skipped,
            // never retried. Under-generation is an accepted outcome.
            if candidates.is_empty() {
                continue;
            }
            let to = candidates[rng.gen_range(0..candidates.len())].clone();
            if let Ok(id) = next.try_insert_edge(&source, &to, policy) {
                delta.edges_added.push(id);
            }
        }
    }

    layout::apply_layout(&mut next, policy.layout, cfg, rng);

    tracing::debug!(
        requested = target,
        added = delta.nodes_added.len(),
        removed = delta.nodes_removed.len(),
        new_edges = delta.edges_added.len(),
        pruned_edges = delta.edges_pruned.len(),
        "topology mutated"
    );

    MutationOutcome { graph: next, delta }
}

/// Resolve where a pruned edge collapses to, from pre-mutation anchors.
fn collapse_anchor(
    current: &Graph,
    edge: &crate::types::Edge,
    from_survives: bool,
    to_survives: bool,
) -> (CollapseTarget, Point) {
    let from_node = current
        .node(&edge.from)
        .expect("collapse anchor captured before removal");
    let to_node = current
        .node(&edge.to)
        .expect("collapse anchor captured before removal");
    match (from_survives, to_survives) {
        (true, false) => (CollapseTarget::Source, geometry::output_anchor(from_node)),
        (false, true) => (CollapseTarget::Destination, geometry::input_anchor(to_node)),
        (false, false) => (
            CollapseTarget::Midpoint,
            geometry::output_anchor(from_node).midpoint(geometry::input_anchor(to_node)),
        ),
        (true, true) => unreachable!("surviving edges are carried, not pruned"),
    }
}
