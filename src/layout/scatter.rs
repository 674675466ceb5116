//! Scattered placement.
//!
//! Samples positions uniformly inside the canvas margins and rejects
//! candidates that violate the minimum pairwise separation. The sampling
//! budget is fixed; on exhaustion a deterministic grid scan takes over,
//! and if even the grid is full, a fixed default point is returned.
//! Termination is traded for strict collision-freedom: the function
//! always returns *some* point.

use rand::Rng;

use crate::constraint;
use crate::types::{Graph, NodeId, Point};

use super::LayoutConfig;

/// Sample a collision-free position, falling back to [`grid_position`].
pub fn random_position(
    graph: &Graph,
    cfg: &LayoutConfig,
    rng: &mut impl Rng,
    exclude: Option<&NodeId>,
) -> Point {
    for _ in 0..cfg.scatter_attempts {
        let candidate = Point::new(
            rng.gen_range(cfg.margin..=cfg.canvas_width - cfg.margin),
            rng.gen_range(cfg.margin..=cfg.canvas_height - cfg.margin),
        );
        if !constraint::has_collision(graph, candidate, exclude) {
            return candidate;
        }
    }
    grid_position(graph, cfg, exclude)
}

/// Deterministic row/column scan over the fallback grid; first
/// collision-free cell wins, the fixed default point if none does.
pub fn grid_position(graph: &Graph, cfg: &LayoutConfig, exclude: Option<&NodeId>) -> Point {
    for row in 0..cfg.grid_rows {
        for col in 0..cfg.grid_cols {
            let cell = Point::new(
                cfg.margin + col as f64 * cfg.grid_spacing,
                cfg.margin + row as f64 * cfg.grid_spacing,
            );
            if !constraint::has_collision(graph, cell, exclude) {
                return cell;
            }
        }
    }
    cfg.fallback
}

/// Re-place every node with a fresh scattered position.
///
/// Nodes are placed in insertion order; each placement sees the already
/// re-placed prefix, so separations hold across the pass.
pub fn apply_scatter_layout(graph: &mut Graph, cfg: &LayoutConfig, rng: &mut impl Rng) {
    let ids: Vec<NodeId> = graph.node_ids().to_vec();
    for id in ids {
        let position = random_position(graph, cfg, rng, Some(&id));
        if let Some(node) = graph.node_mut(&id) {
            node.position = position;
        }
    }
}
