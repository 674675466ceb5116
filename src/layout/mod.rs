//! Node placement strategies.
//!
//! Two interchangeable strategies, selected per mode policy: hierarchical
//! tree layout (BFS leveling from the root set, centered rows) and
//! scattered placement (randomized, collision-avoiding, with a
//! deterministic grid fallback). Both always terminate and always place
//! every node.

pub mod scatter;
pub mod tree;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::policy::LayoutStrategy;
use crate::types::{Graph, Point};

pub use scatter::{apply_scatter_layout, grid_position, random_position};
pub use tree::{apply_tree_layout, build_levels, level_positions, Level};

/// Canvas dimensions and spacing constants shared by both strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Canvas width in canvas units.
    pub canvas_width: f64,
    /// Canvas height in canvas units.
    pub canvas_height: f64,
    /// Margin kept clear on every canvas side.
    pub margin: f64,
    /// Visual width of a node box.
    pub node_width: f64,
    /// Horizontal gap between nodes in a row.
    pub h_gap: f64,
    /// Vertical position of the first tree level.
    pub level_base_y: f64,
    /// Vertical distance between consecutive tree levels.
    pub level_spacing: f64,
    /// BFS traversal cap: at most this many levels, regardless of shape.
    pub max_levels: usize,
    /// Rejection-sampling budget for scattered placement.
    pub scatter_attempts: usize,
    /// Fallback grid rows.
    pub grid_rows: usize,
    /// Fallback grid columns.
    pub grid_cols: usize,
    /// Fallback grid cell spacing.
    pub grid_spacing: f64,
    /// Last-resort placement when the fallback grid is also exhausted.
    pub fallback: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 700.0,
            margin: 80.0,
            node_width: 2.0 * crate::geometry::ANCHOR_HALF_WIDTH,
            h_gap: 48.0,
            level_base_y: 120.0,
            level_spacing: 130.0,
            max_levels: 5,
            scatter_attempts: 20,
            grid_rows: 4,
            grid_cols: 3,
            grid_spacing: 170.0,
            fallback: Point::new(500.0, 350.0),
        }
    }
}

/// Apply the given strategy to every node in the graph.
pub fn apply_layout(
    graph: &mut Graph,
    strategy: LayoutStrategy,
    cfg: &LayoutConfig,
    rng: &mut impl Rng,
) {
    match strategy {
        LayoutStrategy::Tree => tree::apply_tree_layout(graph, cfg),
        LayoutStrategy::Scatter => scatter::apply_scatter_layout(graph, cfg, rng),
    }
}
