//! Anchor-point geometry.
//!
//! Pure functions mapping a node's center position to the fixed-offset
//! points where edges visually attach: output on the right edge of the
//! node's box, input on the left. No state, no failure modes.

use crate::types::{Node, Point};

/// Half the visual width of a node box; anchors sit this far from center.
pub const ANCHOR_HALF_WIDTH: f64 = 46.0;

/// The point where outgoing edges leave the node (right side).
pub fn output_anchor(node: &Node) -> Point {
    node.position.offset(ANCHOR_HALF_WIDTH, 0.0)
}

/// The point where incoming edges enter the node (left side).
pub fn input_anchor(node: &Node) -> Point {
    node.position.offset(-ANCHOR_HALF_WIDTH, 0.0)
}
