//! Node types for the choreographed graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::point::Point;

/// Unique short label identifying a node.
///
/// Labels are allocated from `A`–`Z`, widening to two-letter labels
/// (`AA`, `AB`, …) once the single-letter space is exhausted.
/// Implements `Ord` for deterministic ordering in indexes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// A labeled node with its authoritative live placement.
///
/// `position` is the live placement the layout engine writes to. Edge
/// geometry is never drawn from it directly during a transition window;
/// edges own their animated endpoints (see [`crate::motion::EdgeMotion`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique label.
    pub id: NodeId,
    /// Live placement (center of the node's visual box).
    pub position: Point,
    /// Opacity in [0, 1]; drives fade in/out during add/remove.
    pub opacity: f64,
    /// Last-computed tree depth. Advisory, used only for styling.
    pub hierarchy_level: u32,
    /// True for one transition cycle after creation (emphasis styling).
    pub newly_added: bool,
}

impl Node {
    /// Create a fully visible node at the given position.
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            opacity: 1.0,
            hierarchy_level: 0,
            newly_added: true,
        }
    }

    /// Create a node entering the graph: invisible until its fade-in.
    pub fn entering(id: NodeId, position: Point) -> Self {
        Self {
            opacity: 0.0,
            ..Self::new(id, position)
        }
    }

    /// Settle the node after its first transition cycle.
    pub fn settle(&mut self) {
        self.newly_added = false;
    }
}
