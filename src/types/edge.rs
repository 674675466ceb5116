//! Edge types for the choreographed graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::motion::EdgeMotion;
use crate::types::{NodeId, Point};

/// Unique identifier for an edge, stable for the edge's lifetime.
///
/// Wraps a UUID and implements `Ord` for deterministic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(Uuid);

impl EdgeId {
    /// Generate a fresh edge id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed connection between two nodes.
///
/// Holds node *ids*, never node references: the edge does not own its
/// endpoints. Its visual geometry lives in [`EdgeMotion`], decoupled from
/// the nodes' live anchor points for the whole of a transition window.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Stable identity, used for ordered independent re-rendering.
    pub id: EdgeId,
    /// Source node id.
    pub from: NodeId,
    /// Destination node id.
    pub to: NodeId,
    /// Animated endpoints and their state machine.
    pub motion: EdgeMotion,
}

impl Edge {
    /// Create a nascent edge whose endpoints both sit at `origin`
    /// (typically the source node's output anchor), ready to be extended.
    pub fn new(from: NodeId, to: NodeId, origin: Point) -> Self {
        Self {
            id: EdgeId::new(),
            from,
            to,
            motion: EdgeMotion::nascent(origin),
        }
    }

    /// Create an edge already attached at both anchors.
    pub fn attached(from: NodeId, to: NodeId, from_point: Point, to_point: Point) -> Self {
        Self {
            id: EdgeId::new(),
            from,
            to,
            motion: EdgeMotion::attached(from_point, to_point),
        }
    }

    /// Whether the edge touches the given node at either end.
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.from == id || &self.to == id
    }

    /// Whether the edge connects the given pair in this exact direction.
    pub fn connects(&self, from: &NodeId, to: &NodeId) -> bool {
        &self.from == from && &self.to == to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_ids_are_unique() {
        let a = EdgeId::new();
        let b = EdgeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_touches_and_connects() {
        let e = Edge::new(NodeId::from("A"), NodeId::from("B"), Point::default());
        assert!(e.touches(&NodeId::from("A")));
        assert!(e.touches(&NodeId::from("B")));
        assert!(!e.touches(&NodeId::from("C")));
        assert!(e.connects(&NodeId::from("A"), &NodeId::from("B")));
        assert!(!e.connects(&NodeId::from("B"), &NodeId::from("A")));
    }
}
