//! Read-only per-frame export for the rendering collaborator.
//!
//! A [`RenderFrame`] is a stable, ordered snapshot of everything the
//! renderer needs: node boxes (center, opacity, styling hints) and edge
//! geometry (the animated endpoints, never live node positions). It is
//! valid at any instant: animated points always exist once an edge does,
//! so every capture is renderable, including mid-transition ones.

use serde::{Deserialize, Serialize};

use crate::types::{EdgeId, Graph, NodeId, Point};

/// Renderable state of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSprite {
    /// Node label.
    pub id: NodeId,
    /// Center of the node's visual box.
    pub position: Point,
    /// Opacity in [0, 1].
    pub opacity: f64,
    /// Tree depth, for styling.
    pub hierarchy_level: u32,
    /// Emphasis flag for nodes added this cycle.
    pub newly_added: bool,
}

/// Renderable state of one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSprite {
    /// Stable edge identity, for ordered independent re-rendering.
    pub id: EdgeId,
    /// Animated source endpoint.
    pub from: Point,
    /// Animated destination endpoint.
    pub to: Point,
    /// True while the edge is in its terminal collapse (de-emphasis).
    pub collapsing: bool,
}

/// One frame's worth of renderable state, in stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Nodes in insertion order.
    pub nodes: Vec<NodeSprite>,
    /// Edges in insertion order.
    pub edges: Vec<EdgeSprite>,
}

impl RenderFrame {
    /// Capture the current graph state.
    pub fn capture(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .map(|n| NodeSprite {
                    id: n.id.clone(),
                    position: n.position,
                    opacity: n.opacity,
                    hierarchy_level: n.hierarchy_level,
                    newly_added: n.newly_added,
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeSprite {
                    id: e.id,
                    from: e.motion.animated_from(),
                    to: e.motion.animated_to(),
                    collapsing: e.motion.is_collapsing(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node};

    #[test]
    fn test_capture_preserves_order_and_geometry() {
        let mut g = Graph::new();
        g.insert_node(Node::new(NodeId::from("B"), Point::new(400.0, 100.0)));
        g.insert_node(Node::new(NodeId::from("A"), Point::new(100.0, 100.0)));
        g.push_edge(Edge::attached(
            NodeId::from("A"),
            NodeId::from("B"),
            Point::new(146.0, 100.0),
            Point::new(354.0, 100.0),
        ));

        let frame = RenderFrame::capture(&g);
        assert_eq!(frame.nodes[0].id, NodeId::from("B"));
        assert_eq!(frame.nodes[1].id, NodeId::from("A"));
        assert_eq!(frame.edges.len(), 1);
        assert_eq!(frame.edges[0].from, Point::new(146.0, 100.0));
        assert!(!frame.edges[0].collapsing);
    }
}
