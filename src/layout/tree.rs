//! Hierarchical tree layout.
//!
//! Levels are assigned by BFS distance from the root set (nodes with no
//! incoming edges), first discovery wins. The traversal is capped at a
//! fixed level count; anything never reached (disconnected components,
//! nodes past the cap) lands in one final extra level. Rows are centered
//! horizontally.
//!
//! Placement is a pure function of level membership and order: the same
//! graph laid out twice lands on identical positions.

use std::collections::BTreeSet;

use crate::constraint;
use crate::types::{Graph, NodeId, Point};

use super::LayoutConfig;

/// One horizontal row of the tree layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Member node ids, in discovery order.
    pub members: Vec<NodeId>,
    /// Vertical position of the row.
    pub y: f64,
}

/// Assign every node to a level.
///
/// Root set: nodes with zero incoming edges; if there are none (the graph
/// is all cycles or empty of sources), the first `min(2, n)` nodes stand
/// in as roots, so a non-empty graph always yields at least one level.
pub fn build_levels(graph: &Graph, cfg: &LayoutConfig) -> Vec<Level> {
    if graph.is_empty() {
        return Vec::new();
    }

    let mut roots: Vec<NodeId> = graph
        .nodes()
        .filter(|n| constraint::incoming_degree(graph, &n.id) == 0)
        .map(|n| n.id.clone())
        .collect();
    if roots.is_empty() {
        roots = graph
            .node_ids()
            .iter()
            .take(2.min(graph.node_count()))
            .cloned()
            .collect();
    }

    let mut assigned: BTreeSet<NodeId> = roots.iter().cloned().collect();
    let mut levels = vec![Level {
        members: roots,
        y: cfg.level_base_y,
    }];

    while levels.len() < cfg.max_levels {
        let current = &levels[levels.len() - 1].members;
        let mut next: Vec<NodeId> = Vec::new();
        for id in current {
            for edge in graph.edges() {
                if &edge.from != id || !graph.contains_node(&edge.to) {
                    continue;
                }
                if assigned.insert(edge.to.clone()) {
                    next.push(edge.to.clone());
                }
            }
        }
        if next.is_empty() {
            break;
        }
        let y = cfg.level_base_y + levels.len() as f64 * cfg.level_spacing;
        levels.push(Level { members: next, y });
    }

    let orphans: Vec<NodeId> = graph
        .node_ids()
        .iter()
        .filter(|id| !assigned.contains(id))
        .cloned()
        .collect();
    if !orphans.is_empty() {
        let y = cfg.level_base_y + levels.len() as f64 * cfg.level_spacing;
        levels.push(Level { members: orphans, y });
    }

    levels
}

/// Center one level's members horizontally.
///
/// Deterministic, order-preserving: identical membership and order yields
/// identical positions.
pub fn level_positions(level: &Level, cfg: &LayoutConfig) -> Vec<(NodeId, Point)> {
    let n = level.members.len();
    if n == 0 {
        return Vec::new();
    }
    let total = n as f64 * cfg.node_width + (n - 1) as f64 * cfg.h_gap;
    let start_x = (cfg.canvas_width - total) / 2.0;

    level
        .members
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let x = start_x + i as f64 * (cfg.node_width + cfg.h_gap) + cfg.node_width / 2.0;
            (id.clone(), Point::new(x, level.y))
        })
        .collect()
}

/// Build levels and write positions and hierarchy depths into the graph.
pub fn apply_tree_layout(graph: &mut Graph, cfg: &LayoutConfig) {
    let levels = build_levels(graph, cfg);
    for (depth, level) in levels.iter().enumerate() {
        for (id, position) in level_positions(level, cfg) {
            if let Some(node) = graph.node_mut(&id) {
                node.position = position;
                node.hierarchy_level = depth as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node};

    fn graph_with(labels: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for label in labels {
            g.insert_node(Node::new(NodeId::from(*label), Point::default()));
        }
        for (from, to) in edges {
            g.push_edge(Edge::new(
                NodeId::from(*from),
                NodeId::from(*to),
                Point::default(),
            ));
        }
        g
    }

    #[test]
    fn test_roots_are_nodes_without_incoming_edges() {
        let g = graph_with(&["A", "B", "C"], &[("A", "B"), ("A", "C")]);
        let levels = build_levels(&g, &LayoutConfig::default());

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].members, vec![NodeId::from("A")]);
        assert_eq!(levels[1].members, vec![NodeId::from("B"), NodeId::from("C")]);
    }

    #[test]
    fn test_root_fallback_when_no_sources() {
        // A -> B -> A: every node has an incoming edge
        let g = graph_with(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let levels = build_levels(&g, &LayoutConfig::default());

        assert_eq!(levels[0].members.len(), 2);
    }

    #[test]
    fn test_first_discovery_wins() {
        // C reachable from both A (depth 1) and B's child D (depth 2)
        let g = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "C"), ("B", "D"), ("D", "C")],
        );
        let levels = build_levels(&g, &LayoutConfig::default());

        assert!(levels[1].members.contains(&NodeId::from("C")));
        assert_eq!(
            levels
                .iter()
                .flat_map(|l| l.members.iter())
                .filter(|id| **id == NodeId::from("C"))
                .count(),
            1
        );
    }

    #[test]
    fn test_level_cap_sends_deep_nodes_to_extra_level() {
        let g = graph_with(
            &["A", "B", "C", "D", "E", "F", "G"],
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "D"),
                ("D", "E"),
                ("E", "F"),
                ("F", "G"),
            ],
        );
        let cfg = LayoutConfig::default();
        let levels = build_levels(&g, &cfg);

        // 5 BFS levels (A..E), then F and G in the single extra level
        assert_eq!(levels.len(), cfg.max_levels + 1);
        let last = &levels[levels.len() - 1];
        assert_eq!(last.members, vec![NodeId::from("F"), NodeId::from("G")]);
    }

    #[test]
    fn test_disconnected_nodes_appended_as_final_level() {
        let g = graph_with(&["A", "B", "X"], &[("A", "B")]);
        let levels = build_levels(&g, &LayoutConfig::default());

        assert_eq!(levels.len(), 3);
        assert_eq!(levels[2].members, vec![NodeId::from("X")]);
    }

    #[test]
    fn test_row_is_centered() {
        let cfg = LayoutConfig::default();
        let level = Level {
            members: vec![NodeId::from("A"), NodeId::from("B")],
            y: cfg.level_base_y,
        };
        let placed = level_positions(&level, &cfg);

        let left = placed[0].1.x - cfg.node_width / 2.0;
        let right = placed[1].1.x + cfg.node_width / 2.0;
        assert!((left - (cfg.canvas_width - right)).abs() < 1e-9);
        assert_eq!(placed[1].1.x - placed[0].1.x, cfg.node_width + cfg.h_gap);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut g = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D")],
        );
        let cfg = LayoutConfig::default();

        apply_tree_layout(&mut g, &cfg);
        let first: Vec<Point> = g.nodes().map(|n| n.position).collect();
        apply_tree_layout(&mut g, &cfg);
        let second: Vec<Point> = g.nodes().map(|n| n.position).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_hierarchy_levels_written() {
        let mut g = graph_with(&["A", "B"], &[("A", "B")]);
        apply_tree_layout(&mut g, &LayoutConfig::default());

        assert_eq!(g.node(&NodeId::from("A")).unwrap().hierarchy_level, 0);
        assert_eq!(g.node(&NodeId::from("B")).unwrap().hierarchy_level, 1);
    }
}
