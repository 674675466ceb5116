//! The graph aggregate: insertion-ordered nodes behind an id index, plus
//! the edge list.
//!
//! Nodes are owned centrally and referenced by id everywhere else; edges
//! are plain value records holding ids, so there is no cyclic ownership.
//! The id index is a `BTreeMap` for deterministic iteration; the separate
//! order vector preserves insertion order, which the mutator's survivor
//! policy depends on.
//!
//! Edges referencing vanished nodes are legal only transiently, while
//! their collapse animation finishes. Structural rules (acyclicity, degree
//! caps, duplicates, direction) are validated at insertion time against a
//! [`ModePolicy`]; they are never re-checked globally.

use std::collections::BTreeMap;

use crate::constraint;
use crate::geometry;
use crate::policy::{DuplicateEdgeRule, ModePolicy};
use crate::types::{Edge, EdgeId, Node, NodeId};

/// Error type for rejected edge insertions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// Endpoint node does not exist.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
    /// Source and destination are the same node.
    #[error("self-referential edge on {0}")]
    SelfLoop(NodeId),
    /// The pair is already connected under the active duplicate rule.
    #[error("already connected: {0} -> {1}")]
    DuplicateEdge(NodeId, NodeId),
    /// The edge would close a cycle.
    #[error("edge would close a cycle: {0} -> {1}")]
    WouldCycle(NodeId, NodeId),
    /// The destination has reached its incoming-degree cap.
    #[error("incoming-degree cap reached on {0}")]
    DegreeExceeded(NodeId),
    /// The destination is not downstream of the source.
    #[error("target {1} is not downstream of {0}")]
    NotDownstream(NodeId, NodeId),
}

/// A small directed graph of labeled nodes and animated edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    order: Vec<NodeId>,
    index: BTreeMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Replaces an existing node with the same id in place,
    /// keeping its insertion-order slot.
    pub fn insert_node(&mut self, node: Node) {
        if !self.index.contains_key(&node.id) {
            self.order.push(node.id.clone());
        }
        self.index.insert(node.id.clone(), node);
    }

    /// Remove a node. Edges touching it are left behind as transient
    /// records; pruning them is the caller's responsibility.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        self.order.retain(|n| n != id);
        self.index.remove(id)
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id)
    }

    /// Look up a node mutably by id.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.index.get_mut(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(move |id| self.index.get(id))
    }

    /// Mutable access to every node, in id order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.index.values_mut()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Number of edges, transient collapsing records included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access to the edge list.
    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Look up an edge mutably by id.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    /// Append an edge without validation.
    ///
    /// Used for carrying transient collapsing edges across a topology swap
    /// and for building test fixtures; [`Graph::try_insert_edge`] is the
    /// validated path.
    pub fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = edge.id;
        self.edges.push(edge);
        id
    }

    /// Drop edges failing the predicate.
    pub fn retain_edges(&mut self, f: impl FnMut(&Edge) -> bool) {
        self.edges.retain(f);
    }

    /// Whether the pair counts as already connected under `rule`.
    pub fn connected(&self, from: &NodeId, to: &NodeId, rule: DuplicateEdgeRule) -> bool {
        self.edges.iter().any(|e| match rule {
            DuplicateEdgeRule::ExactDirection => e.connects(from, to),
            DuplicateEdgeRule::EitherDirection => e.connects(from, to) || e.connects(to, from),
        })
    }

    /// Validate a candidate edge against the policy without inserting it.
    pub fn check_edge(
        &self,
        from: &NodeId,
        to: &NodeId,
        policy: &ModePolicy,
    ) -> Result<(), TopologyError> {
        let from_node = self
            .node(from)
            .ok_or_else(|| TopologyError::UnknownNode(from.clone()))?;
        let to_node = self
            .node(to)
            .ok_or_else(|| TopologyError::UnknownNode(to.clone()))?;
        if from == to {
            return Err(TopologyError::SelfLoop(from.clone()));
        }
        if self.connected(from, to, policy.duplicate_rule) {
            return Err(TopologyError::DuplicateEdge(from.clone(), to.clone()));
        }
        if policy.downstream_only && !constraint::is_downstream(from_node, to_node) {
            return Err(TopologyError::NotDownstream(from.clone(), to.clone()));
        }
        if let Some(cap) = policy.max_incoming {
            if constraint::incoming_degree(self, to) >= cap {
                return Err(TopologyError::DegreeExceeded(to.clone()));
            }
        }
        if policy.enforce_acyclic && constraint::would_create_cycle(self, from, to) {
            return Err(TopologyError::WouldCycle(from.clone(), to.clone()));
        }
        Ok(())
    }

    /// Insert a validated edge. The new edge is nascent: both animated
    /// endpoints start at the source node's output anchor.
    pub fn try_insert_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        policy: &ModePolicy,
    ) -> Result<EdgeId, TopologyError> {
        self.check_edge(from, to, policy)?;
        let origin = geometry::output_anchor(self.node(from).expect("checked above"));
        Ok(self.push_edge(Edge::new(from.clone(), to.clone(), origin)))
    }
}
