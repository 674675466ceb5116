//! Mode policies: the constraint set and timing constants of a
//! choreography mode.
//!
//! The two built-in modes differ only in their parameters, never in code
//! paths: "randomize" (manual trigger, scattered placement, lightly
//! constrained topology, short delays) and "streaming" (self-rescheduling,
//! hierarchical tree layout, DAG + degree-capped topology).
//!
//! The duplicate-edge asymmetry between the modes (randomize treats
//! `A -> B` and `B -> A` as the same connection, streaming does not) is an
//! explicit policy flag, not a unified behavior.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Layout strategy applied after a topology mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutStrategy {
    /// Hierarchical BFS leveling with centered rows.
    Tree,
    /// Randomized collision-avoiding placement with a grid fallback.
    Scatter,
}

/// How an existing connection blocks a candidate edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateEdgeRule {
    /// `A → B` and `B → A` both count as "already connected".
    EitherDirection,
    /// Only an edge in the exact candidate direction counts.
    ExactDirection,
}

/// Timing constants of one choreography cycle.
///
/// Phase 1 (retraction + fade-out) runs for `retract`; the topology swap
/// lands at `retract`; phase 3 (extension + fade-in) starts at
/// `retract + hold` and runs for `extend`; `settle` after that, the cycle
/// returns to idle. `collapse` is the terminal animation of edges whose
/// nodes are being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingProfile {
    /// Duration of edge retraction and node fade-out.
    pub retract: Duration,
    /// Pause between the topology swap and the start of extension.
    pub hold: Duration,
    /// Duration of edge extension and node fade-in.
    pub extend: Duration,
    /// Delay after extension before newly-added emphasis clears.
    pub settle: Duration,
    /// Duration of the terminal collapse of removed-node edges.
    pub collapse: Duration,
}

impl TimingProfile {
    /// Snappy timings for the manually triggered randomize mode.
    pub fn quick() -> Self {
        Self {
            retract: Duration::from_millis(150),
            hold: Duration::from_millis(100),
            extend: Duration::from_millis(250),
            settle: Duration::from_millis(200),
            collapse: Duration::from_millis(200),
        }
    }

    /// Smoother timings for the continuously streaming mode.
    pub fn smooth() -> Self {
        Self {
            retract: Duration::from_millis(350),
            hold: Duration::from_millis(150),
            extend: Duration::from_millis(450),
            settle: Duration::from_millis(300),
            collapse: Duration::from_millis(300),
        }
    }

    /// Total wall time of one cycle, trigger to idle.
    pub fn cycle_total(&self) -> Duration {
        self.retract + self.hold + self.extend + self.settle
    }
}

/// Full parameter set of a choreography mode.
///
/// ## Parameters
///
/// - `layout`: placement strategy after each mutation
/// - `enforce_acyclic`: reject candidate edges that would close a cycle
/// - `max_incoming`: per-node incoming-degree cap, if any
/// - `downstream_only`: candidate targets must lie to the right of the source
/// - `duplicate_rule`: what "already connected" means
/// - `node_count_min`/`node_count_max`: target node count range per mutation
/// - `max_new_edges`: cap on edges generated per mutation (K)
/// - `stream_interval_min`/`_max`: uniform re-trigger interval in streaming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModePolicy {
    /// Placement strategy.
    pub layout: LayoutStrategy,
    /// Reject cycle-closing edges.
    pub enforce_acyclic: bool,
    /// Incoming-degree cap per node.
    pub max_incoming: Option<usize>,
    /// Require targets strictly downstream (greater x) of the source.
    pub downstream_only: bool,
    /// Duplicate-connection rule.
    pub duplicate_rule: DuplicateEdgeRule,
    /// Smallest target node count a mutation may choose.
    pub node_count_min: usize,
    /// Largest target node count a mutation may choose.
    pub node_count_max: usize,
    /// Cap on new edges per mutation.
    pub max_new_edges: usize,
    /// Phase timing constants.
    pub timing: TimingProfile,
    /// Lower bound of the streaming re-trigger interval.
    pub stream_interval_min: Duration,
    /// Upper bound of the streaming re-trigger interval.
    pub stream_interval_max: Duration,
}

impl ModePolicy {
    /// Manual randomize mode: scattered placement, light constraints.
    pub fn randomize() -> Self {
        Self {
            layout: LayoutStrategy::Scatter,
            enforce_acyclic: false,
            max_incoming: None,
            downstream_only: true,
            duplicate_rule: DuplicateEdgeRule::EitherDirection,
            node_count_min: 2,
            node_count_max: 8,
            max_new_edges: 4,
            timing: TimingProfile::quick(),
            stream_interval_min: Duration::from_millis(500),
            stream_interval_max: Duration::from_millis(1500),
        }
    }

    /// Streaming mode: tree layout, DAG topology, degree cap of 2.
    pub fn streaming() -> Self {
        Self {
            layout: LayoutStrategy::Tree,
            enforce_acyclic: true,
            max_incoming: Some(2),
            downstream_only: false,
            duplicate_rule: DuplicateEdgeRule::ExactDirection,
            node_count_min: 2,
            node_count_max: 6,
            max_new_edges: 3,
            timing: TimingProfile::smooth(),
            stream_interval_min: Duration::from_millis(500),
            stream_interval_max: Duration::from_millis(1500),
        }
    }
}

impl Default for ModePolicy {
    fn default() -> Self {
        Self::streaming()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_preset_constraints() {
        let p = ModePolicy::streaming();
        assert!(p.enforce_acyclic);
        assert_eq!(p.max_incoming, Some(2));
        assert!(!p.downstream_only);
        assert_eq!(p.duplicate_rule, DuplicateEdgeRule::ExactDirection);
        assert_eq!(p.layout, LayoutStrategy::Tree);
    }

    #[test]
    fn test_randomize_preset_constraints() {
        let p = ModePolicy::randomize();
        assert!(!p.enforce_acyclic);
        assert_eq!(p.max_incoming, None);
        assert!(p.downstream_only);
        assert_eq!(p.duplicate_rule, DuplicateEdgeRule::EitherDirection);
        assert_eq!(p.layout, LayoutStrategy::Scatter);
    }

    #[test]
    fn test_cycle_total() {
        let t = TimingProfile::smooth();
        assert_eq!(
            t.cycle_total(),
            t.retract + t.hold + t.extend + t.settle
        );
    }
}
