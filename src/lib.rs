//! # graph-choreography
//!
//! Timed, multi-phase transition choreography for small directed graphs.
//!
//! The crate renders nothing itself. It owns the hard part of an animated
//! graph view: deciding new topologies under structural constraints,
//! laying them out, and sequencing the visual transition so that an edge
//! endpoint is always anchored to a real, current, or intentionally
//! interpolated point, never to a deleted node.
//!
//! ## Core Contract
//!
//! 1. Every update cycle runs three phases in strict order:
//!    retract → mutate + layout → extend
//! 2. An edge's drawn geometry is computed from endpoints the edge owns,
//!    advanced only by its motion state machine, and never read from live
//!    node positions during a transition window
//! 3. Degenerate cases (label exhaustion, no valid edge target, placement
//!    budget exhausted) degrade to deterministic fallbacks, never errors
//!
//! ## Architecture
//!
//! ```text
//! trigger_update / start_streaming
//!         │
//!         ▼
//!  Choreographer ──► TopologyMutator ──► LayoutEngine (tree | scatter)
//!         │                 │                  │
//!         │                 └──── ConstraintChecker (cycle, degree,
//!         │                                      collision, direction)
//!         ▼
//!   EdgeMotion (retract / extend / collapse)
//!         │
//!         ▼
//!   RenderFrame ──► rendering collaborator (polls each frame)
//! ```
//!
//! Time is simulated: the host feeds [`Choreographer::tick`] from its own
//! frame loop, and all randomness flows through an injected seedable
//! source, so whole choreography runs are reproducible in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod choreographer;
pub mod constraint;
pub mod geometry;
pub mod layout;
pub mod motion;
pub mod mutator;
pub mod policy;
pub mod types;

// Re-exports
pub use choreographer::{Choreographer, CyclePhase, StreamState};
pub use constraint::MIN_SEPARATION;
pub use geometry::{input_anchor, output_anchor, ANCHOR_HALF_WIDTH};
pub use layout::{LayoutConfig, Level};
pub use motion::{CollapseTarget, EasingFn, EdgeMotion, MotionPhase, PointTween, ScalarTween};
pub use mutator::{available_node_id, mutate, MutationOutcome, PrunedEdge, TopologyDelta};
pub use policy::{DuplicateEdgeRule, LayoutStrategy, ModePolicy, TimingProfile};
pub use types::{
    Edge, EdgeId, EdgeSprite, Graph, Node, NodeId, NodeSprite, Point, RenderFrame, TopologyError,
};
