//! The graph choreographer: the top-level timed state machine.
//!
//! One update cycle runs three phases in strict order:
//!
//! ```text
//! trigger ──► Retracting ──► Mutating ──► Extending ──► Idle
//!             (phase 1)      (phase 2)    (phase 3)
//! ```
//!
//! Phase 1 retracts every surviving edge, starts the terminal collapse of
//! edges losing a node, and fades doomed nodes out. Phase 2 atomically
//! swaps in the mutated topology; still-collapsing edges ride along as
//! transient records until their animation completes. Phase 3 extends
//! every edge to its live post-layout anchors and fades new nodes in.
//!
//! Time is simulated: the host feeds [`Choreographer::tick`] from its
//! frame loop, and suspension points between phases are entries in an
//! internal due-time queue. Everything runs on the caller's thread; no
//! operation blocks.
//!
//! Overlapping cycles are serialized: a trigger landing mid-cycle sets a
//! pending flag (queue of one, latest wins) and fires when the cycle
//! settles, so delayed phase bodies from two cycles can never interleave.
//!
//! Streaming is a second, two-state machine layered on top: `Running`
//! re-triggers after a uniform random interval each time a cycle settles;
//! `stop_streaming` cancels the scheduled re-trigger but leaves an
//! in-flight cycle's remaining phases untouched.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry;
use crate::layout::LayoutConfig;
use crate::motion::{CollapseTarget, MotionPhase, ScalarTween};
use crate::mutator::{self, MutationOutcome};
use crate::policy::ModePolicy;
use crate::types::{EdgeId, Graph, NodeId, Point, RenderFrame};

/// Phase of the current choreography cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// No cycle in flight.
    Idle,
    /// Phase 1: edges retracting, doomed nodes fading out.
    Retracting,
    /// Phase 2 window: new topology applied, waiting to extend.
    Mutating,
    /// Phase 3: edges extending, new nodes fading in.
    Extending,
}

/// Streaming switch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No re-triggering.
    Stopped,
    /// Cycles re-trigger at random intervals until stopped.
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ApplyMutation,
    BeginExtension,
    Settle,
    StreamTrigger,
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    action: Action,
}

#[derive(Debug)]
struct NodeFade {
    id: NodeId,
    tween: ScalarTween,
}

/// Top-level orchestrator of topology transitions.
///
/// The entry point for external callers: a UI layer triggers updates,
/// ticks simulated time forward, and reads [`RenderFrame`]s.
#[derive(Debug)]
pub struct Choreographer {
    graph: Graph,
    policy: ModePolicy,
    layout: LayoutConfig,
    rng: StdRng,
    clock: Duration,
    queue: Vec<Scheduled>,
    next_seq: u64,
    phase: CyclePhase,
    stream: StreamState,
    pending_update: bool,
    staged: Option<MutationOutcome>,
    fades: Vec<NodeFade>,
}

impl Choreographer {
    /// Create a choreographer with an entropy-seeded random source.
    pub fn new(policy: ModePolicy) -> Self {
        Self::from_rng(policy, StdRng::from_entropy())
    }

    /// Create a choreographer with a fixed seed, for reproducible runs.
    pub fn with_seed(policy: ModePolicy, seed: u64) -> Self {
        Self::from_rng(policy, StdRng::seed_from_u64(seed))
    }

    fn from_rng(policy: ModePolicy, rng: StdRng) -> Self {
        Self {
            graph: Graph::new(),
            policy,
            layout: LayoutConfig::default(),
            rng,
            clock: Duration::ZERO,
            queue: Vec::new(),
            next_seq: 0,
            phase: CyclePhase::Idle,
            stream: StreamState::Stopped,
            pending_update: false,
            staged: None,
            fades: Vec::new(),
        }
    }

    /// Start from an existing graph (builder).
    pub fn with_graph(mut self, graph: Graph) -> Self {
        self.graph = graph;
        self.track_idle_edges();
        self
    }

    /// Override the layout configuration (builder).
    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// The current graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The active mode policy.
    pub fn policy(&self) -> &ModePolicy {
        &self.policy
    }

    /// Phase of the in-flight cycle, if any.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Accumulated simulated time.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Whether streaming is running.
    pub fn is_streaming(&self) -> bool {
        self.stream == StreamState::Running
    }

    /// Capture the current renderable state.
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.graph)
    }

    /// Start one choreography cycle.
    ///
    /// If a cycle is already in flight, the request is queued (one slot,
    /// latest wins) and fires when the current cycle settles.
    pub fn trigger_update(&mut self) {
        if self.phase != CyclePhase::Idle {
            self.pending_update = true;
            return;
        }

        let target = self
            .rng
            .gen_range(self.policy.node_count_min..=self.policy.node_count_max);
        let outcome = mutator::mutate(&self.graph, target, &self.policy, &self.layout, &mut self.rng);
        let timing = self.policy.timing;

        // Phase 1. Capture every anchor before any motion command runs.
        let pruned: BTreeMap<EdgeId, (CollapseTarget, Point)> = outcome
            .delta
            .edges_pruned
            .iter()
            .map(|p| (p.id, (p.kind, p.point)))
            .collect();
        let retract_anchors: BTreeMap<EdgeId, Point> = self
            .graph
            .edges()
            .iter()
            .filter(|e| !pruned.contains_key(&e.id) && !e.motion.is_collapsing())
            .filter_map(|e| {
                self.graph
                    .node(&e.from)
                    .map(|n| (e.id, geometry::output_anchor(n)))
            })
            .collect();

        for edge in self.graph.edges_mut() {
            if let Some((kind, point)) = pruned.get(&edge.id) {
                edge.motion.collapse(*point, *kind, timing.collapse);
            } else if let Some(anchor) = retract_anchors.get(&edge.id) {
                edge.motion.retract(*anchor, timing.retract);
            }
        }
        for id in &outcome.delta.nodes_removed {
            if let Some(node) = self.graph.node(id) {
                self.fades.push(NodeFade {
                    id: id.clone(),
                    tween: ScalarTween::new(node.opacity, 0.0, timing.retract),
                });
            }
        }

        self.staged = Some(outcome);
        self.phase = CyclePhase::Retracting;
        self.schedule(timing.retract, Action::ApplyMutation);
        self.schedule(timing.retract + timing.hold, Action::BeginExtension);
        tracing::debug!(requested = target, "choreography cycle started");
    }

    /// Switch streaming on and run the first cycle. No-op while running.
    pub fn start_streaming(&mut self) {
        if self.stream == StreamState::Running {
            return;
        }
        self.stream = StreamState::Running;
        tracing::debug!("streaming started");
        self.trigger_update();
    }

    /// Switch streaming off and cancel any scheduled re-trigger.
    ///
    /// An in-flight cycle's remaining phases still run; no *new* cycle
    /// will start after this call.
    pub fn stop_streaming(&mut self) {
        self.stream = StreamState::Stopped;
        self.queue.retain(|s| s.action != Action::StreamTrigger);
        tracing::debug!("streaming stopped");
    }

    /// Advance simulated time: fire due phase transitions, then advance
    /// all edge motion and node fades.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;

        loop {
            let due = self
                .queue
                .iter()
                .enumerate()
                .filter(|(_, s)| s.due <= self.clock)
                .min_by_key(|(_, s)| (s.due, s.seq))
                .map(|(i, _)| i);
            let Some(i) = due else { break };
            let scheduled = self.queue.remove(i);
            // Handlers schedule follow-ups relative to the event's own
            // time, not however far this tick has already advanced.
            let now = self.clock;
            self.clock = scheduled.due;
            match scheduled.action {
                Action::ApplyMutation => self.apply_mutation(),
                Action::BeginExtension => self.begin_extension(),
                Action::Settle => self.settle(),
                Action::StreamTrigger => self.trigger_update(),
            }
            self.clock = now;
        }

        self.advance_motion(dt);
    }

    fn schedule(&mut self, delay: Duration, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.clock + delay,
            seq,
            action,
        });
    }

    /// Phase 2: swap in the staged topology.
    ///
    /// Edges still collapsing ride along as transient records; they are
    /// destroyed by the motion pass once their animation completes, never
    /// synchronously here.
    fn apply_mutation(&mut self) {
        let Some(outcome) = self.staged.take() else {
            return;
        };
        let mut next = outcome.graph;
        // Carried edges were cloned when the mutation was staged, before
        // phase 1 ran; transplant the live motion state so retraction
        // progress survives the swap.
        for edge in next.edges_mut() {
            if let Some(live) = self.graph.edge(edge.id) {
                edge.motion = live.motion.clone();
            }
        }
        for edge in self.graph.edges() {
            if edge.motion.is_collapsing() && !edge.motion.is_finished() {
                next.push_edge(edge.clone());
            }
        }
        self.graph = next;
        self.fades.retain(|f| self.graph.contains_node(&f.id));
        self.phase = CyclePhase::Mutating;
        tracing::trace!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "topology swapped"
        );
    }

    /// Phase 3: extend every live edge and fade dim nodes in.
    fn begin_extension(&mut self) {
        let timing = self.policy.timing;

        let captures: Vec<(EdgeId, Point, Point)> = self
            .graph
            .edges()
            .iter()
            .filter(|e| !e.motion.is_collapsing())
            .filter_map(|e| {
                let from = self.graph.node(&e.from)?;
                let to = self.graph.node(&e.to)?;
                Some((e.id, geometry::output_anchor(from), geometry::input_anchor(to)))
            })
            .collect();
        for (id, from, to) in captures {
            if let Some(edge) = self.graph.edge_mut(id) {
                edge.motion.extend(from, to, timing.extend);
            }
        }

        let dim: Vec<(NodeId, f64)> = self
            .graph
            .nodes()
            .filter(|n| n.opacity < 1.0)
            .map(|n| (n.id.clone(), n.opacity))
            .collect();
        for (id, opacity) in dim {
            self.fades.push(NodeFade {
                id,
                tween: ScalarTween::new(opacity, 1.0, timing.extend),
            });
        }

        self.phase = CyclePhase::Extending;
        self.schedule(timing.extend + timing.settle, Action::Settle);
        tracing::trace!("extension started");
    }

    /// End of cycle: clear emphasis, go idle, run queued or streamed work.
    fn settle(&mut self) {
        for node in self.graph.nodes_mut() {
            node.settle();
        }
        self.phase = CyclePhase::Idle;
        tracing::debug!("choreography cycle settled");

        if self.pending_update {
            self.pending_update = false;
            self.trigger_update();
        } else if self.stream == StreamState::Running {
            let min = self.policy.stream_interval_min.as_secs_f64();
            let max = self.policy.stream_interval_max.as_secs_f64();
            let delay = Duration::from_secs_f64(self.rng.gen_range(min..=max));
            self.schedule(delay, Action::StreamTrigger);
            tracing::trace!(?delay, "next stream trigger scheduled");
        }
    }

    fn advance_motion(&mut self, dt: Duration) {
        for edge in self.graph.edges_mut() {
            edge.motion.tick(dt);
        }
        self.track_idle_edges();

        for fade in self.fades.iter_mut() {
            fade.tween.tick(dt);
            if let Some(node) = self.graph.node_mut(&fade.id) {
                node.opacity = fade.tween.value();
            }
        }
        self.fades.retain(|f| !f.tween.is_complete());

        // Collapsed edges die only after their animation has completed.
        self.graph.retain_edges(|e| !e.motion.is_finished());
    }

    /// Glue idle edges to their nodes' live anchors.
    ///
    /// Idle edges must reference existing nodes; only mid-collapse edges
    /// may legally outlive an endpoint.
    fn track_idle_edges(&mut self) {
        let anchors: Vec<(EdgeId, Point, Point)> = self
            .graph
            .edges()
            .iter()
            .filter(|e| e.motion.phase() == MotionPhase::Idle)
            .filter_map(|e| {
                let from = self.graph.node(&e.from);
                let to = self.graph.node(&e.to);
                debug_assert!(
                    from.is_some() && to.is_some(),
                    "idle edge {} references a vanished node",
                    e.id
                );
                Some((e.id, geometry::output_anchor(from?), geometry::input_anchor(to?)))
            })
            .collect();
        for (id, from, to) in anchors {
            if let Some(edge) = self.graph.edge_mut(id) {
                edge.motion.track(from, to);
            }
        }
    }
}
