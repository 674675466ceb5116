//! Edge motion: easing, tweens, and the per-edge transition state machine.
//!
//! An edge's drawn geometry is never computed from live node positions
//! during a transition window. Each edge owns a pair of animated endpoints,
//! advanced only by the state machine in this module:
//!
//! ```text
//! Idle → Retracting → Retracted → Extending → Idle
//!   └→ Collapsing(Source | Destination | Midpoint) → destroyed
//! ```
//!
//! Commands ([`EdgeMotion::retract`], [`EdgeMotion::extend`],
//! [`EdgeMotion::collapse`]) capture their start and target points at
//! invocation time. Nothing in this module looks up a node; by the time a
//! command's tween runs, the referenced node may already be gone.
//!
//! Tween completion snaps the animated point to the tween target exactly,
//! so post-phase positions are bit-identical to the captured anchors.

use std::time::Duration;

use crate::types::Point;

/// Easing function: maps `t` in [0, 1] to eased output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end). The default for edge motion.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Interpolates a scalar from `start` to `target` over a duration.
///
/// Elapsed time accumulates as [`Duration`] for precise, drift-free
/// progress. Zero durations are clamped to one nanosecond so a tween is
/// complete after its first tick rather than dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct ScalarTween {
    start: f64,
    target: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl ScalarTween {
    /// Create a tween with the default ease-in-out curve.
    pub fn new(start: f64, target: f64, duration: Duration) -> Self {
        Self {
            start,
            target,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_in_out,
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current interpolated value; exactly `target` once complete.
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.target;
        }
        let t = (self.easing)(self.progress());
        self.start + (self.target - self.start) * t
    }

    /// The value this tween ends at.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the tween has reached its end.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Interpolates a [`Point`] from `start` to `target` over a duration.
#[derive(Debug, Clone, Copy)]
pub struct PointTween {
    start: Point,
    target: Point,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl PointTween {
    /// Create a tween with the default ease-in-out curve.
    pub fn new(start: Point, target: Point, duration: Duration) -> Self {
        Self {
            start,
            target,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_in_out,
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current interpolated point; exactly `target` once complete.
    pub fn value(&self) -> Point {
        if self.is_complete() {
            return self.target;
        }
        self.start.lerp(self.target, (self.easing)(self.progress()))
    }

    /// The point this tween ends at.
    pub fn target(&self) -> Point {
        self.target
    }

    /// Whether the tween has reached its end.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Which shared point a collapsing edge shrinks to before destruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseTarget {
    /// Destination node is being removed; shrink into the source anchor.
    Source,
    /// Source node is being removed; shrink into the destination anchor.
    Destination,
    /// Both endpoint nodes are being removed; shrink to the midpoint.
    Midpoint,
}

/// Phase of an edge's motion state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Animated points track the connected nodes' live anchors.
    Idle,
    /// Destination point is animating toward the source point.
    Retracting,
    /// Destination point coincides with the source point, held.
    Retracted,
    /// Destination point is animating out to the live destination anchor.
    Extending,
    /// Terminal: both points animate to one shared point, then the edge dies.
    Collapsing(CollapseTarget),
}

/// Per-edge motion state: the animated endpoints and their active tweens.
///
/// Commands are externally driven; this type never self-schedules.
#[derive(Debug, Clone)]
pub struct EdgeMotion {
    phase: MotionPhase,
    animated_from: Point,
    animated_to: Point,
    from_tween: Option<PointTween>,
    to_tween: Option<PointTween>,
    collapse_done: bool,
}

impl EdgeMotion {
    /// Motion state for an edge already attached at both anchors.
    pub fn attached(from: Point, to: Point) -> Self {
        Self {
            phase: MotionPhase::Idle,
            animated_from: from,
            animated_to: to,
            from_tween: None,
            to_tween: None,
            collapse_done: false,
        }
    }

    /// Motion state for a nascent edge: both endpoints at one point,
    /// waiting to be extended.
    pub fn nascent(origin: Point) -> Self {
        let mut m = Self::attached(origin, origin);
        m.phase = MotionPhase::Retracted;
        m
    }

    /// Current visual source endpoint.
    pub fn animated_from(&self) -> Point {
        self.animated_from
    }

    /// Current visual destination endpoint.
    pub fn animated_to(&self) -> Point {
        self.animated_to
    }

    /// Current phase.
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Whether the edge is in its terminal collapse.
    pub fn is_collapsing(&self) -> bool {
        matches!(self.phase, MotionPhase::Collapsing(_))
    }

    /// Whether the terminal collapse has finished and the edge can be
    /// destroyed.
    pub fn is_finished(&self) -> bool {
        self.collapse_done
    }

    /// Begin retraction: the destination point animates toward the source.
    ///
    /// `live_from` is the source anchor captured by the caller at command
    /// time; the source point snaps to it and stays put.
    pub fn retract(&mut self, live_from: Point, duration: Duration) {
        self.animated_from = live_from;
        self.from_tween = None;
        self.to_tween = Some(PointTween::new(self.animated_to, live_from, duration));
        self.phase = MotionPhase::Retracting;
    }

    /// Begin extension: the destination point animates from the source
    /// anchor out to the live destination anchor.
    ///
    /// Both anchors are captured by the caller at command time. The source
    /// point resets to `live_from` (layout may have moved the node since
    /// retraction started).
    pub fn extend(&mut self, live_from: Point, live_to: Point, duration: Duration) {
        self.animated_from = live_from;
        self.animated_to = live_from;
        self.from_tween = None;
        self.to_tween = Some(PointTween::new(live_from, live_to, duration));
        self.phase = MotionPhase::Extending;
    }

    /// Begin the terminal collapse: both endpoints animate to `target`.
    pub fn collapse(&mut self, target: Point, kind: CollapseTarget, duration: Duration) {
        self.from_tween = Some(PointTween::new(self.animated_from, target, duration));
        self.to_tween = Some(PointTween::new(self.animated_to, target, duration));
        self.phase = MotionPhase::Collapsing(kind);
    }

    /// Track live anchors while idle. No effect in any other phase.
    pub fn track(&mut self, live_from: Point, live_to: Point) {
        if self.phase == MotionPhase::Idle {
            self.animated_from = live_from;
            self.animated_to = live_to;
        }
    }

    /// Advance active tweens and resolve phase transitions.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(tween) = &mut self.from_tween {
            tween.tick(dt);
            self.animated_from = tween.value();
            if tween.is_complete() {
                self.animated_from = tween.target();
                self.from_tween = None;
            }
        }
        if let Some(tween) = &mut self.to_tween {
            tween.tick(dt);
            self.animated_to = tween.value();
            if tween.is_complete() {
                self.animated_to = tween.target();
                self.to_tween = None;
            }
        }

        match self.phase {
            MotionPhase::Retracting if self.to_tween.is_none() => {
                self.phase = MotionPhase::Retracted;
            }
            MotionPhase::Extending if self.to_tween.is_none() => {
                self.phase = MotionPhase::Idle;
            }
            MotionPhase::Collapsing(_)
                if self.from_tween.is_none() && self.to_tween.is_none() =>
            {
                self.collapse_done = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUR: Duration = Duration::from_millis(300);

    #[test]
    fn test_easing_bounds() {
        for f in [linear as EasingFn, ease_in, ease_out, ease_in_out] {
            assert_eq!(f(0.0), 0.0);
            assert_eq!(f(1.0), 1.0);
            assert_eq!(f(-1.0), 0.0);
            assert_eq!(f(2.0), 1.0);
        }
    }

    #[test]
    fn test_scalar_tween_snaps_to_target() {
        let mut t = ScalarTween::new(1.0, 0.0, DUR);
        t.tick(Duration::from_millis(150));
        assert!(t.value() < 1.0 && t.value() > 0.0);
        t.tick(Duration::from_millis(151));
        assert!(t.is_complete());
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn test_retraction_pins_destination_to_source() {
        let from = Point::new(146.0, 300.0);
        let to = Point::new(354.0, 300.0);
        let mut motion = EdgeMotion::attached(from, to);

        motion.retract(from, DUR);
        assert_eq!(motion.phase(), MotionPhase::Retracting);

        motion.tick(DUR);
        assert_eq!(motion.phase(), MotionPhase::Retracted);
        assert_eq!(motion.animated_to(), motion.animated_from());
        assert_eq!(motion.animated_to(), from);
    }

    #[test]
    fn test_extension_reaches_live_destination_exactly() {
        let mut motion = EdgeMotion::nascent(Point::new(0.0, 0.0));
        let live_from = Point::new(146.0, 120.0);
        let live_to = Point::new(454.0, 250.0);

        motion.extend(live_from, live_to, DUR);
        assert_eq!(motion.animated_from(), live_from);

        motion.tick(Duration::from_millis(100));
        assert_ne!(motion.animated_to(), live_to);

        motion.tick(DUR);
        assert_eq!(motion.phase(), MotionPhase::Idle);
        assert_eq!(motion.animated_to(), live_to);
    }

    #[test]
    fn test_collapse_converges_and_finishes() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 0.0);
        let mut motion = EdgeMotion::attached(from, to);
        let target = from.midpoint(to);

        motion.collapse(target, CollapseTarget::Midpoint, DUR);
        assert!(motion.is_collapsing());
        assert!(!motion.is_finished());

        motion.tick(DUR);
        assert!(motion.is_finished());
        assert_eq!(motion.animated_from(), target);
        assert_eq!(motion.animated_to(), target);
    }

    #[test]
    fn test_track_only_applies_while_idle() {
        let mut motion = EdgeMotion::attached(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        motion.track(Point::new(1.0, 1.0), Point::new(11.0, 1.0));
        assert_eq!(motion.animated_from(), Point::new(1.0, 1.0));

        motion.retract(Point::new(1.0, 1.0), DUR);
        motion.track(Point::new(5.0, 5.0), Point::new(6.0, 6.0));
        assert_eq!(motion.animated_from(), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut motion = EdgeMotion::attached(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        motion.retract(Point::new(0.0, 0.0), Duration::ZERO);
        motion.tick(Duration::from_nanos(1));
        assert_eq!(motion.phase(), MotionPhase::Retracted);
    }
}
