//! Dash motion integration

use glam::Vec3;
use tracing::trace;

use super::config::{DashConfig, DashSpace};

/// Remaining time below which a run counts as complete (absorbs float drift
/// from summing fixed steps)
const COMPLETION_EPSILON: f32 = 1e-5;

/// Position to command for one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStep {
    /// Absolute position to hand the mover
    pub position: Vec3,
    /// The run reached its duration on this step
    pub finished: bool,
}

/// A dash in progress. The destination is fixed for the run's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct DashRun {
    origin: Vec3,
    destination: Vec3,
    elapsed: f32,
    last_candidate: Vec3,
}

impl DashRun {
    /// Start a run from `origin` to `destination`
    pub fn new(origin: Vec3, destination: Vec3) -> Self {
        Self {
            origin,
            destination,
            elapsed: 0.0,
            last_candidate: origin,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Seconds of the run consumed so far, within [0, duration]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The interpolated point computed on the latest step (origin before the first)
    pub fn last_candidate(&self) -> Vec3 {
        self.last_candidate
    }

    /// Unit travel direction, zero for a zero-length dash
    pub fn direction(&self) -> Vec3 {
        (self.destination - self.origin).normalize_or_zero()
    }

    /// Normalized time in [0, 1]
    pub fn progress(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / duration).clamp(0.0, 1.0)
    }

    /// Advance the run by `dt` and compute the position to command.
    ///
    /// `current_position` is where the actor is now; it only matters in
    /// incremental space, where this step's interpolated delta is added to it
    /// so that outside displacement (moving platforms, knockback) is kept.
    /// The step that reaches the duration lands exactly on the curve's end.
    pub fn step(&mut self, config: &DashConfig, current_position: Vec3, dt: f32) -> DashStep {
        let duration = config.duration;
        self.elapsed = (self.elapsed + dt.max(0.0)).min(duration);
        if duration - self.elapsed <= COMPLETION_EPSILON {
            self.elapsed = duration;
        }

        let eased = config.curve.evaluate(self.progress(duration));
        let candidate = self.origin.lerp(self.destination, eased);

        let position = match config.space {
            DashSpace::Absolute => candidate,
            DashSpace::Incremental => current_position + (candidate - self.last_candidate),
        };
        self.last_candidate = candidate;

        let finished = self.elapsed >= duration;
        trace!(
            elapsed = self.elapsed,
            eased,
            finished,
            "Dash step to {}",
            position
        );

        DashStep { position, finished }
    }
}
