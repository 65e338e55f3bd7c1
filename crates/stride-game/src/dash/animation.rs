//! Animation parameters published by the dash

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const DASHING_PARAMETER: &str = "Dashing";
pub const DASH_STARTED_PARAMETER: &str = "DashStarted";
pub const DASH_DIRECTION_X_PARAMETER: &str = "DashingDirectionX";
pub const DASH_DIRECTION_Y_PARAMETER: &str = "DashingDirectionY";
pub const DASH_DIRECTION_Z_PARAMETER: &str = "DashingDirectionZ";

/// Parameter sink of an external animation system
pub trait AnimatorParameters {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
}

/// Snapshot of the dash's animation-facing state for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashAnimationSignals {
    /// A dash is active
    pub is_dashing: bool,
    /// A dash started this tick (true for exactly one read)
    pub dash_started: bool,
    /// Unit direction of the current or most recent dash
    pub direction: Vec3,
}

impl DashAnimationSignals {
    /// Push the signals to an animator
    pub fn apply(&self, animator: &mut impl AnimatorParameters) {
        animator.set_bool(DASHING_PARAMETER, self.is_dashing);
        animator.set_bool(DASH_STARTED_PARAMETER, self.dash_started);
        animator.set_float(DASH_DIRECTION_X_PARAMETER, self.direction.x);
        animator.set_float(DASH_DIRECTION_Y_PARAMETER, self.direction.y);
        animator.set_float(DASH_DIRECTION_Z_PARAMETER, self.direction.z);
    }
}
