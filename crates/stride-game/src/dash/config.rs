//! Dash configuration and validation

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::easing::EasingCurve;

/// How the dash destination is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DashMode {
    /// Always along the configured direction, regardless of facing
    #[default]
    Fixed,
    /// Along the primary movement axis (left stick / WASD)
    PrimaryAxis,
    /// Along the secondary movement axis (right stick)
    SecondaryAxis,
    /// Towards the point the pointer hovers on the actor's ground plane
    PointerTarget,
    /// Along the direction the actor's model is facing
    FacingModel,
    /// Along a direction supplied by a script before the dash starts
    External,
}

/// How the interpolated dash position is handed to the mover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DashSpace {
    /// Command the interpolated point directly
    #[default]
    Absolute,
    /// Command the actor's current position plus this tick's interpolated delta
    Incremental,
}

/// Recharge timing for the dash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Seconds from use until the dash is ready again
    pub recharge_time: f32,
    /// Leading part of the recharge shown as draining (for UI bars)
    pub consumption_duration: f32,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            recharge_time: 1.0,
            consumption_duration: 0.2,
        }
    }
}

/// Dash configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Direction selection mode
    pub mode: DashMode,
    /// Position application space
    pub space: DashSpace,
    /// Base direction (normalized on use; zero falls back to +Z)
    pub direction: Vec3,
    /// Distance covered in meters
    pub distance: f32,
    /// Seconds the dash lasts
    pub duration: f32,
    /// Whether the dash may start while airborne
    pub allow_airborne: bool,
    /// Whether damage intake is suspended while dashing
    pub invincible: bool,
    /// Progress over normalized time
    pub curve: EasingCurve,
    /// Recharge timing
    pub cooldown: CooldownConfig,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            mode: DashMode::Fixed,
            space: DashSpace::Absolute,
            direction: Vec3::Z,
            distance: 10.0,
            duration: 0.2,
            allow_airborne: true,
            invincible: true,
            curve: EasingCurve::Linear,
            cooldown: CooldownConfig::default(),
        }
    }
}

impl DashConfig {
    /// Check that the config describes a usable dash
    pub fn validate(&self) -> Result<(), DashConfigError> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(DashConfigError::InvalidDistance(self.distance));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(DashConfigError::InvalidDuration(self.duration));
        }
        if !self.direction.is_finite() {
            return Err(DashConfigError::InvalidDirection(self.direction));
        }
        if !self.curve.is_well_formed() {
            return Err(DashConfigError::MalformedCurve);
        }

        let cooldown = &self.cooldown;
        if !cooldown.recharge_time.is_finite() || cooldown.recharge_time < 0.0 {
            return Err(DashConfigError::InvalidRecharge(cooldown.recharge_time));
        }
        if !cooldown.consumption_duration.is_finite()
            || cooldown.consumption_duration < 0.0
            || cooldown.consumption_duration > cooldown.recharge_time
        {
            return Err(DashConfigError::InvalidConsumption {
                consumption: cooldown.consumption_duration,
                recharge: cooldown.recharge_time,
            });
        }
        Ok(())
    }
}

/// Errors found when validating a dash configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashConfigError {
    #[error("dash distance must be finite and non-negative, got {0}")]
    InvalidDistance(f32),

    #[error("dash duration must be finite and positive, got {0}")]
    InvalidDuration(f32),

    #[error("dash direction must be finite, got {0}")]
    InvalidDirection(Vec3),

    #[error("easing curve needs at least two finite keys sorted by time")]
    MalformedCurve,

    #[error("cooldown recharge time must be finite and non-negative, got {0}")]
    InvalidRecharge(f32),

    #[error("cooldown consumption {consumption} must lie within recharge time {recharge}")]
    InvalidConsumption { consumption: f32, recharge: f32 },
}
