//! Dash ability module
//!
//! A timed, eased displacement that overrides normal movement control.

mod ability;
pub mod animation;
mod config;
mod cooldown;
pub mod direction;
mod easing;
mod motion;

pub use ability::{DashAbility, DashState, StopReason};
pub use animation::{AnimatorParameters, DashAnimationSignals};
pub use config::{CooldownConfig, DashConfig, DashConfigError, DashMode, DashSpace};
pub use cooldown::{Cooldown, CooldownPhase};
pub use direction::{DirectionContext, DirectionResolver, Resolution};
pub use easing::{CurveKey, EasingCurve};
pub use motion::{DashRun, DashStep};
