//! Stride Game - Movement abilities
//!
//! Provides the dash ability, the host services it drives, a pointer camera,
//! and an in-memory actor for headless simulation.

pub mod actor;
pub mod camera;
pub mod dash;
pub mod host;

pub use actor::{AnimatorValue, FeedbackEvent, SimActor};
pub use camera::PointerCamera;
pub use dash::{
    AnimatorParameters, Cooldown, CooldownConfig, CooldownPhase, CurveKey, DashAbility,
    DashAnimationSignals, DashConfig, DashConfigError, DashMode, DashRun, DashSpace, DashState,
    EasingCurve, StopReason,
};
pub use host::{CharacterCondition, DashHost, DashInput, MovementMode};
