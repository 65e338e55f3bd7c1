//! Services an actor exposes to its abilities
//!
//! Each trait covers one external concern. Abilities are generic over
//! [`DashHost`], which any type implementing all of them satisfies.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stride_core::Ray;

/// High-level movement mode, read by animation and other abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MovementMode {
    #[default]
    Idle,
    Walking,
    Running,
    Jumping,
    Falling,
    Dashing,
    Knockback,
}

/// Overall condition of an actor. Only `Normal` actors may start a dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CharacterCondition {
    #[default]
    Normal,
    ControlledMovement,
    Frozen,
    Paused,
    Stunned,
    Dead,
}

/// Commands the actor's position. Collision is the mover's business.
pub trait Mover {
    /// Current world position
    fn position(&self) -> Vec3;
    /// Occupy (or move towards) `point`
    fn move_position(&mut self, point: Vec3);
}

/// Attachment to moving platforms
pub trait PlatformAttachment {
    fn detach(&mut self);
}

/// Damage intake toggle
pub trait DamageControl {
    fn damage_enabled(&self) -> bool;
    fn disable_damage(&mut self);
    fn enable_damage(&mut self);
}

/// Orientation data of the actor
pub trait Heading {
    /// Forward vector of the actor's transform
    fn forward(&self) -> Vec3;
    /// Direction the visual model faces
    fn model_facing(&self) -> Vec3;
    /// Current movement heading seen by other systems
    fn facing(&self) -> Vec3;
    fn set_facing(&mut self, direction: Vec3);
}

/// Current movement mode store
pub trait MovementModeStore {
    fn mode(&self) -> MovementMode;
    fn set_mode(&mut self, mode: MovementMode);
}

/// Condition and grounding state
pub trait ConditionSource {
    fn condition(&self) -> CharacterCondition;
    fn is_airborne(&self) -> bool;
}

/// Free (player-driven) movement control
pub trait FreeMovement {
    fn free_movement(&self) -> bool;
    fn set_free_movement(&mut self, enabled: bool);
}

/// Feedback/fx playback
pub trait FeedbackPlayer {
    fn play(&mut self, at: Vec3);
    fn stop(&mut self);
}

/// Everything the dash needs from its actor
pub trait DashHost:
    Mover
    + PlatformAttachment
    + DamageControl
    + Heading
    + MovementModeStore
    + ConditionSource
    + FreeMovement
    + FeedbackPlayer
{
}

impl<T> DashHost for T where
    T: Mover
        + PlatformAttachment
        + DamageControl
        + Heading
        + MovementModeStore
        + ConditionSource
        + FreeMovement
        + FeedbackPlayer
{
}

/// Input polled by the ability framework for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct DashInput {
    /// Dash button went down this tick
    pub dash_pressed: bool,
    /// Primary movement axis (x maps to world X, y to world Z)
    pub primary_axis: Vec2,
    /// Secondary movement axis
    pub secondary_axis: Vec2,
    /// Ray from the camera through the pointer, if a pointer is present
    pub pointer_ray: Option<Ray>,
}

impl DashInput {
    /// Input with only the dash trigger set
    pub fn pressed() -> Self {
        Self {
            dash_pressed: true,
            ..Default::default()
        }
    }

    /// Lift a 2D stick axis onto the world ground plane
    pub fn axis_to_world(axis: Vec2) -> Vec3 {
        Vec3::new(axis.x, 0.0, axis.y)
    }
}
