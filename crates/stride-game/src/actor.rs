//! In-memory actor implementing every host service
//!
//! Used by the headless driver and by tests. Movement is applied directly;
//! there is no collision.

use std::collections::HashMap;

use glam::Vec3;
use stride_core::{EntityId, Transform};

use crate::dash::AnimatorParameters;
use crate::host::{
    CharacterCondition, ConditionSource, DamageControl, FeedbackPlayer, FreeMovement, Heading,
    MovementMode, MovementModeStore, Mover, PlatformAttachment,
};

/// Feedback calls recorded by a [`SimActor`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackEvent {
    Played(Vec3),
    Stopped,
}

/// Value of an animator parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorValue {
    Bool(bool),
    Float(f32),
}

/// A simulated actor
#[derive(Debug, Clone)]
pub struct SimActor {
    pub id: EntityId,
    pub transform: Transform,
    pub model_facing: Vec3,
    pub facing: Vec3,
    pub condition: CharacterCondition,
    pub airborne: bool,
    /// Moving platform the actor is riding
    pub platform: Option<EntityId>,
    pub damage_enabled: bool,
    pub free_movement: bool,
    pub mode: MovementMode,
    pub feedback: Vec<FeedbackEvent>,
    pub animator: HashMap<String, AnimatorValue>,
}

impl SimActor {
    /// Create an actor standing at `position`, facing +Z
    pub fn new(position: Vec3) -> Self {
        let transform = Transform::from_position(position);
        Self {
            id: EntityId::new(),
            model_facing: transform.forward(),
            facing: transform.forward(),
            transform,
            condition: CharacterCondition::Normal,
            airborne: false,
            platform: None,
            damage_enabled: true,
            free_movement: true,
            mode: MovementMode::Idle,
            feedback: Vec::new(),
            animator: HashMap::new(),
        }
    }

    /// Turn the actor (transform and model) to face `direction`
    pub fn turn_to(&mut self, direction: Vec3) {
        self.transform.face(direction);
        self.model_facing = self.transform.forward();
        self.facing = self.model_facing;
    }

    /// Displace the actor from outside the dash (platforms, knockback)
    pub fn push(&mut self, offset: Vec3) {
        self.transform.translate(offset);
    }

    /// Read a boolean animator parameter
    pub fn animator_bool(&self, name: &str) -> Option<bool> {
        match self.animator.get(name) {
            Some(AnimatorValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Read a float animator parameter
    pub fn animator_float(&self, name: &str) -> Option<f32> {
        match self.animator.get(name) {
            Some(AnimatorValue::Float(value)) => Some(*value),
            _ => None,
        }
    }
}

impl Default for SimActor {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Mover for SimActor {
    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn move_position(&mut self, point: Vec3) {
        self.transform.position = point;
    }
}

impl PlatformAttachment for SimActor {
    fn detach(&mut self) {
        self.platform = None;
    }
}

impl DamageControl for SimActor {
    fn damage_enabled(&self) -> bool {
        self.damage_enabled
    }

    fn disable_damage(&mut self) {
        self.damage_enabled = false;
    }

    fn enable_damage(&mut self) {
        self.damage_enabled = true;
    }
}

impl Heading for SimActor {
    fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    fn model_facing(&self) -> Vec3 {
        self.model_facing
    }

    fn facing(&self) -> Vec3 {
        self.facing
    }

    fn set_facing(&mut self, direction: Vec3) {
        self.facing = direction;
    }
}

impl MovementModeStore for SimActor {
    fn mode(&self) -> MovementMode {
        self.mode
    }

    fn set_mode(&mut self, mode: MovementMode) {
        self.mode = mode;
    }
}

impl ConditionSource for SimActor {
    fn condition(&self) -> CharacterCondition {
        self.condition
    }

    fn is_airborne(&self) -> bool {
        self.airborne
    }
}

impl FreeMovement for SimActor {
    fn free_movement(&self) -> bool {
        self.free_movement
    }

    fn set_free_movement(&mut self, enabled: bool) {
        self.free_movement = enabled;
    }
}

impl FeedbackPlayer for SimActor {
    fn play(&mut self, at: Vec3) {
        self.feedback.push(FeedbackEvent::Played(at));
    }

    fn stop(&mut self) {
        self.feedback.push(FeedbackEvent::Stopped);
    }
}

impl AnimatorParameters for SimActor {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.animator.insert(name.to_string(), AnimatorValue::Bool(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.animator.insert(name.to_string(), AnimatorValue::Float(value));
    }
}
