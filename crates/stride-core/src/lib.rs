//! Stride Core - Core types and utilities for the Stride movement kit
//!
//! This crate provides the foundational types the movement abilities build on:
//! - Mathematical primitives (re-exported from glam)
//! - Transform component for actor positioning and heading
//! - Ray/plane geometry and angle helpers
//! - Fixed-timestep simulation clock

pub mod geometry;
pub mod time;
pub mod types;

pub use geometry::{normalize_or, rotate_around, signed_angle, Plane, Ray};
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use time::{ClockConfig, SimClock};
pub use types::{EntityId, Transform};
