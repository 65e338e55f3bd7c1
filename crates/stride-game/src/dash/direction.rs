//! Dash destination resolution for each direction mode

use glam::Vec3;
use stride_core::{normalize_or, rotate_around, signed_angle, Plane, Ray};
use tracing::warn;

use super::config::{DashConfig, DashMode};

/// Direction used whenever a reference or base vector is degenerate
pub const FALLBACK_DIRECTION: Vec3 = Vec3::Z;

/// World and input state sampled at dash start
#[derive(Debug, Clone, Copy)]
pub struct DirectionContext {
    /// Actor position
    pub position: Vec3,
    /// Actor transform forward
    pub forward: Vec3,
    /// Direction the actor's model faces
    pub model_facing: Vec3,
    /// Primary movement axis on the ground plane
    pub primary_axis: Vec3,
    /// Secondary movement axis on the ground plane
    pub secondary_axis: Vec3,
    /// Camera ray through the pointer
    pub pointer_ray: Option<Ray>,
    /// Script-supplied direction for `External` mode
    pub external_direction: Vec3,
}

impl DirectionContext {
    /// Context for an actor at `position` facing `forward`, with no input
    pub fn at(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward,
            model_facing: forward,
            primary_axis: Vec3::ZERO,
            secondary_axis: Vec3::ZERO,
            pointer_ray: None,
            external_direction: Vec3::ZERO,
        }
    }
}

/// Outcome of resolving a dash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// World-space dash destination
    pub destination: Vec3,
    /// New heading to publish, for modes that steer the actor
    pub facing: Option<Vec3>,
}

/// Computes dash destinations.
///
/// Remembers the last pointer reference so a pointer ray that misses the
/// ground plane reuses the previous heading.
#[derive(Debug, Clone, Default)]
pub struct DirectionResolver {
    pointer_reference: Vec3,
}

impl DirectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reference vector derived from the pointer (zero before the first hit)
    pub fn pointer_reference(&self) -> Vec3 {
        self.pointer_reference
    }

    /// Resolve the destination for `config.mode` from `ctx`
    pub fn resolve(&mut self, config: &DashConfig, ctx: &DirectionContext) -> Resolution {
        match config.mode {
            DashMode::Fixed => Resolution {
                destination: straight(ctx.position, config.direction, config.distance),
                facing: None,
            },
            DashMode::FacingModel => Resolution {
                destination: straight(ctx.position, ctx.model_facing, config.distance),
                facing: None,
            },
            DashMode::External => Resolution {
                destination: straight(ctx.position, ctx.external_direction, config.distance),
                facing: None,
            },
            DashMode::PrimaryAxis => steered(config, ctx, ctx.primary_axis),
            DashMode::SecondaryAxis => steered(config, ctx, ctx.secondary_axis),
            DashMode::PointerTarget => {
                self.update_pointer_reference(ctx);
                steered(config, ctx, self.pointer_reference)
            }
        }
    }

    fn update_pointer_reference(&mut self, ctx: &DirectionContext) {
        let Some(ray) = ctx.pointer_ray else {
            return;
        };
        match ray.intersect_plane(&Plane::horizontal(ctx.position)) {
            Some(hit) => {
                let offset = hit - ctx.position;
                self.pointer_reference = Vec3::new(offset.x, 0.0, offset.z);
            }
            None => {
                warn!(
                    "Pointer ray misses the ground plane, keeping previous dash reference {}",
                    self.pointer_reference
                );
            }
        }
    }
}

/// `position + normalize(direction) * distance`
fn straight(position: Vec3, direction: Vec3, distance: f32) -> Vec3 {
    position + normalize_or(direction, FALLBACK_DIRECTION) * distance
}

/// Rotate the straight candidate about the actor so the angle between forward
/// and the candidate matches the angle between forward and `reference`
fn steered(config: &DashConfig, ctx: &DirectionContext, reference: Vec3) -> Resolution {
    let reference = normalize_or(reference, FALLBACK_DIRECTION);
    let angle = signed_angle(ctx.forward, reference, Vec3::Y);
    let candidate = straight(ctx.position, config.direction, config.distance);
    let destination = rotate_around(candidate, ctx.position, Vec3::Y, angle);

    Resolution {
        destination,
        facing: Some(normalize_or(destination - ctx.position, reference)),
    }
}
