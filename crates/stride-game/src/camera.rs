//! Pointer camera: turns a screen position into a world ray

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};
use stride_core::Ray;

/// A perspective camera used to aim pointer-targeted abilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerCamera {
    /// World position
    pub position: Vec3,
    /// Yaw rotation in radians about +Y (0 looks along +Z)
    pub yaw: f32,
    /// Pitch rotation in radians (negative looks down)
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PointerCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, -10.0),
            yaw: 0.0,
            pitch: -std::f32::consts::FRAC_PI_4,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PointerCamera {
    /// Camera at `position` aimed at `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            ..Default::default()
        };
        camera.look_at(target);
        camera
    }

    /// Aim at a world point
    pub fn look_at(&mut self, target: Vec3) {
        let offset = target - self.position;
        let horizontal = Vec2::new(offset.x, offset.z).length();
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = offset.y.atan2(horizontal);
    }

    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.pitch.sin(),
            self.yaw.cos() * cos_pitch,
        )
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // Looking straight up or down, fall back to +Z as the up hint
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_to_rh(self.position, forward, up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect_ratio, self.near, self.far)
    }

    /// World ray through a screen position in pixels (origin top-left)
    pub fn screen_ray(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let viewport = viewport.max(Vec2::ONE);
        let ndc = Vec2::new(
            2.0 * screen.x / viewport.x - 1.0,
            1.0 - 2.0 * screen.y / viewport.y,
        );

        let view_projection = self.projection_matrix(viewport.x / viewport.y) * self.view_matrix();
        let inverse = view_projection.inverse();

        let near = inverse * ndc.extend(0.0).extend(1.0);
        let far = inverse * ndc.extend(1.0).extend(1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;

        Ray::new(self.position, far - near)
    }
}
