use crate::core::{CAMERA_FOV_DEG, CAMERA_Z};
use glam::{Mat4, Vec3};

/// Fixed perspective camera looking down -Z at the origin.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            fov_y_deg: CAMERA_FOV_DEG,
        }
    }
}

impl Camera {
    #[inline]
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect.max(1e-3), 0.1, 100.0);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }
}
