//! Perspective camera
//!
//! The camera stores a position and an orientation. [`PerspectiveCamera::look_at`]
//! sets the orientation once; moving the camera afterwards does not re-aim it.

use scenegroup_math::{mat4, Mat4, Vec3};

/// A perspective camera in world space
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// World-space position
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    orientation: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a camera at the origin looking down -Z
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            fov_y_degrees,
            near,
            far,
            orientation: mat4::IDENTITY,
        }
    }

    /// Builder-style position setter
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Point the camera at `target` from its current position, with +Y up
    pub fn look_at(&mut self, target: Vec3) {
        self.orientation = mat4::look_at_rotation(self.position, target, Vec3::Y);
    }

    /// Rotation part of the camera's world transform
    #[inline]
    pub fn orientation(&self) -> &Mat4 {
        &self.orientation
    }

    /// Direction the camera faces in world space
    pub fn forward(&self) -> Vec3 {
        let z = self.orientation[2];
        Vec3::new(-z[0], -z[1], -z[2])
    }

    /// Camera world matrix (translation × orientation)
    pub fn world_matrix(&self) -> Mat4 {
        mat4::mul(mat4::from_translation(self.position), self.orientation)
    }

    /// World -> view transform
    pub fn view_matrix(&self) -> Mat4 {
        mat4::rigid_inverse(&self.world_matrix())
    }

    /// View -> clip transform for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = PerspectiveCamera::default();
        assert!(approx_eq(camera.forward(), Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(camera.fov_y_degrees, 75.0);
    }

    #[test]
    fn test_look_at_origin() {
        let mut camera = PerspectiveCamera::default().with_position(Vec3::new(0.0, 5.0, 5.0));
        camera.look_at(Vec3::ZERO);

        let expected = Vec3::new(0.0, -1.0, -1.0).normalized();
        assert!(approx_eq(camera.forward(), expected));

        // The target lands on the view axis
        let view = camera.view_matrix();
        let p = mat4::transform_point(&view, Vec3::ZERO);
        assert!(p.x.abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);
        assert!((p.z + 50.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_moving_does_not_reaim() {
        let mut camera = PerspectiveCamera::default().with_position(Vec3::new(0.0, 5.0, 5.0));
        camera.look_at(Vec3::ZERO);
        let forward = camera.forward();

        camera.position.x = 3.0;
        assert!(approx_eq(camera.forward(), forward));
    }

    #[test]
    fn test_view_inverts_world() {
        let mut camera = PerspectiveCamera::default().with_position(Vec3::new(1.0, 2.0, 3.0));
        camera.look_at(Vec3::new(-1.0, 0.0, 0.0));

        let product = mat4::mul(camera.view_matrix(), camera.world_matrix());
        for col in 0..4 {
            for row in 0..4 {
                assert!((product[col][row] - mat4::IDENTITY[col][row]).abs() < 1e-4);
            }
        }
    }
}
