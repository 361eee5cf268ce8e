//! 3D Transform (position, rotation, scale)
//!
//! A Transform3D is the local placement of a scene node relative to its parent.

use scenegroup_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, Euler rotation, and per-axis scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position relative to the parent node
    pub position: Vec3,
    /// Rotation as Euler angles in radians, applied in XYZ order
    pub rotation: Vec3,
    /// Scale per axis
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform with position and uniform scale
    pub fn from_position_scale(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(scale),
        }
    }

    /// Local matrix: scale, then rotate, then translate
    pub fn to_matrix(&self) -> Mat4 {
        mat4::from_trs(self.position, self.rotation, self.scale)
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(&self.to_matrix(), p)
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Add Euler angle increments; angles accumulate without wrapping
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Set all three scale axes to the same value
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::splat(scale);
    }

    /// The uniform scale factor, or `None` if the axes differ
    pub fn uniform_scale(&self) -> Option<f32> {
        if self.scale.is_uniform() {
            Some(self.scale.x)
        } else {
            None
        }
    }
}
