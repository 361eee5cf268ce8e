//! GPU-compatible uniform types
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use scenegroup_math::{mat4, Mat4, Vec3};

/// Per-frame uniforms (bind group 0)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlobalUniforms {
    /// World -> view matrix
    pub view_matrix: [[f32; 4]; 4],
    /// View -> clip matrix
    pub projection_matrix: [[f32; 4]; 4],
    /// Ambient RGB in xyz, intensity in w
    pub ambient: [f32; 4],
    /// Point light position in xyz, intensity in w
    pub light_position: [f32; 4],
    /// Point light RGB in xyz, w unused
    pub light_color: [f32; 4],
}

impl Default for GlobalUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            ambient: [1.0, 1.0, 1.0, 0.5],
            light_position: [3.0, 3.0, 3.0, 20.0],
            light_color: [1.0, 1.0, 1.0, 0.0],
        }
    }
}

impl GlobalUniforms {
    /// Pack camera matrices and lights
    pub fn new(view: Mat4, projection: Mat4, lights: &SceneLights) -> Self {
        let a = lights.ambient_color;
        let p = lights.point_position;
        let c = lights.point_color;
        Self {
            view_matrix: view,
            projection_matrix: projection,
            ambient: [a[0], a[1], a[2], lights.ambient_intensity],
            light_position: [p.x, p.y, p.z, lights.point_intensity],
            light_color: [c[0], c[1], c[2], 0.0],
        }
    }
}

/// Per-object uniforms (bind group 1)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Local -> world matrix
    pub model_matrix: [[f32; 4]; 4],
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self { model_matrix: mat4::IDENTITY }
    }
}

/// Light setup: one ambient light and one point light with inverse-square falloff
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLights {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub point_color: [f32; 3],
    pub point_intensity: f32,
    pub point_position: Vec3,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.5,
            point_color: [1.0, 1.0, 1.0],
            point_intensity: 20.0,
            point_position: Vec3::new(3.0, 3.0, 3.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_uniforms_size() {
        // Two mat4 (128) + three vec4 (48)
        assert_eq!(std::mem::size_of::<GlobalUniforms>(), 176);
        assert_eq!(std::mem::size_of::<GlobalUniforms>() % 16, 0);
    }

    #[test]
    fn test_object_uniforms_size() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 64);
    }

    #[test]
    fn test_lights_pack_into_w() {
        let lights = SceneLights::default();
        let uniforms = GlobalUniforms::new(mat4::IDENTITY, mat4::IDENTITY, &lights);
        assert_eq!(uniforms.ambient[3], 0.5);
        assert_eq!(uniforms.light_position, [3.0, 3.0, 3.0, 20.0]);
    }
}
