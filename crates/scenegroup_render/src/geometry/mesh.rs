//! Triangle mesh generation for shape descriptors
//!
//! Meshes are built in local space, centered at the origin, with
//! counter-clockwise front faces. Each vertex carries the colour of the
//! material slot it belongs to, so a whole mesh draws in one call.

use std::f32::consts::PI;
use bytemuck::{Pod, Zeroable};
use scenegroup_core::{ShapeDescriptor, Surface};
use scenegroup_math::Vec3;

/// A lit, coloured mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Local-space position
    pub position: [f32; 3],
    /// Unit surface normal
    pub normal: [f32; 3],
    /// RGBA color of the material slot
    pub color: [f32; 4],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Build the mesh for a shape, coloured from `surface`
    pub fn from_shape(shape: &ShapeDescriptor, surface: &Surface) -> Self {
        match *shape {
            ShapeDescriptor::Box { width, height, depth } => {
                box_mesh(Vec3::new(width, height, depth), surface)
            }
            ShapeDescriptor::Sphere { radius, width_segments, height_segments } => {
                sphere_mesh(radius, width_segments, height_segments, surface)
            }
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Face frames in material slot order: +X, -X, +Y, -Y, +Z, -Z.
///
/// Each entry is (normal, u, v) with `u × v = normal`.
const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
    (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
];

/// Axis-aligned box with four vertices per face (24 vertices, 12 triangles)
pub fn box_mesh(size: Vec3, surface: &Surface) -> MeshData {
    let half = size * 0.5;
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    for (slot, &(normal, u, v)) in BOX_FACES.iter().enumerate() {
        let color = surface.material_for_slot(slot).base_color;
        let base = mesh.vertices.len() as u32;

        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (normal + u * su + v * sv).component_mul(half);
            mesh.vertices.push(MeshVertex::new(corner, normal, color));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// Upper bound on either sphere segment count
pub const MAX_SPHERE_SEGMENTS: u32 = 1024;

/// UV sphere with `(w + 1) × (h + 1)` vertices.
///
/// Segment counts are clamped to `[3, MAX]` around and `[2, MAX]` top to
/// bottom. The seam and pole rows are duplicated; degenerate pole triangles
/// are skipped.
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32, surface: &Surface) -> MeshData {
    let w = width_segments.clamp(3, MAX_SPHERE_SEGMENTS);
    let h = height_segments.clamp(2, MAX_SPHERE_SEGMENTS);
    let color = surface.material_for_slot(0).base_color;

    let mut vertices = Vec::with_capacity((w as usize + 1) * (h as usize + 1));
    for iy in 0..=h {
        let theta = iy as f32 / h as f32 * PI;
        for ix in 0..=w {
            let phi = ix as f32 / w as f32 * 2.0 * PI;
            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            vertices.push(MeshVertex::new(normal * radius, normal, color));
        }
    }

    let row = w + 1;
    let mut indices = Vec::with_capacity(6 * w as usize * (h as usize - 1));
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}
