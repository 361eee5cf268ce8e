//! Shape descriptors
//!
//! A ShapeDescriptor stores the construction parameters of a mesh. The core
//! crate treats it as opaque data; the renderer turns it into triangles.
//!
//! All shapes are described in **local space**, centered at the origin.
//! The node transform positions them in the scene.

use serde::{Serialize, Deserialize};

/// Serializable shape descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeDescriptor {
    /// An axis-aligned box centered at the origin
    Box {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
    /// A UV sphere centered at the origin
    Sphere {
        radius: f32,
        /// Segments around the equator
        width_segments: u32,
        /// Segments from pole to pole
        height_segments: u32,
    },
}

impl ShapeDescriptor {
    /// A cube with the given side length
    pub fn cube(size: f32) -> Self {
        ShapeDescriptor::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    /// A sphere with the given radius and segment counts
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        ShapeDescriptor::Sphere {
            radius,
            // Fewer segments than this cannot close the surface
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Number of material slots the shape exposes (one per box face)
    pub fn material_slots(&self) -> usize {
        match self {
            ShapeDescriptor::Box { .. } => 6,
            ShapeDescriptor::Sphere { .. } => 1,
        }
    }

    /// Human-readable kind name
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeDescriptor::Box { .. } => "box",
            ShapeDescriptor::Sphere { .. } => "sphere",
        }
    }
}
