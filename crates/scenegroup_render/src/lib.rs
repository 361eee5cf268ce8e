//! wgpu renderer for scenegroup
//!
//! This crate turns a [`SceneGraph`] into draw calls.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::PerspectiveCamera`] - Perspective camera aimed once with `look_at`
//! - [`geometry`] - CPU triangle meshes for box and sphere descriptors
//! - [`pipeline::MeshPipeline`] - Lambert shading with ambient + point light
//! - [`renderable::RenderableScene`] - Per-node GPU buffers kept in sync with the graph
//! - [`overlay::OverlayRenderer`] - egui pass drawn over the finished scene

pub mod context;
pub mod camera;
pub mod geometry;
pub mod pipeline;
pub mod renderable;
pub mod overlay;

// Re-export core types for convenience
pub use scenegroup_core::{Material, NodeKey, SceneGraph, ShapeDescriptor, Surface};
pub use scenegroup_math::{Mat4, Vec3};

pub use overlay::{OverlayFrame, OverlayRenderer};
pub use renderable::{GpuMesh, RenderableScene};
