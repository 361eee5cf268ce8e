//! Rendering pipeline components
//!
//! A single forward pipeline draws every mesh with Lambert shading.

pub mod types;
pub mod mesh_pipeline;

pub use types::{GlobalUniforms, ObjectUniforms, SceneLights};
pub use mesh_pipeline::MeshPipeline;
