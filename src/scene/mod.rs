//! Scene construction
//!
//! Builds the demo's cube, sphere and group from configuration.

mod scene_builder;

pub use scene_builder::{create_object, DemoScene, SceneBuilder};
