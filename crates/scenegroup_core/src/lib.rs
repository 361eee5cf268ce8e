//! Core types for scenegroup
//!
//! This crate provides the scene graph and the small amount of runtime logic
//! the demo has:
//!
//! - [`Transform3D`] - Position, Euler rotation, and scale
//! - [`SceneNode`] - Root, group, or mesh node with a cached world matrix
//! - [`SceneGraph`] - Arena of nodes with parent/child links
//! - [`NodeKey`] - Generational key to a node in the graph
//! - [`GroupingToggle`] - Moves members between a group and the root
//! - [`ToggleState`] - Flags written by the control panel
//! - [`UpdateLoop`] / [`FrameTicker`] - Per-frame rotation and rendering
//! - [`SceneRenderer`] - Boundary to whatever draws the scene

mod transform;
mod shapes;
mod node;
mod error;
mod graph;
mod grouping;
mod toggles;
mod frame_loop;
mod renderer;

pub use transform::Transform3D;
pub use shapes::ShapeDescriptor;
pub use node::{DirtyFlags, Material, NodeKind, SceneNode, Surface};
pub use error::SceneError;
pub use graph::{NodeKey, SceneGraph};
pub use grouping::{GroupingState, GroupingToggle, GroupingTransition};
pub use toggles::ToggleState;
pub use frame_loop::{CancellationToken, FrameTicker, Tick, UpdateLoop, ROTATION_STEP};
pub use renderer::{DrawItem, FrameRecorder, FrameSnapshot, SceneRenderer};

// Re-export commonly used math types for convenience
pub use scenegroup_math::{Mat4, Vec3};
