//! Rendering boundary
//!
//! The update loop hands the scene to a [`SceneRenderer`] once per tick. The
//! wgpu renderer lives in `scenegroup_render`; [`FrameRecorder`] is a headless
//! implementation that records what would have been drawn.

use std::convert::Infallible;
use std::marker::PhantomData;
use scenegroup_math::Mat4;
use crate::frame_loop::CancellationToken;
use crate::{NodeKey, SceneGraph};

/// Something that can draw a scene graph from a camera
pub trait SceneRenderer {
    /// Camera type the renderer understands
    type Camera;
    /// Error produced by a failed frame
    type Error;

    /// Draw the attached part of `scene`. World matrices are up to date.
    fn render(&mut self, scene: &SceneGraph, camera: &Self::Camera) -> Result<(), Self::Error>;
}

/// One drawable as seen by a renderer
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub node: NodeKey,
    pub name: String,
    pub world_matrix: Mat4,
}

/// Everything drawn in one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub items: Vec<DrawItem>,
}

impl FrameSnapshot {
    /// Capture the drawables of a scene
    pub fn capture(scene: &SceneGraph) -> Self {
        let items = scene
            .drawables()
            .map(|(node, scene_node)| DrawItem {
                node,
                name: scene_node.name.clone(),
                world_matrix: *scene_node.world_matrix(),
            })
            .collect();
        Self { items }
    }

    /// Find a drawn item by node name
    pub fn item(&self, name: &str) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// Headless renderer that records a snapshot per frame
///
/// Optionally cancels a token once a frame limit is reached, which lets a
/// test drive [`UpdateLoop::run`](crate::UpdateLoop::run) to completion.
pub struct FrameRecorder<C> {
    frames: Vec<FrameSnapshot>,
    limit: Option<(usize, CancellationToken)>,
    _camera: PhantomData<fn(&C)>,
}

impl<C> Default for FrameRecorder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FrameRecorder<C> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            limit: None,
            _camera: PhantomData,
        }
    }

    /// Cancel `token` after `frames` frames have been recorded
    pub fn with_limit(mut self, frames: usize, token: CancellationToken) -> Self {
        self.limit = Some((frames, token));
        self
    }

    /// All recorded frames
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    /// The most recent frame
    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.frames.last()
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl<C> SceneRenderer for FrameRecorder<C> {
    type Camera = C;
    type Error = Infallible;

    fn render(&mut self, scene: &SceneGraph, _camera: &C) -> Result<(), Infallible> {
        self.frames.push(FrameSnapshot::capture(scene));
        if let Some((limit, token)) = &self.limit {
            if self.frames.len() >= *limit {
                token.cancel();
            }
        }
        Ok(())
    }
}
