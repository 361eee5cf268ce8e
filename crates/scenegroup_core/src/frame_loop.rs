//! Per-frame update loop
//!
//! Ticks come from a [`FrameTicker`]: a lazy, endless, non-restartable
//! iterator driven by whoever schedules frames (the window's redraw callback,
//! or a test). It ends for good once its [`CancellationToken`] is cancelled.
//!
//! Each tick, [`UpdateLoop::tick`]:
//! 1. Spins the group by the rotation step on all three axes if `rotate_group` is set
//! 2. Refreshes world matrices
//! 3. Renders, regardless of the rotation flag

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use scenegroup_math::Vec3;
use crate::{NodeKey, SceneError, SceneGraph, SceneRenderer, ToggleState};

/// Radians added to each rotation axis per tick
pub const ROTATION_STEP: f32 = 0.01;

/// Shared stop signal for a [`FrameTicker`]
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the ticker stop. Cannot be undone.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A single frame event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Zero-based frame number
    pub index: u64,
}

/// Endless source of ticks, stopped by its cancellation token
#[derive(Debug)]
pub struct FrameTicker {
    next_index: u64,
    token: CancellationToken,
    finished: bool,
}

impl FrameTicker {
    /// Create a ticker stopped by `token`
    pub fn new(token: CancellationToken) -> Self {
        Self {
            next_index: 0,
            token,
            finished: false,
        }
    }

    /// The token that stops this ticker
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Number of ticks produced so far
    pub fn ticks_issued(&self) -> u64 {
        self.next_index
    }
}

impl Iterator for FrameTicker {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.finished || self.token.is_cancelled() {
            self.finished = true;
            return None;
        }
        let tick = Tick { index: self.next_index };
        self.next_index += 1;
        Some(tick)
    }
}

impl FusedIterator for FrameTicker {}

/// Updates and renders the scene once per tick
#[derive(Clone, Debug)]
pub struct UpdateLoop {
    group: NodeKey,
    rotation_step: f32,
}

impl UpdateLoop {
    /// Create an update loop spinning `group` by [`ROTATION_STEP`]
    pub fn new(group: NodeKey) -> Self {
        Self {
            group,
            rotation_step: ROTATION_STEP,
        }
    }

    /// Override the per-tick rotation step (radians)
    pub fn with_rotation_step(mut self, step: f32) -> Self {
        self.rotation_step = step;
        self
    }

    #[inline]
    pub fn rotation_step(&self) -> f32 {
        self.rotation_step
    }

    /// Apply the rotation for one tick. Returns whether the group moved.
    pub fn advance(&self, scene: &mut SceneGraph, toggles: &ToggleState) -> Result<bool, SceneError> {
        if !toggles.rotate_group {
            return Ok(false);
        }
        scene.rotate(self.group, Vec3::splat(self.rotation_step))?;
        Ok(true)
    }

    /// Run one full tick: rotate, refresh world matrices, render
    pub fn tick<R: SceneRenderer>(
        &self,
        tick: Tick,
        scene: &mut SceneGraph,
        toggles: &ToggleState,
        renderer: &mut R,
        camera: &R::Camera,
    ) -> Result<(), R::Error> {
        if let Err(e) = self.advance(scene, toggles) {
            // The group key comes from scene construction and is never removed
            log::error!("Tick {}: rotation skipped: {}", tick.index, e);
        }
        scene.update_world_matrices();
        renderer.render(scene, camera)
    }

    /// Drive ticks from `ticker` until it is cancelled or the renderer fails.
    ///
    /// Returns the number of ticks processed.
    pub fn run<R: SceneRenderer>(
        &self,
        ticker: FrameTicker,
        scene: &mut SceneGraph,
        toggles: &ToggleState,
        renderer: &mut R,
        camera: &R::Camera,
    ) -> Result<u64, R::Error> {
        let mut processed = 0;
        for tick in ticker {
            self.tick(tick, scene, toggles, renderer, camera)?;
            processed += 1;
        }
        log::debug!("Update loop stopped after {} ticks", processed);
        Ok(processed)
    }
}
