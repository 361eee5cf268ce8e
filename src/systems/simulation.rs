//! Frame simulation system
//!
//! Owns the frame ticker and the update loop. Each call to
//! [`SimulationSystem::step`] pulls one tick and runs it against the demo state.

use scenegroup_core::{CancellationToken, FrameTicker, SceneRenderer, UpdateLoop};
use scenegroup_render::camera::PerspectiveCamera;

use crate::controls::DemoState;

/// Drives the per-frame update from the window's redraw events
pub struct SimulationSystem {
    ticker: FrameTicker,
    update: UpdateLoop,
    log_interval: u64,
}

impl SimulationSystem {
    /// Create a simulation spinning `state`'s group by `rotation_step` per frame
    pub fn new(state: &DemoState, rotation_step: f32, token: CancellationToken) -> Self {
        Self {
            ticker: FrameTicker::new(token),
            update: UpdateLoop::new(state.scene.group).with_rotation_step(rotation_step),
            log_interval: 0,
        }
    }

    /// Log a frame summary every `interval` frames (0 disables it)
    pub fn with_log_interval(mut self, interval: u64) -> Self {
        self.log_interval = interval;
        self
    }

    /// Run one frame
    ///
    /// Returns `Ok(false)` once the ticker has been cancelled.
    pub fn step<R>(&mut self, state: &mut DemoState, renderer: &mut R) -> Result<bool, R::Error>
    where
        R: SceneRenderer<Camera = PerspectiveCamera>,
    {
        let Some(tick) = self.ticker.next() else {
            return Ok(false);
        };

        self.update.tick(tick, &mut state.scene.graph, &state.toggles, renderer, &state.camera)?;

        if self.log_interval > 0 && tick.index % self.log_interval == 0 {
            let rotation = state
                .scene
                .graph
                .transform(state.scene.group)
                .map(|t| t.rotation)
                .unwrap_or_default();
            log::debug!(
                "Frame {}: {}, group rotation ({:.2}, {:.2}, {:.2})",
                tick.index,
                state.status(),
                rotation.x,
                rotation.y,
                rotation.z
            );
        }
        Ok(true)
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.ticker.ticks_issued()
    }

    /// The token that stops this simulation
    pub fn token(&self) -> &CancellationToken {
        self.ticker.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use scenegroup_core::{FrameRecorder, Vec3, ROTATION_STEP};

    fn setup() -> (DemoState, SimulationSystem) {
        let state = DemoState::from_config(&AppConfig::default()).unwrap();
        let simulation = SimulationSystem::new(&state, ROTATION_STEP, CancellationToken::new());
        (state, simulation)
    }

    #[test]
    fn test_step_renders_each_frame() {
        let (mut state, mut simulation) = setup();
        let mut recorder = FrameRecorder::new();

        for _ in 0..3 {
            assert!(simulation.step(&mut state, &mut recorder).unwrap());
        }
        assert_eq!(recorder.frame_count(), 3);
        assert_eq!(simulation.frames(), 3);
    }

    #[test]
    fn test_step_rotates_when_enabled() {
        let (mut state, mut simulation) = setup();
        let mut recorder = FrameRecorder::new();
        state.toggles.rotate_group = true;

        let mut expected = 0.0f32;
        for _ in 0..20 {
            simulation.step(&mut state, &mut recorder).unwrap();
            expected += ROTATION_STEP;
        }

        let rotation = state.scene.graph.transform(state.scene.group).unwrap().rotation;
        assert_eq!(rotation, Vec3::splat(expected));
    }

    #[test]
    fn test_cancelled_step_stops() {
        let (mut state, mut simulation) = setup();
        let mut recorder = FrameRecorder::new();

        simulation.token().cancel();
        assert!(!simulation.step(&mut state, &mut recorder).unwrap());
        assert_eq!(recorder.frame_count(), 0);
    }
}
