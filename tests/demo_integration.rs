//! End-to-end tests for the demo without a window
//!
//! Controls are edited through the panel API the egui view calls, and frames
//! go to a headless recorder instead of the GPU.

use scenegroup::config::AppConfig;
use scenegroup::controls::{build_control_panel, DemoPanel, DemoState};
use scenegroup::systems::SimulationSystem;
use scenegroup_core::{CancellationToken, FrameRecorder, Vec3};
use scenegroup_render::camera::PerspectiveCamera;

struct Harness {
    state: DemoState,
    panel: DemoPanel,
    simulation: SimulationSystem,
    recorder: FrameRecorder<PerspectiveCamera>,
}

impl Harness {
    fn new() -> Self {
        let config = AppConfig::default();
        let state = DemoState::from_config(&config).unwrap();
        let panel = build_control_panel(&state, &config.controls).unwrap();
        let simulation =
            SimulationSystem::new(&state, config.animation.rotation_step, CancellationToken::new());
        Self {
            state,
            panel,
            simulation,
            recorder: FrameRecorder::new(),
        }
    }

    fn set_flag(&mut self, path: &str, label: &str, value: bool) {
        let id = self.panel.find(path, label).unwrap();
        self.panel.set_boolean(&mut self.state, id, value).unwrap();
    }

    fn set_number(&mut self, path: &str, label: &str, value: f32) -> f32 {
        let id = self.panel.find(path, label).unwrap();
        self.panel.set_numeric(&mut self.state, id, value).unwrap()
    }

    fn run_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            assert!(self.simulation.step(&mut self.state, &mut self.recorder).unwrap());
        }
    }

    fn drawn_position(&self, name: &str) -> Vec3 {
        let m = self.recorder.last_frame().unwrap().item(name).unwrap().world_matrix;
        Vec3::new(m[3][0], m[3][1], m[3][2])
    }
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn test_first_frame_draws_both_objects_in_place() {
    let mut h = Harness::new();
    h.run_frames(1);

    let frame = h.recorder.last_frame().unwrap();
    assert_eq!(frame.items.len(), 2);
    assert!(approx(h.drawn_position("cube"), Vec3::new(-1.5, 0.0, 0.0)));
    assert!(approx(h.drawn_position("sphere"), Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn test_ungroup_from_panel_reparents_to_root() {
    let mut h = Harness::new();
    h.set_flag("", "Group Objects", false);

    assert!(!h.state.toggles.group_objects);
    let root = h.state.scene.graph.root();
    assert_eq!(
        h.state.scene.graph.children_of(root),
        &[h.state.scene.cube, h.state.scene.sphere]
    );
    assert!(h.state.scene.graph.children_of(h.state.scene.group).is_empty());

    h.set_flag("", "Group Objects", true);
    assert!(h.state.scene.is_grouped());
    assert_eq!(h.state.scene.graph.children_of(root), &[h.state.scene.group]);
}

#[test]
fn test_rotation_accumulates_while_enabled() {
    let mut h = Harness::new();
    h.set_flag("", "Rotate Group", true);
    assert!(h.state.toggles.rotate_group);

    h.run_frames(50);
    let rotation = h.state.scene.graph.transform(h.state.scene.group).unwrap().rotation;
    assert!(approx(rotation, Vec3::splat(0.5)));

    // Members orbit the group origin without changing distance
    let cube = h.drawn_position("cube");
    assert!((cube.length() - 1.5).abs() < 1e-4);
    assert!(!approx(cube, Vec3::new(-1.5, 0.0, 0.0)));

    // Turning it off freezes the rotation
    h.set_flag("", "Rotate Group", false);
    h.run_frames(10);
    let frozen = h.state.scene.graph.transform(h.state.scene.group).unwrap().rotation;
    assert_eq!(frozen, rotation);
}

#[test]
fn test_ungrouped_objects_ignore_group_rotation() {
    let mut h = Harness::new();
    h.set_flag("", "Group Objects", false);
    h.state.toggles.rotate_group = true;

    h.run_frames(30);
    assert!(approx(h.drawn_position("cube"), Vec3::new(-1.5, 0.0, 0.0)));
    assert!(approx(h.drawn_position("sphere"), Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn test_group_scale_slider_scales_members() {
    let mut h = Harness::new();
    let id = h.panel.find("Group Attributes/Scale", "Uniform Scale").unwrap();

    assert_eq!(h.panel.set_numeric(&mut h.state, id, 2.0).unwrap(), 2.0);
    h.run_frames(1);
    assert!(approx(h.drawn_position("cube"), Vec3::new(-3.0, 0.0, 0.0)));
    assert!(approx(h.drawn_position("sphere"), Vec3::new(4.0, 0.0, 0.0)));

    // Out of range values clamp to the slider bounds
    assert_eq!(h.panel.set_numeric(&mut h.state, id, 50.0).unwrap(), 5.0);
    assert_eq!(h.panel.set_numeric(&mut h.state, id, 0.0).unwrap(), 0.1);
}

#[test]
fn test_camera_slider_moves_camera() {
    let mut h = Harness::new();
    assert_eq!(h.set_number("Camera Position", "X Position", 2.0), 2.0);
    assert!((h.state.camera.position.x - 2.0).abs() < 1e-4);
    assert_eq!(h.state.camera.position.y, 5.0);

    // Slider bounds come from the configured position range
    assert_eq!(h.set_number("Camera Position", "X Position", -25.0), -10.0);
    assert_eq!(h.state.camera.position.x, -10.0);
}

#[test]
fn test_cancellation_stops_simulation() {
    let mut h = Harness::new();
    let token = h.simulation.token().clone();
    let mut recorder = FrameRecorder::new().with_limit(5, token.clone());

    let mut frames = 0;
    while h.simulation.step(&mut h.state, &mut recorder).unwrap() {
        frames += 1;
        assert!(frames <= 5, "simulation kept running after cancellation");
    }

    assert!(token.is_cancelled());
    assert_eq!(frames, 5);
    assert_eq!(recorder.frame_count(), 5);
}
