//! Editable demo state
//!
//! Numeric fields are addressed by [`DemoField`], flags by [`DemoFlag`].
//! Writing `GroupObjects` only records the flag; the panel's change callback
//! runs the grouping toggle.

use scenegroup_core::{NodeKey, SceneError, ToggleState, Vec3};
use scenegroup_input::{ControlSink, ScaleTarget};
use scenegroup_render::camera::PerspectiveCamera;

use crate::config::AppConfig;
use crate::scene::DemoScene;

/// A coordinate axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }

    /// Label used by the position sliders
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X Position",
            Axis::Y => "Y Position",
            Axis::Z => "Z Position",
        }
    }
}

/// Numeric fields the panel can bind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoField {
    CameraPosition(Axis),
    NodePosition(NodeKey, Axis),
}

/// Boolean fields the panel can bind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoFlag {
    GroupObjects,
    RotateGroup,
}

/// Everything the control panel edits
pub struct DemoState {
    pub scene: DemoScene,
    pub camera: PerspectiveCamera,
    pub toggles: ToggleState,
}

impl DemoState {
    /// Build the scene and camera from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, SceneError> {
        let scene = DemoScene::build(&config.scene)?;

        Ok(Self {
            scene,
            camera: Self::initial_camera(config),
            toggles: config.initial_toggles(),
        })
    }

    /// Camera at its configured position, aimed at its configured target
    pub fn initial_camera(config: &AppConfig) -> PerspectiveCamera {
        let camera_config = &config.camera;
        let mut camera = PerspectiveCamera::new(camera_config.fov, camera_config.near, camera_config.far)
            .with_position(Vec3::from_array(camera_config.position));
        camera.look_at(Vec3::from_array(camera_config.look_at));
        camera
    }

    /// Human-readable summary for the window title
    pub fn status(&self) -> String {
        format!(
            "{}{}",
            if self.scene.is_grouped() { "grouped" } else { "ungrouped" },
            if self.toggles.rotate_group { ", rotating" } else { "" }
        )
    }
}

impl ControlSink for DemoState {
    type NumberField = DemoField;
    type FlagField = DemoFlag;

    fn read_number(&self, field: DemoField) -> f32 {
        match field {
            DemoField::CameraPosition(axis) => axis.get(self.camera.position),
            DemoField::NodePosition(key, axis) => self
                .scene
                .graph
                .transform(key)
                .map(|t| axis.get(t.position))
                .unwrap_or_default(),
        }
    }

    fn write_number(&mut self, field: DemoField, value: f32) {
        match field {
            DemoField::CameraPosition(axis) => axis.set(&mut self.camera.position, value),
            DemoField::NodePosition(key, axis) => {
                let Some(t) = self.scene.graph.transform_mut(key) else {
                    log::warn!("Position edit for missing node {:?}", key);
                    return;
                };
                axis.set(&mut t.position, value);
            }
        }
    }

    fn read_flag(&self, field: DemoFlag) -> bool {
        match field {
            DemoFlag::GroupObjects => self.toggles.group_objects,
            DemoFlag::RotateGroup => self.toggles.rotate_group,
        }
    }

    fn write_flag(&mut self, field: DemoFlag, value: bool) {
        match field {
            DemoFlag::GroupObjects => self.toggles.group_objects = value,
            DemoFlag::RotateGroup => self.toggles.rotate_group = value,
        }
    }
}

impl ScaleTarget for DemoState {
    type Target = NodeKey;

    fn scale_x(&self, target: NodeKey) -> f32 {
        self.scene
            .graph
            .transform(target)
            .map(|t| t.scale.x)
            .unwrap_or(1.0)
    }

    fn set_uniform_scale(&mut self, target: NodeKey, value: f32) {
        if let Err(e) = self.scene.graph.set_uniform_scale(target, value) {
            log::warn!("Scale edit ignored: {}", e);
        }
    }
}
