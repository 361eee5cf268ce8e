//! Control panel layout
//!
//! Folders, in order: "Camera Position", "Cube Attributes", "Sphere
//! Attributes", "Group Attributes". Each object folder holds X/Y/Z position
//! sliders and a "Scale" sub-folder. The two top-level checkboxes come last.

use scenegroup_input::{create_scale_controller, ControlPanel, PanelError};

use super::{Axis, DemoField, DemoFlag, DemoState};
use crate::config::ControlsConfig;

/// The panel type used by the demo
pub type DemoPanel = ControlPanel<DemoState>;

/// Lay out the demo panel for `state`
pub fn build_control_panel(state: &DemoState, config: &ControlsConfig) -> Result<DemoPanel, PanelError> {
    let mut panel = DemoPanel::new();
    let root = panel.root();
    let range = config.position_range.abs();

    let camera = panel.add_folder("Camera Position", root);
    for axis in Axis::ALL {
        panel.bind_numeric(camera, DemoField::CameraPosition(axis), -range, range, axis.label());
    }

    let objects = [
        ("Cube Attributes", state.scene.cube),
        ("Sphere Attributes", state.scene.sphere),
        ("Group Attributes", state.scene.group),
    ];
    for (name, key) in objects {
        let folder = panel.add_folder(name, root);
        for axis in Axis::ALL {
            panel.bind_numeric(folder, DemoField::NodePosition(key, axis), -range, range, axis.label());
        }
        create_scale_controller(&mut panel, folder, state, key)?;
    }

    let group_objects = panel.bind_boolean(root, DemoFlag::GroupObjects, "Group Objects");
    panel.on_boolean_change(group_objects, |state: &mut DemoState, grouped| {
        state.scene.set_grouped(grouped);
    })?;
    panel.bind_boolean(root, DemoFlag::RotateGroup, "Rotate Group");

    log::info!("Control panel ready with {} controls", panel.len());
    Ok(panel)
}
