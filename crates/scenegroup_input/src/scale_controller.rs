//! Uniform scale control
//!
//! Adds a "Scale" folder with one "Uniform Scale" slider. The slider keeps
//! its own value, seeded from the target's current x scale, and every edit
//! sets all three scale components to that value.

use crate::panel::{ControlId, ControlPanel, ControlSink, FolderId, PanelError};

/// Smallest selectable scale
pub const MIN_SCALE: f32 = 0.1;
/// Largest selectable scale
pub const MAX_SCALE: f32 = 5.0;

/// A sink that can scale some of its objects uniformly
pub trait ScaleTarget: ControlSink {
    /// Identifies a scalable object
    type Target: Copy + 'static;

    /// The object's x scale
    fn scale_x(&self, target: Self::Target) -> f32;

    /// Set scale to `(value, value, value)`
    fn set_uniform_scale(&mut self, target: Self::Target, value: f32);
}

/// Add a "Scale" sub-folder to `parent` controlling `target`'s uniform scale.
///
/// Returns the id of the "Uniform Scale" control.
pub fn create_scale_controller<S>(
    panel: &mut ControlPanel<S>,
    parent: FolderId,
    sink: &S,
    target: S::Target,
) -> Result<ControlId, PanelError>
where
    S: ScaleTarget + 'static,
{
    let folder = panel.add_folder("Scale", parent);
    let initial = sink.scale_x(target);
    let id = panel.add_local_numeric(folder, initial, MIN_SCALE, MAX_SCALE, "Uniform Scale");
    panel.on_numeric_change(id, move |sink: &mut S, value| {
        sink.set_uniform_scale(target, value);
    })?;
    Ok(id)
}
