//! Control panel for scenegroup
//!
//! This crate provides a panel of live-editable controls, the uniform scale
//! controller built on it, and an egui view that draws the panel.

mod panel;
mod panel_ui;
mod scale_controller;

pub use panel::{
    ControlId, ControlKind, ControlPanel, ControlSink, ControlValue, FlagCallback, FolderId,
    NumberCallback, PanelEntry, PanelError, PanelRow,
};
pub use panel_ui::show_panel;
pub use scale_controller::{create_scale_controller, ScaleTarget, MAX_SCALE, MIN_SCALE};
