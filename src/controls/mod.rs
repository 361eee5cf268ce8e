//! Demo state and its control panel
//!
//! [`DemoState`] is everything the panel can edit. [`build_control_panel`]
//! lays the panel out folder by folder.

mod demo_state;
mod panel_layout;

pub use demo_state::{Axis, DemoField, DemoFlag, DemoState};
pub use panel_layout::{build_control_panel, DemoPanel};
