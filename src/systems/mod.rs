//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod gui;
mod render;
mod simulation;
mod window;

pub use gui::{draw_controls, GuiSystem};
pub use render::{RenderError, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{WindowError, WindowSystem};
