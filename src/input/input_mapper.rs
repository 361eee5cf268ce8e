//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to application actions like Exit or ToggleFullscreen.
//! Keys the control panel consumes never reach the mapper; see the
//! `GuiSystem` in `systems`.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Application-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Put the camera back where the configuration says (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Log every panel row (P key)
    PrintPanel,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for application keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyP => Some(InputAction::PrintPanel),
            _ => None,
        }
    }
}
