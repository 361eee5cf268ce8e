//! Control panel window
//!
//! Feeds winit events to egui, draws the demo panel in a floating window
//! anchored to the top right, and hands the tessellated result to the
//! render system.

use winit::{event::WindowEvent, window::Window};
use scenegroup_input::{show_panel, ControlId};
use scenegroup_render::OverlayFrame;
use crate::controls::{DemoPanel, DemoState};

const PANEL_TITLE: &str = "Controls";

/// egui context plus its winit glue
pub struct GuiSystem {
    context: egui::Context,
    state: egui_winit::State,
}

impl GuiSystem {
    pub fn new(window: &Window) -> Self {
        let context = egui::Context::default();
        let state = egui_winit::State::new(
            context.clone(),
            context.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );
        Self { context, state }
    }

    /// Pass a window event to egui.
    ///
    /// Returns true when the panel used the event and the application
    /// should not act on it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Lay out one frame of the panel, applying any edits to `state`
    pub fn run(
        &mut self,
        window: &Window,
        panel: &mut DemoPanel,
        state: &mut DemoState,
    ) -> (OverlayFrame, Vec<ControlId>) {
        let raw_input = self.state.take_egui_input(window);
        let mut edited = Vec::new();

        let output = self.context.run(raw_input, |ctx| {
            for id in draw_controls(ctx, panel, state) {
                if !edited.contains(&id) {
                    edited.push(id);
                }
            }
        });

        self.state.handle_platform_output(window, output.platform_output);
        let primitives = self.context.tessellate(output.shapes, output.pixels_per_point);

        let frame = OverlayFrame {
            primitives,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        };
        (frame, edited)
    }
}

/// Draw the panel window into `ctx` and return the controls edited
pub fn draw_controls(ctx: &egui::Context, panel: &mut DemoPanel, state: &mut DemoState) -> Vec<ControlId> {
    let mut edited = Vec::new();
    egui::Window::new(PANEL_TITLE)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| match show_panel(ui, panel, state) {
            Ok(ids) => edited = ids,
            Err(e) => log::warn!("Control panel error: {}", e),
        });
    edited
}
