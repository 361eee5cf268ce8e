//! Scene Group
//!
//! A multi-coloured cube and a purple sphere under a group node that can be
//! dissolved, re-formed and spun from an egui control panel.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use scenegroup::config::AppConfig;
use scenegroup::controls::{build_control_panel, DemoPanel, DemoState};
use scenegroup::input::{InputAction, InputMapper};
use scenegroup::systems::{GuiSystem, RenderError, RenderSystem, SimulationSystem, WindowSystem};
use scenegroup_core::CancellationToken;
use scenegroup_input::ControlId;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    gui: Option<GuiSystem>,
    /// Scene, camera and toggle flags edited by the panel
    state: DemoState,
    panel: DemoPanel,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let state = DemoState::from_config(&config)?;
        let panel = build_control_panel(&state, &config.controls)?;
        let simulation = SimulationSystem::new(
            &state,
            config.animation.rotation_step,
            CancellationToken::new(),
        )
        .with_log_interval(config.debug.frame_log_interval);

        log::info!(
            "Scene ready: {} nodes, {}",
            state.scene.graph.node_count(),
            state.status()
        );

        let app = Self {
            config,
            window: None,
            render: None,
            gui: None,
            state,
            panel,
            simulation,
        };
        if app.config.controls.print_panel_on_start {
            app.print_panel();
        }
        Ok(app)
    }

    fn print_panel(&self) {
        for row in self.panel.rows(&self.state) {
            log::info!("{}", row);
        }
    }

    fn stop(&self, event_loop: &ActiveEventLoop) {
        self.simulation.token().cancel();
        event_loop.exit();
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => self.stop(event_loop),
            InputAction::ResetCamera => {
                self.state.camera = DemoState::initial_camera(&self.config);
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::PrintPanel => self.print_panel(),
        }
    }

    /// Log edited rows and refresh the title after the panel changed something
    fn report_edits(&self, edited: &[ControlId]) {
        if edited.is_empty() {
            return;
        }

        if self.config.debug.log_panel_edits {
            for row in self.panel.rows(&self.state).iter().filter(|r| edited.contains(&r.id)) {
                log::info!("Edited {}", row);
            }
        }

        if let Some(window) = &self.window {
            window.update_title(&self.state.status());
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let edited = match (&mut self.gui, &self.window, &mut self.render) {
            (Some(gui), Some(window), Some(render)) => {
                let (overlay, edited) = gui.run(window.window(), &mut self.panel, &mut self.state);
                render.set_overlay(overlay);
                edited
            }
            _ => Vec::new(),
        };
        self.report_edits(&edited);

        let Some(render) = self.render.as_mut() else { return };

        match self.simulation.step(&mut self.state, render) {
            Ok(true) => {}
            Ok(false) => {
                log::info!("Stopped after {} frames", self.simulation.frames());
                event_loop.exit();
                return;
            }
            Err(RenderError::SurfaceLost) => render.recover_surface(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                self.simulation.token().cancel();
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        // Request next frame
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                self.stop(event_loop);
                return;
            }
        };

        match RenderSystem::new(window.window().clone(), &self.config.rendering, self.config.window.vsync) {
            Ok(render) => {
                let (width, height) = render.size();
                log::info!("Renderer ready at {}x{}", width, height);
                self.render = Some(render);
            }
            Err(e) => {
                log::error!("Failed to initialise renderer: {}", e);
                self.stop(event_loop);
                return;
            }
        }

        self.gui = Some(GuiSystem::new(window.window()));
        window.update_title(&self.state.status());
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match (&mut self.gui, &self.window) {
            (Some(gui), Some(window)) => gui.on_window_event(window.window(), &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => self.stop(event_loop),

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if consumed {
                    return;
                }
                let PhysicalKey::Code(key) = event.physical_key else { return };

                if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                    self.handle_action(event_loop, action);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Scene Group");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
