//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Mesh pipeline and per-node GPU buffers
//! - egui overlay drawn after the meshes
//! - Frame rendering through the [`SceneRenderer`] boundary

use std::sync::Arc;
use winit::window::Window;
use scenegroup_core::{SceneGraph, SceneRenderer};
use scenegroup_render::{
    camera::PerspectiveCamera,
    context::RenderContext,
    pipeline::{GlobalUniforms, MeshPipeline, SceneLights},
    OverlayFrame, OverlayRenderer, RenderableScene,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MeshPipeline,
    meshes: RenderableScene,
    lights: SceneLights,
    clear_color: wgpu::Color,
    overlay: OverlayRenderer,
    /// Overlay for the next frame; consumed by `render`
    pending_overlay: Option<OverlayFrame>,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &RenderingConfig, vsync: bool) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))
            .map_err(|e| RenderError::Other(e.to_string()))?;

        let mut pipeline = MeshPipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(&context.device, context.config.width, context.config.height);
        let overlay = OverlayRenderer::new(&context.device, context.config.format);

        let bg = config.background_color;
        Ok(Self {
            context,
            pipeline,
            meshes: RenderableScene::new(),
            lights: config.lights(),
            clear_color: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
            overlay,
            pending_overlay: None,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        log::warn!("Surface lost, reconfiguring");
        self.context.reconfigure();
    }

    /// Queue egui output to draw over the next frame
    pub fn set_overlay(&mut self, frame: OverlayFrame) {
        self.pending_overlay = Some(frame);
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

impl SceneRenderer for RenderSystem {
    type Camera = PerspectiveCamera;
    type Error = RenderError;

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.meshes.sync(&self.context.device, &self.context.queue, &self.pipeline, scene);

        let uniforms = GlobalUniforms::new(
            camera.view_matrix(),
            camera.projection_matrix(self.context.aspect_ratio()),
            &self.lights,
        );
        self.pipeline.update_globals(&self.context.queue, &uniforms);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.render(&mut encoder, &view, &self.meshes, self.clear_color);

        let overlay_commands = match self.pending_overlay.take() {
            Some(frame) => self.overlay.render(
                &self.context.device,
                &self.context.queue,
                &mut encoder,
                &view,
                [self.context.config.width, self.context.config.height],
                &frame,
            ),
            None => Vec::new(),
        };

        self.context
            .queue
            .submit(overlay_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }
}
