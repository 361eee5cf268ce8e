//! egui overlay pass
//!
//! Draws tessellated egui output on top of the frame the mesh pipeline has
//! already written. The pass loads the existing colour target instead of
//! clearing it and uses no depth attachment.

/// Tessellated egui output for one frame
#[derive(Default)]
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl OverlayFrame {
    /// True when there is nothing to draw and no texture to upload or free
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
            && self.textures_delta.set.is_empty()
            && self.textures_delta.free.is_empty()
    }
}

/// Screen description for egui-wgpu, guarding against a zero scale factor
fn screen_descriptor(size: [u32; 2], pixels_per_point: f32) -> egui_wgpu::ScreenDescriptor {
    let pixels_per_point = if pixels_per_point > 0.0 { pixels_per_point } else { 1.0 };
    egui_wgpu::ScreenDescriptor {
        size_in_pixels: size,
        pixels_per_point,
    }
}

/// Renders egui output onto the surface texture
pub struct OverlayRenderer {
    renderer: egui_wgpu::Renderer,
}

impl OverlayRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            renderer: egui_wgpu::Renderer::new(device, format, None, 1, false),
        }
    }

    /// Record the overlay pass into `encoder`.
    ///
    /// Returns command buffers from egui callbacks, which must be submitted
    /// before the encoder itself.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size: [u32; 2],
        frame: &OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        let screen = screen_descriptor(size, frame.pixels_per_point);
        let commands = self
            .renderer
            .update_buffers(device, queue, encoder, &frame.primitives, &screen);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .render(&mut render_pass.forget_lifetime(), &frame.primitives, &screen);
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_is_empty() {
        assert!(OverlayFrame::default().is_empty());
    }

    #[test]
    fn test_freed_texture_is_not_empty() {
        let mut frame = OverlayFrame::default();
        frame.textures_delta.free.push(egui::TextureId::Managed(1));
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_screen_descriptor_rejects_zero_scale() {
        let screen = screen_descriptor([800, 600], 0.0);
        assert_eq!(screen.size_in_pixels, [800, 600]);
        assert_eq!(screen.pixels_per_point, 1.0);

        assert_eq!(screen_descriptor([800, 600], 2.0).pixels_per_point, 2.0);
    }
}
