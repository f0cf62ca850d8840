use anyhow::Result;

use crate::render::geometry::TriangleGeometry;
use crate::render::pipeline::TrianglePipeline;
use crate::render::shader::ShaderModulePackage;
use crate::render::state::RenderSystemState;

mod geometry;
mod pipeline;
mod shader;
mod state;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

pub struct RenderSystem {
    state: RenderSystemState,
    pipeline: TrianglePipeline,
    geometry: TriangleGeometry,
}

impl RenderSystem {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let state = RenderSystemState::from_window(window).await?;

        let shader_modules = ShaderModulePackage::from_sources(&state.device).await;
        let pipeline = TrianglePipeline::from_shader_modules(
            &shader_modules,
            &state.device,
            state.surface_config.format,
        )
        .await;
        // The pipeline holds the compiled stages; the standalone modules are
        // released here.
        drop(shader_modules);

        let geometry = TriangleGeometry::from_device(&state.device);

        Ok(Self {
            state,
            pipeline,
            geometry,
        })
    }

    pub fn sync_view_dimensions(&mut self) {
        self.set_view_dimensions(self.state.view_dimensions);
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        if !accepts_view_dimensions(view_dimensions) {
            return;
        }

        self.state.set_view_dimensions(view_dimensions);
    }

    pub fn render(&mut self) -> Result<()> {
        let output = self.state.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.state
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("RENDER_SYSTEM_COMMAND_ENCODER"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("RENDER_SYSTEM_RENDER_PASS"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Output always maps to the full drawable area.
            render_pass.set_viewport(
                0.0,
                0.0,
                self.state.surface_config.width as f32,
                self.state.surface_config.height as f32,
                0.0,
                1.0,
            );

            render_pass.set_pipeline(&self.pipeline.gpu_pipeline);
            render_pass.set_vertex_buffer(0, self.geometry.gpu_buffer.slice(..));
            render_pass.draw(0..self.geometry.vertex_count, 0..1);
        }

        self.state.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn accepts_view_dimensions(view_dimensions: winit::dpi::PhysicalSize<u32>) -> bool {
    view_dimensions.width > 0 && view_dimensions.height > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_is_the_fixed_background() {
        assert_eq!(CLEAR_COLOR.r, 0.2);
        assert_eq!(CLEAR_COLOR.g, 0.3);
        assert_eq!(CLEAR_COLOR.b, 0.3);
        assert_eq!(CLEAR_COLOR.a, 1.0);
    }

    #[test]
    fn test_zero_view_dimensions_are_rejected() {
        assert!(!accepts_view_dimensions(winit::dpi::PhysicalSize::new(
            0, 300
        )));
        assert!(!accepts_view_dimensions(winit::dpi::PhysicalSize::new(
            400, 0
        )));
        assert!(!accepts_view_dimensions(winit::dpi::PhysicalSize::new(0, 0)));
    }

    #[test]
    fn test_nonzero_view_dimensions_are_accepted() {
        assert!(accepts_view_dimensions(winit::dpi::PhysicalSize::new(
            400, 300
        )));
        assert!(accepts_view_dimensions(winit::dpi::PhysicalSize::new(1, 1)));
    }
}
