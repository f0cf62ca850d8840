use crate::render::geometry::Vertex;
use crate::render::shader::{truncate_diagnostic, ShaderModulePackage};

pub struct TrianglePipeline {
    pub gpu_pipeline: wgpu::RenderPipeline,
}

impl TrianglePipeline {
    /// Links the two shader stages into the one pipeline used every frame.
    ///
    /// A validation failure is logged once, with the diagnostic capped the
    /// same way as shader compilation, and execution continues with the
    /// resulting pipeline object.
    pub async fn from_shader_modules(
        shader_modules: &ShaderModulePackage,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> Self {
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("TRIANGLE_RENDER_PIPELINE_LAYOUT"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let gpu_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("TRIANGLE_RENDER_PIPELINE"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_modules.vertex_shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_modules.fragment_shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent::REPLACE,
                        alpha: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(error) = device.pop_error_scope().await {
            log::error!(
                "Pipeline linking failed: {}",
                truncate_diagnostic(&error.to_string())
            );
        }

        Self { gpu_pipeline }
    }
}
