use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Triangle in normalized device coordinates.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex {
        position: [-0.5, -0.5, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
    },
    Vertex {
        position: [0.0, 0.5, 0.0],
    },
];

pub struct TriangleGeometry {
    pub gpu_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl TriangleGeometry {
    /// Uploads the fixed vertex data once. The buffer is never written again,
    /// so its only usage is `VERTEX`.
    pub fn from_device(device: &wgpu::Device) -> Self {
        let gpu_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("TRIANGLE_VERTEX_BUFFER"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            gpu_buffer,
            vertex_count: TRIANGLE_VERTICES.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_vertex_order() {
        assert_eq!(TRIANGLE_VERTICES.len(), 3);
        assert_eq!(TRIANGLE_VERTICES[0].position, [-0.5, -0.5, 0.0]);
        assert_eq!(TRIANGLE_VERTICES[1].position, [0.5, -0.5, 0.0]);
        assert_eq!(TRIANGLE_VERTICES[2].position, [0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_triangle_byte_image_is_stable() {
        let first: &[u8] = bytemuck::cast_slice(&TRIANGLE_VERTICES);
        let second: &[u8] = bytemuck::cast_slice(&TRIANGLE_VERTICES);

        assert_eq!(first.len(), 9 * std::mem::size_of::<f32>());
        assert_eq!(first, second);
    }

    #[test]
    fn test_vertex_layout_is_tightly_packed_position_data() {
        let layout = Vertex::layout();

        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }
}
