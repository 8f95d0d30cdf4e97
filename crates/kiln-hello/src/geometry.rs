use bytemuck::{Pod, Zeroable};

/// Position-only vertex, bound to shader input slot 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Slot 0 → `vec3` position, 12-byte stride, offset 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The triangle, in clip space, counter-clockwise.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex { position: [-0.5, -0.5, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0] },
    Vertex { position: [0.0, 0.5, 0.0] },
];

pub const VERTEX_COUNT: u32 = TRIANGLE.len() as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_bytes_are_the_nine_fixed_floats() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(
            floats,
            &[-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0]
        );
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&TRIANGLE).len(), 36);
    }

    #[test]
    fn layout_is_slot_zero_float3_stride_twelve() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);

        let attr = layout.attributes[0];
        assert_eq!(attr.shader_location, 0);
        assert_eq!(attr.offset, 0);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn exactly_three_vertices() {
        assert_eq!(VERTEX_COUNT, 3);
    }
}
