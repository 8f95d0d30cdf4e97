use wgpu::util::DeviceExt;

use kiln_engine::device::GpuErrorLog;
use kiln_engine::render::{CompiledStage, RenderCtx, RenderTarget, ShaderError, ShaderProgram};

use crate::geometry::{Vertex, TRIANGLE, VERTEX_COUNT};

/// GPU side of the demo: the uploaded triangle and the linked program.
pub struct TriangleRenderer {
    vertex_buffer: wgpu::Buffer,
    program: ShaderProgram,
    errors: GpuErrorLog,
}

impl TriangleRenderer {
    /// Uploads the triangle and links the two compiled stages.
    pub fn new(
        ctx: &RenderCtx<'_>,
        vertex: CompiledStage,
        fragment: CompiledStage,
    ) -> Result<Self, ShaderError> {
        let vertex_buffer = ctx.errors.checked("upload vertex buffer", || {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("hello texture vbo"),
                contents: bytemuck::cast_slice(&TRIANGLE),
                // COPY_SRC allows reading the upload back.
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_SRC,
            })
        });

        let program = ShaderProgram::link(ctx, "hello texture", vertex, fragment, &[Vertex::layout()])?;

        Ok(Self {
            vertex_buffer,
            program,
            errors: ctx.errors.clone(),
        })
    }

    /// Records one draw of the triangle on top of whatever `target` holds.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hello texture pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(self.program.pipeline());
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.draw(0..VERTEX_COUNT, 0..1);
        }

        ctx.errors.check("draw triangle");
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Frees the vertex buffer, the program and both of its stages.
    pub fn destroy(self) {
        let Self {
            vertex_buffer,
            program,
            errors,
        } = self;

        errors.checked("release vertex buffer", || vertex_buffer.destroy());
        log::debug!(
            "released program `{}` (2 stages) and vertex buffer",
            program.label()
        );
        drop(program);
    }
}
