use std::borrow::Cow;

use super::shader::{CompiledStage, ShaderError, ShaderStage};
use super::RenderCtx;

/// Checks that a (vertex, fragment) pair really is one of each.
pub fn verify_stages(vertex: &CompiledStage, fragment: &CompiledStage) -> Result<(), ShaderError> {
    for (expected, stage) in [
        (ShaderStage::Vertex, vertex),
        (ShaderStage::Fragment, fragment),
    ] {
        if stage.stage() != expected {
            return Err(ShaderError::StageMismatch {
                expected,
                found: stage.stage(),
            });
        }
    }
    Ok(())
}

/// Linked vertex + fragment stages.
///
/// Owns both shader modules and the render pipeline built from them.
/// Dropping the program releases all three.
pub struct ShaderProgram {
    label: String,
    _vertex: wgpu::ShaderModule,
    _fragment: wgpu::ShaderModule,
    pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    /// Links two compiled stages into a pipeline targeting `ctx.surface_format`.
    ///
    /// `buffers` describes the vertex inputs of the vertex stage. wgpu-side
    /// failures (e.g. interface mismatch between the stages) are reported
    /// through the checked-call log rather than returned.
    pub fn link(
        ctx: &RenderCtx<'_>,
        label: &str,
        vertex: CompiledStage,
        fragment: CompiledStage,
        buffers: &[wgpu::VertexBufferLayout<'_>],
    ) -> Result<Self, ShaderError> {
        verify_stages(&vertex, &fragment)?;

        let vs_entry = vertex.entry_point().to_owned();
        let fs_entry = fragment.entry_point().to_owned();

        let vs_label = format!("{label} vertex stage");
        let vertex = ctx.errors.checked("create vertex shader", || {
            ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(vs_label.as_str()),
                source: wgpu::ShaderSource::Naga(Cow::Owned(vertex.into_module())),
            })
        });

        let fs_label = format!("{label} fragment stage");
        let fragment = ctx.errors.checked("create fragment shader", || {
            ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(fs_label.as_str()),
                source: wgpu::ShaderSource::Naga(Cow::Owned(fragment.into_module())),
            })
        });

        let layout_label = format!("{label} pipeline layout");
        let layout = ctx.errors.checked("create pipeline layout", || {
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(layout_label.as_str()),
                bind_group_layouts: &[],
                immediate_size: 0,
            })
        });

        let pipeline_label = format!("{label} pipeline");
        let pipeline = ctx.errors.checked("link program", || {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(pipeline_label.as_str()),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &vertex,
                    entry_point: Some(vs_entry.as_str()),
                    compilation_options: Default::default(),
                    buffers,
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fragment,
                    entry_point: Some(fs_entry.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
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
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        });

        log::debug!("linked program `{label}` (vs `{vs_entry}`, fs `{fs_entry}`)");

        Ok(Self {
            label: label.to_owned(),
            _vertex: vertex,
            _fragment: fragment,
            pipeline,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}
