//! GPU rendering subsystem.
//!
//! Programs own their GPU resources (buffers, shader programs) and record
//! draws into a [`RenderTarget`] handed out by the runtime each frame.
//!
//! Shader sources are GLSL, compiled per stage by naga before wgpu sees them,
//! so compile diagnostics are available as text before any pipeline exists.

mod ctx;
mod program;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use program::{verify_stages, ShaderProgram};
pub use shader::{compile, CompiledStage, ShaderError, ShaderSource, ShaderStage};
