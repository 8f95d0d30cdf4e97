//! Hello-texture demo: one triangle, one shader program, drawn every frame.
//!
//! [`HelloTexture`] is the program handed to `kiln_engine::window::Runtime`;
//! [`TriangleRenderer`] owns its GPU resources once `init` has run.

pub mod geometry;
pub mod hello_texture;
pub mod paths;
pub mod triangle;

pub use hello_texture::{HelloTexture, CLEAR_COLOR};
pub use paths::ShaderPaths;
pub use triangle::TriangleRenderer;
