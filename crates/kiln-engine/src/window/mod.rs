//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! drives the program lifecycle.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
