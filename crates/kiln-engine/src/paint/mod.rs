//! Color representation shared by the runtime and programs.

pub mod color;

pub use color::Color;
