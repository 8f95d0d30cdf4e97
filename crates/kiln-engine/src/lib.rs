//! Kiln engine crate.
//!
//! Owns the window, the GPU context and the lifecycle ordering that drives a
//! single [`core::Program`]. Demo crates only implement the program.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod logging;
pub mod paint;
pub mod render;
