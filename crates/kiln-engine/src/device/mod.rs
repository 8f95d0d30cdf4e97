//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - collecting graphics-API errors for checked calls

mod check;
mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use check::{GpuError, GpuErrorKind, GpuErrorLog};
pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
