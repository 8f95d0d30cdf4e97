//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the program
//! it drives, and the per-call contexts handed to the program.

mod app;
mod ctx;
mod lifecycle;

pub use app::{AppControl, Program};
pub use ctx::{FrameCtx, InitCtx, WindowCtx};
pub use lifecycle::Lifecycle;
