use anyhow::Result;

use crate::input::InputEvent;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by program callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Lifecycle contract implemented by programs.
///
/// The runtime calls `init` once, then `update` once per frame with
/// `on_event` interleaved, then `destroy` once at shutdown. `update` and
/// `on_event` only run after `init` succeeded and before `destroy`.
pub trait Program {
    /// Creates GPU resources. An error aborts startup; `Runtime::run`
    /// returns it and `destroy` is not called.
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()>;

    /// Called once per rendered frame.
    fn update(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called for each translated input event.
    fn on_event(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Releases resources created by `init`.
    fn destroy(&mut self);

    /// Debug-overlay hook, called after `update` each frame.
    fn draw_debug_ui(&mut self) {}
}
