//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates window events (see `platform`) into `InputEvent`s,
//! tracks the modifier state, then hands the events to the program.

pub(crate) mod platform;
mod state;
mod types;

pub(crate) use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, PointerMoveEvent};
