use super::types::{InputEvent, Modifiers};

/// Input state the platform translation reads back.
///
/// winit reports modifiers only as separate `ModifiersChanged` events, so the
/// latest set is kept here and attached to each key event.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
            _ => {}
        }
    }
}
