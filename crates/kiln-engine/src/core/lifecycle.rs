/// Where a program is in its lifecycle.
///
/// `Uninitialized → Ready → Destroyed`; there is no way back from
/// `Destroyed`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Ready,
    Destroyed,
}

impl Lifecycle {
    /// `update`/`on_event` may only run while ready.
    pub fn is_ready(self) -> bool {
        self == Lifecycle::Ready
    }

    /// Records a successful init. Returns false (and stays put) unless the
    /// program was uninitialized.
    pub fn mark_ready(&mut self) -> bool {
        if *self != Lifecycle::Uninitialized {
            return false;
        }
        *self = Lifecycle::Ready;
        true
    }

    /// Records a destroy. Returns true only for the `Ready → Destroyed`
    /// transition, i.e. when `destroy` should actually run.
    pub fn mark_destroyed(&mut self) -> bool {
        let was_ready = self.is_ready();
        *self = Lifecycle::Destroyed;
        was_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        assert_eq!(Lifecycle::default(), Lifecycle::Uninitialized);
        assert!(!Lifecycle::default().is_ready());
    }

    #[test]
    fn init_then_destroy() {
        let mut l = Lifecycle::default();
        assert!(l.mark_ready());
        assert!(l.is_ready());
        assert!(l.mark_destroyed());
        assert_eq!(l, Lifecycle::Destroyed);
    }

    #[test]
    fn second_destroy_is_rejected() {
        let mut l = Lifecycle::Ready;
        assert!(l.mark_destroyed());
        assert!(!l.mark_destroyed());
    }

    #[test]
    fn destroy_without_init_does_not_run() {
        let mut l = Lifecycle::Uninitialized;
        assert!(!l.mark_destroyed());
        assert_eq!(l, Lifecycle::Destroyed);
    }

    #[test]
    fn no_way_back_from_destroyed() {
        let mut l = Lifecycle::Destroyed;
        assert!(!l.mark_ready());
        assert_eq!(l, Lifecycle::Destroyed);
    }
}
