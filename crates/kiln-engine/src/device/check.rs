use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard};

/// Coarse classification of a graphics-API error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GpuErrorKind {
    OutOfMemory,
    Validation,
    Internal,
}

impl fmt::Display for GpuErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GpuErrorKind::OutOfMemory => "out-of-memory",
            GpuErrorKind::Validation => "validation",
            GpuErrorKind::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// An error raised by wgpu and captured by the device error handler.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuError {
    pub kind: GpuErrorKind,
    pub message: String,
}

impl From<wgpu::Error> for GpuError {
    fn from(err: wgpu::Error) -> Self {
        let kind = match &err {
            wgpu::Error::OutOfMemory { .. } => GpuErrorKind::OutOfMemory,
            wgpu::Error::Validation { .. } => GpuErrorKind::Validation,
            _ => GpuErrorKind::Internal,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Sink for graphics-API errors, plus the checked-call primitive.
///
/// `install` replaces wgpu's default uncaptured-error handler (which panics)
/// with one that queues errors here. [`GpuErrorLog::checked`] runs a call and
/// then reports everything queued, tagged with the caller's file and line.
///
/// Reporting is observe-only: errors are logged and dropped, execution
/// continues.
#[derive(Clone, Default)]
pub struct GpuErrorLog {
    pending: Arc<Mutex<Vec<GpuError>>>,
}

impl GpuErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log and routes `device`'s uncaptured errors into it.
    pub fn install(device: &wgpu::Device) -> Self {
        let log = Self::new();
        let sink = log.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            sink.record(GpuError::from(err));
        }));
        log
    }

    /// Queues an error until the next check.
    pub fn record(&self, err: GpuError) {
        self.lock().push(err);
    }

    /// Number of errors queued and not yet reported.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Removes and returns all queued errors without logging them.
    pub fn drain(&self) -> Vec<GpuError> {
        std::mem::take(&mut *self.lock())
    }

    /// Reports every queued error against the caller's location.
    ///
    /// Returns the number of errors reported.
    #[track_caller]
    pub fn check(&self, what: &str) -> usize {
        self.report(what, Location::caller())
    }

    /// Runs `call`, then reports any errors it raised against the caller's
    /// location.
    #[track_caller]
    pub fn checked<T>(&self, what: &str, call: impl FnOnce() -> T) -> T {
        let site = Location::caller();
        let out = call();
        self.report(what, site);
        out
    }

    fn report(&self, what: &str, site: &Location<'_>) -> usize {
        let errors = self.drain();
        for err in &errors {
            log::error!(
                "{} error during `{what}` in file: {} at line: {}: {}",
                err.kind,
                site.file(),
                site.line(),
                err.message
            );
        }
        errors.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GpuError>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for GpuErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuErrorLog")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation(msg: &str) -> GpuError {
        GpuError {
            kind: GpuErrorKind::Validation,
            message: msg.to_string(),
        }
    }

    #[test]
    fn check_reports_and_drains() {
        let log = GpuErrorLog::new();
        log.record(validation("bad buffer"));
        log.record(validation("bad pipeline"));
        assert_eq!(log.pending(), 2);

        assert_eq!(log.check("frame"), 2);
        assert_eq!(log.pending(), 0);
        assert_eq!(log.check("frame"), 0);
    }

    #[test]
    fn checked_returns_call_value() {
        let log = GpuErrorLog::new();
        let v = log.checked("answer", || 42);
        assert_eq!(v, 42);
    }

    #[test]
    fn checked_reports_errors_raised_inside_call() {
        let log = GpuErrorLog::new();
        let sink = log.clone();
        log.checked("create buffer", || sink.record(validation("size is zero")));
        assert_eq!(log.pending(), 0);
    }

    #[test]
    fn clones_share_one_queue() {
        let a = GpuErrorLog::new();
        let b = a.clone();
        a.record(validation("x"));
        assert_eq!(b.drain(), vec![validation("x")]);
        assert_eq!(a.pending(), 0);
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(GpuErrorKind::OutOfMemory.to_string(), "out-of-memory");
        assert_eq!(GpuErrorKind::Validation.to_string(), "validation");
    }
}
