use core::sync::atomic::{AtomicBool, Ordering};

/// Whether a station disconnect should trigger another join attempt.
/// Defaults to enabled; AP activation disables it once the device commits to
/// the anchor role, and nothing re-enables it afterwards (switching back to
/// a station role is not supported).
pub struct ReconnectPolicy {
    enabled: AtomicBool,
}

impl ReconnectPolicy {
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }
}
