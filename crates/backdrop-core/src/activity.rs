//! Externally owned on/off signal sampled by engines.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared activity flag.
///
/// The host keeps one handle and flips it; engines keep a clone and read
/// it every step. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct ActivitySignal {
    active: Arc<AtomicBool>,
}

impl ActivitySignal {
    /// Create a signal with the given initial value.
    pub fn new(active: bool) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(active)),
        }
    }

    pub fn set(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::Relaxed)
    }
}
