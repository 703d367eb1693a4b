//! Enable/disable state of the action control.
//!
//! The control is disabled while an analyze or file read is in flight and is
//! re-enabled when the guard is dropped, however the operation ends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle to the action control. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct ActionControl {
    enabled: Arc<AtomicBool>,
}

impl Default for ActionControl {
    fn default() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ActionControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Disable the control for the lifetime of the returned guard.
    ///
    /// Returns `None` if another operation already holds it.
    pub fn try_acquire(&self) -> Option<ActionGuard> {
        self.enabled
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ActionGuard {
                enabled: Arc::clone(&self.enabled),
            })
    }
}

/// Re-enables the control on drop.
#[derive(Debug)]
pub struct ActionGuard {
    enabled: Arc<AtomicBool>,
}

impl Drop for ActionGuard {
    fn drop(&mut self) {
        self.enabled.store(true, Ordering::Release);
    }
}
