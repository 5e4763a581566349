//! Interruptible restart delay
//!
//! The wait between the stop and start halves of a restart. Interruption is
//! sticky: an interrupt that lands before the wait begins still cancels the
//! next wait, and each wait consumes at most one interrupt.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

pub(super) struct RestartGate {
    interrupted: Mutex<bool>,
    signal: Condvar,
}

impl RestartGate {
    pub(super) fn new() -> Self {
        Self {
            interrupted: Mutex::new(false),
            signal: Condvar::new(),
        }
    }

    /// Block the calling thread for the full delay
    ///
    /// Returns false when the wait was interrupted, consuming the interrupt.
    pub(super) fn wait(&self, delay: Duration) -> bool {
        let guard = self
            .interrupted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (mut interrupted, _timeout) = self
            .signal
            .wait_timeout_while(guard, delay, |interrupted| !*interrupted)
            .unwrap_or_else(PoisonError::into_inner);

        let was_interrupted = *interrupted;
        *interrupted = false;
        !was_interrupted
    }

    /// Interrupt the current wait, or the next one if none is in flight
    pub(super) fn interrupt(&self) {
        let mut interrupted = self
            .interrupted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *interrupted = true;
        self.signal.notify_all();
    }
}
