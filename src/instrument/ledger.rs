//! Per-thread busy-time accumulator.

use std::collections::HashMap;
use std::thread::{self, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;

/// Nanoseconds spent inside critical sections, keyed by calling thread.
///
/// Each instrumented structure owns one ledger. The ledger has its own
/// mutex, separate from the structure's lock, and is only touched after the
/// structure's lock has been released, so recording never lengthens the
/// measured span.
#[derive(Debug, Default)]
pub struct WorkLedger {
    work: Mutex<HashMap<ThreadId, Duration>>,
}

impl WorkLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `busy` to the calling thread's counter
    #[inline]
    pub fn record(&self, busy: Duration) {
        let id = thread::current().id();
        *self.work.lock().entry(id).or_default() += busy;
    }

    /// Copy of all counters
    pub fn snapshot(&self) -> HashMap<ThreadId, Duration> {
        self.work.lock().clone()
    }

    /// Sum of all counters
    pub fn total(&self) -> Duration {
        self.work.lock().values().sum()
    }

    /// Number of threads that have recorded work
    pub fn threads(&self) -> usize {
        self.work.lock().len()
    }

    /// Forget every counter
    pub fn reset(&self) {
        self.work.lock().clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
