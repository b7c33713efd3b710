//! Readers-writer lock with critical-section accounting.

use std::collections::HashMap;
use std::thread::ThreadId;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::instrument::{BusyTime, WorkLedger};

/// A value behind a `RwLock` whose holders are timed.
///
/// `read` and `write` time only the closure, i.e. the span between lock
/// acquisition and release, and record it for the calling thread after the
/// lock is dropped.
#[derive(Debug, Default)]
pub struct Guarded<C> {
    inner: RwLock<C>,
    ledger: WorkLedger,
}

impl<C> Guarded<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: RwLock::new(inner),
            ledger: WorkLedger::new(),
        }
    }

    /// Run `op` with shared access
    pub fn read<R>(&self, op: impl FnOnce(&C) -> R) -> R {
        let guard = self.inner.read();
        let started = Instant::now();
        let out = op(&*guard);
        let busy = started.elapsed();
        drop(guard);
        self.ledger.record(busy);
        out
    }

    /// Run `op` with exclusive access
    pub fn write<R>(&self, op: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.write();
        let started = Instant::now();
        let out = op(&mut *guard);
        let busy = started.elapsed();
        drop(guard);
        self.ledger.record(busy);
        out
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C> BusyTime for Guarded<C> {
    fn work_by_thread(&self) -> HashMap<ThreadId, Duration> {
        self.ledger.snapshot()
    }

    fn reset_work(&self) {
        self.ledger.reset();
    }
}
