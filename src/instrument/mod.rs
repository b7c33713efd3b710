//! Contention instrumentation.
//!
//! ## Overview
//!
//! Every instrumented structure measures the time each call spends holding
//! the structure's lock (after acquisition, before release) and adds it to a
//! counter keyed by the calling thread. Time spent waiting for the lock is
//! not counted. A harness divides the summed counters by the wall-clock span
//! of a run to get the useful-work ratio.
//!
//! ## Components
//!
//! - [`WorkLedger`]: per-thread counters owned by one structure
//! - [`BusyTime`]: the accounting contract shared by the tree and the
//!   sequence adapters
//! - [`ContentionReport`]: the summary of one run

pub mod ledger;
pub mod report;

use std::collections::HashMap;
use std::thread::ThreadId;
use std::time::Duration;

pub use ledger::WorkLedger;
pub use report::ContentionReport;

/// Per-thread busy-time accounting exposed by every instrumented structure.
pub trait BusyTime {
    /// Snapshot of the busy time recorded for each thread
    fn work_by_thread(&self) -> HashMap<ThreadId, Duration>;

    /// Zero every counter
    fn reset_work(&self);

    /// Busy time summed over all threads
    fn total_work(&self) -> Duration {
        self.work_by_thread().values().sum()
    }
}
