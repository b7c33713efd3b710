//! Contention report for a finished workload run.
//!
//! The report pairs the wall-clock span of a run with the busy time every
//! participating thread accumulated inside critical sections.

use std::collections::HashMap;
use std::fmt;
use std::thread::ThreadId;
use std::time::Duration;

/// Summary of one multi-threaded run against a single structure.
///
/// ## Useful-Work Ratio
///
/// `total_busy / wall_clock`. With only writers the ratio stays at or below
/// 1.0, since an exclusive lock serializes every critical section. Shared
/// readers overlap, so read-heavy runs can exceed 1.0.
///
/// ## Example
///
/// ```
/// use std::collections::HashMap;
/// use std::time::Duration;
/// use rank_avl::instrument::ContentionReport;
///
/// let mut busy = HashMap::new();
/// busy.insert(std::thread::current().id(), Duration::from_millis(250));
///
/// let report = ContentionReport::new(Duration::from_secs(1), busy, 1_000);
///
/// assert_eq!(report.useful_work_ratio(), Some(0.25));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContentionReport {
    /// Elapsed time from first spawn to last join
    pub wall_clock: Duration,

    /// Busy time per participating thread
    pub busy_by_thread: HashMap<ThreadId, Duration>,

    /// Number of operations issued by all threads
    pub operations: u64,
}

impl ContentionReport {
    pub fn new(
        wall_clock: Duration,
        busy_by_thread: HashMap<ThreadId, Duration>,
        operations: u64,
    ) -> Self {
        Self {
            wall_clock,
            busy_by_thread,
            operations,
        }
    }

    /// Busy time summed over all threads
    pub fn total_busy(&self) -> Duration {
        self.busy_by_thread.values().sum()
    }

    /// Busy time over wall-clock time.
    ///
    /// Returns None if the wall clock did not advance.
    pub fn useful_work_ratio(&self) -> Option<f64> {
        if self.wall_clock.is_zero() {
            None
        } else {
            Some(self.total_busy().as_secs_f64() / self.wall_clock.as_secs_f64())
        }
    }

    /// Operations per second of wall-clock time.
    ///
    /// Returns None if the wall clock did not advance.
    pub fn throughput(&self) -> Option<f64> {
        if self.wall_clock.is_zero() {
            None
        } else {
            Some(self.operations as f64 / self.wall_clock.as_secs_f64())
        }
    }

    /// Smallest and largest per-thread busy time
    pub fn busy_range(&self) -> Option<(Duration, Duration)> {
        let min = self.busy_by_thread.values().min()?;
        let max = self.busy_by_thread.values().max()?;
        Some((*min, *max))
    }
}

impl fmt::Display for ContentionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Operations:        {:>12}", self.operations)?;
        writeln!(f, "  Threads:           {:>12}", self.busy_by_thread.len())?;
        writeln!(f, "  Wall clock:        {:>12.2?}", self.wall_clock)?;
        writeln!(f, "  Busy (sum):        {:>12.2?}", self.total_busy())?;
        if let Some((min, max)) = self.busy_range() {
            writeln!(f, "  Busy (min/max):    {:>12.2?} / {:.2?}", min, max)?;
        }
        match self.throughput() {
            Some(ops) => writeln!(f, "  Throughput:        {:>12.0} ops/sec", ops)?,
            None => writeln!(f, "  Throughput:        {:>12}", "n/a")?,
        }
        match self.useful_work_ratio() {
            Some(ratio) => write!(f, "  Useful-work ratio: {:>12.5}", ratio),
            None => write!(f, "  Useful-work ratio: {:>12}", "n/a"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
