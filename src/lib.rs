//! # rank-avl
//!
//! Concurrent order-statistics tree with lock contention accounting.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Engine**: rank-augmented AVL algorithms over a slab arena
//! - **Tree**: thread-safe wrapper with one readers-writer lock
//! - **Instrument**: per-thread critical-section time and contention reports
//! - **Sync**: lock-guarded stack, queue and vector with the same accounting
//! - **Workload**: seeded multi-threaded runners for the harness binary
//!
//! ## Design Principles
//!
//! 1. **Arena ownership**: nodes are slab entries, children are slab keys
//! 2. **O(1) rank upkeep**: rotations fix ranks from pre-rotation values
//! 3. **Coarse locking**: one lock per structure, writers exclusive
//! 4. **Honest timing**: only lock-held time is counted, never lock waits
//!
//! ## Example
//!
//! ```
//! use rank_avl::{BusyTime, OrderStatisticsTree};
//!
//! let tree = OrderStatisticsTree::new();
//! for key in [5, 10, 1, 7] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.select(3), Some(7));
//! assert_eq!(tree.work_by_thread().len(), 1);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types: invariant violations, configuration errors
pub mod error;

/// Balancing engine: AVL insert/remove/select over a slab
pub mod engine;

/// Order-statistics tree: locking, timing, fingerprints
pub mod tree;

/// Contention instrumentation: work ledger, reports
pub mod instrument;

/// Lock-guarded sequence adapters
pub mod sync;

/// Multi-threaded workload runners
pub mod workload;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::BalanceEngine;
pub use error::{ConfigError, HarnessError, InvariantError};
pub use instrument::{BusyTime, ContentionReport, WorkLedger};
pub use sync::{LockedQueue, LockedStack, LockedVector};
pub use tree::OrderStatisticsTree;
pub use workload::{run_sequence_workload, run_tree_workload, OpMix, WorkloadConfig};
