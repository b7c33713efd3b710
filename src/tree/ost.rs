//! Concurrent order-statistics tree.
//!
//! ## Architecture
//!
//! - **BalanceEngine**: the AVL tree itself, nodes in a slab arena
//! - **RwLock**: one readers-writer lock around the whole engine
//! - **WorkLedger**: per-thread busy time, behind its own small mutex
//!
//! ## Lock Discipline
//!
//! - `insert`, `remove`, `clear` take the lock exclusively
//! - every query takes it shared
//! - no call ever holds more than one lock, so no deadlock is possible
//!
//! Each call holds its lock for the whole recursive mutation, so a reader
//! never observes a half-finished rotation chain.
//!
//! ## Example
//!
//! ```
//! use rank_avl::tree::OrderStatisticsTree;
//!
//! let tree = OrderStatisticsTree::new();
//! tree.insert(5);
//! tree.insert(10);
//! tree.insert(1);
//! tree.insert(7);
//! tree.remove(5);
//!
//! assert!(!tree.contains(5));
//! assert!(tree.contains(7));
//! assert_eq!(tree.select(2), Some(7));
//! ```

use std::collections::HashMap;
use std::thread::ThreadId;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::engine::BalanceEngine;
use crate::error::InvariantError;
use crate::instrument::{BusyTime, WorkLedger};
use crate::tree::digest::{self, FingerprintKey};

/// Thread-safe rank-augmented AVL tree with critical-section accounting.
///
/// Keys are returned by value, so `K: Clone` is required for queries that
/// hand keys back (`select`, `min`, `max`, `to_vec`).
#[derive(Debug)]
pub struct OrderStatisticsTree<K> {
    /// The tree, guarded by a single readers-writer lock
    engine: RwLock<BalanceEngine<K>>,

    /// Busy time per calling thread
    ledger: WorkLedger,
}

impl<K> Default for OrderStatisticsTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderStatisticsTree<K> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::from_engine(BalanceEngine::new())
    }

    /// Create a tree with pre-allocated node slots
    ///
    /// # Example
    ///
    /// ```
    /// use rank_avl::tree::OrderStatisticsTree;
    ///
    /// let tree: OrderStatisticsTree<i64> = OrderStatisticsTree::with_capacity(100_000);
    /// assert!(tree.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_engine(BalanceEngine::with_capacity(capacity))
    }

    /// Wrap an already-built engine
    pub fn from_engine(engine: BalanceEngine<K>) -> Self {
        Self {
            engine: RwLock::new(engine),
            ledger: WorkLedger::new(),
        }
    }

    /// Consume the tree and return the engine
    pub fn into_engine(self) -> BalanceEngine<K> {
        self.engine.into_inner()
    }

    // ========================================================================
    // Critical Sections
    // ========================================================================

    /// Run `op` under the shared lock, recording the time spent holding it.
    fn with_shared<R>(&self, op: impl FnOnce(&BalanceEngine<K>) -> R) -> R {
        let guard = self.engine.read();
        let started = Instant::now();
        let out = op(&*guard);
        let busy = started.elapsed();
        drop(guard);
        self.ledger.record(busy);
        out
    }

    /// Run `op` under the exclusive lock, recording the time spent holding it.
    fn with_exclusive<R>(&self, op: impl FnOnce(&mut BalanceEngine<K>) -> R) -> R {
        let mut guard = self.engine.write();
        let started = Instant::now();
        let out = op(&mut *guard);
        let busy = started.elapsed();
        drop(guard);
        self.ledger.record(busy);
        out
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of pre-allocated node slots
    pub fn capacity(&self) -> usize {
        self.with_shared(|engine| engine.capacity())
    }

    /// Number of keys stored, duplicates included
    pub fn len(&self) -> usize {
        self.with_shared(|engine| engine.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with_shared(|engine| engine.is_empty())
    }

    /// Height of the tree, 0 when empty
    pub fn height(&self) -> u8 {
        self.with_shared(|engine| engine.height())
    }

    /// Remove every key
    pub fn clear(&self) {
        self.with_exclusive(|engine| engine.clear());
    }
}

impl<K: Ord> OrderStatisticsTree<K> {
    /// Insert one occurrence of `key`. Duplicates are kept.
    pub fn insert(&self, key: K) {
        self.with_exclusive(|engine| engine.insert(key));
    }

    /// Remove one occurrence of `key`.
    ///
    /// Absent keys are a no-op: membership is checked under the exclusive
    /// lock before any rank is touched. Returns whether a key was removed.
    pub fn remove(&self, key: K) -> bool {
        self.with_exclusive(|engine| engine.remove(&key))
    }

    /// Binary search by key
    pub fn contains(&self, key: K) -> bool {
        self.with_shared(|engine| engine.contains(&key))
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<(), InvariantError> {
        self.with_shared(|engine| engine.validate())
    }
}

impl<K: Ord + Clone> OrderStatisticsTree<K> {
    /// The `rank`-th smallest key, 1-based.
    ///
    /// # Returns
    ///
    /// None when `rank` is outside `1..=len()`
    ///
    /// # Example
    ///
    /// ```
    /// use rank_avl::tree::OrderStatisticsTree;
    ///
    /// let tree = OrderStatisticsTree::new();
    /// for key in [5, 10, 1, 7] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.select(1), Some(1));
    /// assert_eq!(tree.select(4), Some(10));
    /// assert_eq!(tree.select(0), None);
    /// assert_eq!(tree.select(5), None);
    /// ```
    pub fn select(&self, rank: usize) -> Option<K> {
        self.with_shared(|engine| engine.select(rank).cloned())
    }

    /// Smallest key
    pub fn min(&self) -> Option<K> {
        self.with_shared(|engine| engine.min().cloned())
    }

    /// Largest key
    pub fn max(&self) -> Option<K> {
        self.with_shared(|engine| engine.max().cloned())
    }

    /// All keys in sorted order
    pub fn to_vec(&self) -> Vec<K> {
        self.with_shared(|engine| engine.iter().cloned().collect())
    }
}

impl<K: FingerprintKey> OrderStatisticsTree<K> {
    /// SHA-256 of the sorted key sequence
    pub fn fingerprint(&self) -> [u8; 32] {
        self.with_shared(|engine| digest::fingerprint(engine.iter()))
    }

    /// Fingerprint as a hex string
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint())
    }
}

impl<K> BusyTime for OrderStatisticsTree<K> {
    fn work_by_thread(&self) -> HashMap<ThreadId, Duration> {
        self.ledger.snapshot()
    }

    fn reset_work(&self) {
        self.ledger.reset();
    }
}

impl<K: Ord> FromIterator<K> for OrderStatisticsTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut engine = BalanceEngine::new();
        for key in iter {
            engine.insert(key);
        }
        Self::from_engine(engine)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
