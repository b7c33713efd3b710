//! Balancing engine for the order-statistics tree.
//!
//! ## Design Principles
//!
//! The engine is designed for:
//!
//! 1. **No concurrency awareness**: callers supply exclusive access
//! 2. **Arena storage**: nodes live in a slab, children are slab keys
//! 3. **O(1) rank maintenance**: rotations adjust ranks from pre-rotation values
//! 4. **Multiset semantics**: duplicate keys are kept and descend right
//!
//! ## Operations
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(log n) |
//! | Remove | O(log n) |
//! | Contains | O(log n) |
//! | Select k-th | O(log n) |
//! | Validate | O(n) |
//!
//! ## Example
//!
//! ```
//! use rank_avl::engine::BalanceEngine;
//!
//! let mut engine = BalanceEngine::new();
//! for key in 0..100 {
//!     engine.insert(key);
//! }
//!
//! assert_eq!(engine.select(50), Some(&49));
//! assert!(engine.validate().is_ok());
//! ```

pub mod balance;

pub use balance::{BalanceEngine, Iter};
