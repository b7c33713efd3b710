//! Order-statistics tree module.
//!
//! ## Architecture
//!
//! The tree is a rank-augmented AVL tree with:
//!
//! - **Slab-based storage**: nodes addressed by stable `usize` keys
//! - **Rank field**: 1 + size of the left subtree, for O(log n) selection
//! - **Single RwLock**: writers exclusive, readers shared
//! - **Work ledger**: per-thread time spent inside critical sections
//!
//! ## Components
//!
//! - [`Node`]: key plus rank, height and child slab keys
//! - [`OrderStatisticsTree`]: thread-safe public API
//! - [`digest`]: content fingerprints of the sorted key sequence
//!
//! ## Performance
//!
//! | Operation | Lock | Complexity |
//! |-----------|------|------------|
//! | insert | exclusive | O(log n) |
//! | remove | exclusive | O(log n) |
//! | contains | shared | O(log n) |
//! | select | shared | O(log n) |
//! | to_vec / fingerprint / validate | shared | O(n) |

pub mod digest;
pub mod node;
pub mod ost;

pub use digest::FingerprintKey;
pub use node::Node;
pub use ost::OrderStatisticsTree;
