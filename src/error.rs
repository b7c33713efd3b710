//! Error types.
//!
//! Tree and sequence operations are total and never return errors. The two
//! places that can fail are the structural self-check (`validate`) and the
//! harness configuration. `HarnessError` joins both for the binary.

use thiserror::Error;

/// A broken structural invariant, reported by `validate()`.
///
/// Node positions are slab keys, which stay meaningful until the next
/// mutation of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("node {node} is unbalanced (balance factor {balance})")]
    Unbalanced { node: usize, balance: i32 },

    #[error("node {node} stores height {stored}, subtree height is {actual}")]
    StaleHeight { node: usize, stored: u8, actual: u8 },

    #[error("node {node} stores rank {stored}, left subtree implies {expected}")]
    StaleRank {
        node: usize,
        stored: usize,
        expected: usize,
    },

    #[error("node {node} breaks in-order key ordering")]
    OutOfOrder { node: usize },

    #[error("{reachable} nodes reachable from the root but {allocated} allocated")]
    Unreachable { reachable: usize, allocated: usize },
}

/// Rejected workload configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("thread count must be at least 1")]
    NoThreads,

    #[error("operations per thread must be at least 1")]
    NoOperations,

    #[error("key space must be positive, got {0}")]
    EmptyKeySpace(i64),

    #[error("operation mix has no positive weight")]
    EmptyMix,
}

/// Why a harness run did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("invalid workload: {0}")]
    Config(#[from] ConfigError),

    #[error("tree invariant violated after run: {0}")]
    Invariant(#[from] InvariantError),
}
