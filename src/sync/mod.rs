//! Lock-guarded sequence adapters.
//!
//! Each adapter puts a standard-library sequence behind a single
//! readers-writer lock and exposes the same per-thread busy-time accounting
//! as [`OrderStatisticsTree`](crate::tree::OrderStatisticsTree). Mutations
//! take the lock exclusively, reads take it shared.
//!
//! Reads of an empty sequence return None rather than panicking.

pub mod guarded;
pub mod queue;
pub mod stack;
pub mod vector;

pub use guarded::Guarded;
pub use queue::LockedQueue;
pub use stack::LockedStack;
pub use vector::LockedVector;
