//! Contention workloads.
//!
//! Drives one shared structure from several threads with a seeded,
//! weighted operation mix and summarizes the result as a
//! [`ContentionReport`](crate::instrument::ContentionReport).
//!
//! ## Determinism
//!
//! Each worker owns a `ChaCha8Rng` seeded with `seed + worker`, so the
//! sequence of operations each worker issues is reproducible. The
//! interleaving between workers is not.

pub mod config;
pub mod runner;

pub use config::{Op, OpMix, WorkloadConfig};
pub use runner::{run_sequence_workload, run_tree_workload, SequenceLoad};
