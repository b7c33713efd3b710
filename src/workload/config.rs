//! Workload configuration.

use crate::error::ConfigError;

/// Relative weights of the four operation kinds.
///
/// For sequence adapters, `insert` maps to push, `remove` to pop, and both
/// `contains` and `select` to a peek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpMix {
    pub insert: u32,
    pub remove: u32,
    pub contains: u32,
    pub select: u32,
}

impl Default for OpMix {
    /// Write-heavy mix: 40% insert, 20% remove, 20% contains, 20% select
    fn default() -> Self {
        Self {
            insert: 2,
            remove: 1,
            contains: 1,
            select: 1,
        }
    }
}

impl OpMix {
    /// Sum of all weights
    pub fn total(&self) -> u64 {
        u64::from(self.insert)
            + u64::from(self.remove)
            + u64::from(self.contains)
            + u64::from(self.select)
    }

    /// Map a roll in `0..total()` to an operation.
    pub fn pick(&self, roll: u64) -> Op {
        let mut roll = roll;
        for (weight, op) in [
            (self.insert, Op::Insert),
            (self.remove, Op::Remove),
            (self.contains, Op::Contains),
        ] {
            let weight = u64::from(weight);
            if roll < weight {
                return op;
            }
            roll -= weight;
        }
        Op::Select
    }
}

/// One operation kind drawn from an [`OpMix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    Remove,
    Contains,
    Select,
}

/// Parameters of one multi-threaded run.
///
/// ## Example
///
/// ```
/// use rank_avl::workload::WorkloadConfig;
///
/// let config = WorkloadConfig {
///     threads: 4,
///     ops_per_thread: 10_000,
///     ..WorkloadConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Worker threads sharing one structure
    pub threads: usize,

    /// Operations issued by each worker
    pub ops_per_thread: usize,

    /// Keys `0..prefill` inserted before the timed run
    pub prefill: usize,

    /// Keys are drawn from `0..key_space`, ranks from `1..=key_space`
    pub key_space: i64,

    /// Worker `t` seeds its RNG with `seed + t`
    pub seed: u64,

    pub mix: OpMix,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            threads: 3,
            ops_per_thread: 100_000,
            prefill: 0,
            key_space: 100_000,
            seed: 42,
            mix: OpMix::default(),
        }
    }
}

impl WorkloadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if self.ops_per_thread == 0 {
            return Err(ConfigError::NoOperations);
        }
        if self.key_space <= 0 {
            return Err(ConfigError::EmptyKeySpace(self.key_space));
        }
        if self.mix.total() == 0 {
            return Err(ConfigError::EmptyMix);
        }
        Ok(())
    }

    /// Operations issued by all workers together
    pub fn total_operations(&self) -> u64 {
        (self.threads as u64) * (self.ops_per_thread as u64)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
