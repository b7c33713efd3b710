//! rank-avl - contention harness
//!
//! Spawns worker threads against one shared structure, drives a seeded
//! operation mix, and prints how much of the wall-clock time was spent
//! inside critical sections.
//!
//! ```bash
//! RUST_LOG=debug rank-avl --structure tree --threads 4 --ops 100000
//! ```

use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use rank_avl::{
    run_sequence_workload, run_tree_workload, ContentionReport, HarnessError, InvariantError,
    LockedQueue, LockedStack, LockedVector, OpMix, OrderStatisticsTree, WorkloadConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Structure {
    Tree,
    Stack,
    Queue,
    Vector,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Structure to put under load
    #[arg(short, long, value_enum, default_value_t = Structure::Tree)]
    structure: Structure,

    /// Worker threads
    #[arg(short, long, default_value_t = 3)]
    threads: usize,

    /// Operations per worker
    #[arg(short, long, default_value_t = 100_000)]
    ops: usize,

    /// Keys 0..N inserted before the timed run
    #[arg(long, default_value_t = 0)]
    prefill: usize,

    /// Keys are drawn from 0..N
    #[arg(short, long, default_value_t = 100_000)]
    key_space: i64,

    /// Base RNG seed, worker t uses seed + t
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Relative weight of insert (push)
    #[arg(long, default_value_t = 2)]
    insert: u32,

    /// Relative weight of remove (pop)
    #[arg(long, default_value_t = 1)]
    remove: u32,

    /// Relative weight of contains (peek)
    #[arg(long, default_value_t = 1)]
    contains: u32,

    /// Relative weight of select (peek)
    #[arg(long, default_value_t = 1)]
    select: u32,
}

impl Cli {
    fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            threads: self.threads,
            ops_per_thread: self.ops,
            prefill: self.prefill,
            key_space: self.key_space,
            seed: self.seed,
            mix: OpMix {
                insert: self.insert,
                remove: self.remove,
                contains: self.contains,
                select: self.select,
            },
        }
    }
}

/// A tree run only counts if the tree still satisfies every invariant.
fn checked_tree_report(
    report: ContentionReport,
    invariants: Result<(), InvariantError>,
) -> Result<ContentionReport, HarnessError> {
    invariants?;
    println!("  Invariants:        {:>12}", "OK");
    Ok(report)
}

fn run(structure: Structure, config: &WorkloadConfig) -> Result<ContentionReport, HarnessError> {
    match structure {
        Structure::Tree => {
            let tree = OrderStatisticsTree::with_capacity(config.prefill);
            let report = run_tree_workload(&tree, config)?;
            println!("  Final tree size:   {:>12}", tree.len());
            println!("  Final tree height: {:>12}", tree.height());
            println!("  Fingerprint:       {}", tree.fingerprint_hex());
            checked_tree_report(report, tree.validate())
        }
        Structure::Stack => Ok(run_sequence_workload(&LockedStack::<i64>::new(), config)?),
        Structure::Queue => Ok(run_sequence_workload(&LockedQueue::<i64>::new(), config)?),
        Structure::Vector => Ok(run_sequence_workload(&LockedVector::<i64>::new(), config)?),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.workload();
    log::debug!("{:?}", config);

    println!("===========================================");
    println!("  rank-avl contention harness: {:?}", cli.structure);
    println!("===========================================");
    println!();

    match run(cli.structure, &config) {
        Ok(report) => {
            println!("{}", report);
            log::info!(
                "{:?}: ratio {:?} over {} threads",
                cli.structure,
                report.useful_work_ratio(),
                config.threads
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
