//! Performance analysis for the allocation-reuse trade-off.
//!
//! This executable compares the two ways of driving the Hermitian eigensolver: the
//! one-shot call, which acquires and releases every buffer on each solve, and the
//! reusable solver, which allocates once per order and then only computes. For each order
//! it times a batch of repeated solves and records the peak resident set size.
//!
//! Each path runs in its own worker process so that the peak RSS of one does not leak
//! into the measurements of the other. Workers run one after another, never
//! concurrently, and stream their rows back over stdout.

use anyhow::{Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use cmatrix::{
    HermitianEigensolver, eigensystem_hermitian,
    utils::{generate::random_lower, perf::peak_rss_kb},
};
use serde::{Deserialize, Serialize};
use std::{
    path::PathBuf,
    process::{Command, Stdio},
    time::Instant,
};

/// Defines the solver path to be executed in a worker process.
#[derive(ValueEnum, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum SolverVariant {
    /// `eigensystem_hermitian` per problem.
    OneShot,
    /// One `HermitianEigensolver` per order.
    Reusable,
}

/// Command-line arguments for the workspace trade-off experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "workspace-tradeoff-runner",
    about = "Compares one-shot and reusable Hermitian eigensolves over a range of orders."
)]
struct TradeoffArgs {
    /// The smallest matrix order.
    #[clap(long, default_value_t = 16)]
    n_start: usize,
    /// The largest matrix order.
    #[clap(long, default_value_t = 512)]
    n_end: usize,
    /// The step size for increasing the order.
    #[clap(long, default_value_t = 16)]
    n_step: usize,
    /// Number of solves per order.
    #[clap(long, default_value_t = 20)]
    repeats: usize,
    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
    /// Set by the orchestrator on its child processes.
    #[clap(long, value_enum, hide = true)]
    worker: Option<SolverVariant>,
}

/// A single row of the output CSV file.
#[derive(Debug, Serialize, Deserialize)]
struct TradeoffResult {
    variant: SolverVariant,
    n: usize,
    repeats: usize,
    time_s: f64,
    rss_kb: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = TradeoffArgs::parse();
    match args.worker {
        Some(variant) => run_worker(&args, variant),
        None => run_orchestrator(&args),
    }
}

/// Runs one worker per variant in sequence and appends its rows to the output file.
fn run_orchestrator(args: &TradeoffArgs) -> Result<()> {
    let current_exe = std::env::current_exe()?;
    let mut writer = csv::Writer::from_path(&args.output)?;

    for variant in SolverVariant::value_variants() {
        let name = variant
            .to_possible_value()
            .ok_or_else(|| anyhow!("Variant {variant:?} has no command-line name"))?;
        log::info!("Running worker for variant: {variant:?}");

        let output = Command::new(&current_exe)
            .args(std::env::args_os().skip(1))
            .args(["--worker", name.get_name()])
            .stderr(Stdio::inherit())
            .output()?;
        if !output.status.success() {
            bail!("Worker for variant {variant:?} failed with status: {}", output.status);
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(output.stdout.as_slice());
        for record in rdr.deserialize::<TradeoffResult>() {
            writer.serialize(record?)?;
        }
    }

    writer.flush()?;
    log::info!("Workspace trade-off experiment complete. Results saved to {:?}.", args.output);
    Ok(())
}

/// Times `args.repeats` solves per order with a single solver variant.
fn run_worker(args: &TradeoffArgs, variant: SolverVariant) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(std::io::stdout());

    for n in (args.n_start..=args.n_end).step_by(args.n_step.max(1)) {
        if n == 0 {
            continue;
        }
        log::info!("Worker {variant:?}: Running for n = {n}...");

        // Problems are generated up front so only the solves are timed.
        let problems = (0..args.repeats as u64)
            .map(|seed| random_lower(n, seed))
            .collect::<Result<Vec<_>, _>>()?;

        let start_time = Instant::now();
        match variant {
            SolverVariant::OneShot => {
                for m in &problems {
                    eigensystem_hermitian(m)?;
                }
            }
            SolverVariant::Reusable => {
                let mut solver = HermitianEigensolver::new(n)?;
                for m in &problems {
                    solver.solve(m)?;
                }
            }
        }
        let time_s = start_time.elapsed().as_secs_f64();

        writer.serialize(TradeoffResult {
            variant,
            n,
            repeats: args.repeats,
            time_s,
            rss_kb: peak_rss_kb(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
