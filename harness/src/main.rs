use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{debug, info};
use scheme_gen::{script, ProgramGenerator};

mod config;
mod run;
mod trial;

use crate::run::{run, Input};
use crate::trial::{compare, record_failure, Tally};

/// Differentially test a Scheme interpreter against a reference one on
/// randomly generated programs.
#[derive(Parser, Debug)]
struct Args {
    /// Interpreter under test
    target: PathBuf,
    /// Reference interpreter
    gold: PathBuf,
    /// Directory that receives failing scripts and their diffs
    out: PathBuf,

    /// Path to .toml configuration for the generator
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of programs to try
    #[arg(short, long, default_value_t = 100)]
    num_trials: usize,
    /// Seconds to wait for each interpreter before killing it
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,
    /// Seed for the program stream; drawn at random when absent
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(..=config::MAX_SEED))]
    seed: Option<u64>,
    /// Pass each program as a file path instead of on stdin
    #[arg(long)]
    pass_file: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Args::parse();

    if !cli.out.is_dir() {
        bail!("output directory {} doesn't exist", cli.out.display());
    }

    let mut configuration = config::load(cli.config.as_deref())?;
    let seed = config::resolve_seed(&mut configuration, cli.seed)?;
    info!("generating with seed {seed}");

    // Recorded once so any saved failure can be regenerated.
    let config_path = cli.out.join("config.toml");
    fs::write(&config_path, toml::to_string(&configuration)?)
        .with_context(|| format!("writing {}", config_path.display()))?;

    let mut generator = ProgramGenerator::from_config(configuration)?;
    let input = if cli.pass_file { Input::File } else { Input::Stdin };
    let timeout = Duration::from_secs(cli.timeout);
    let mut tally = Tally::default();

    for i in 0..cli.num_trials {
        let test_case = script(&generator.generate()?);
        let gold = run(&cli.gold, &test_case, input, timeout)?;
        let target = run(&cli.target, &test_case, input, timeout)?;

        let outcome = compare(&target, &gold);
        debug!(
            "trial {i}: {outcome:?} (target finished: {}, gold finished: {})",
            target.terminated(),
            gold.terminated()
        );
        if let Some(reason) = outcome.failure() {
            let path = record_failure(&cli.out, &test_case, reason, &target, &gold)?;
            println!("{} {} ({reason})", "MISMATCH".red().bold(), path.display());
        }
        tally.record(&outcome);
    }

    println!(
        "{} runs: {} matched, {} hung on both sides, {} failed (seed {seed})",
        tally.runs,
        tally.matches.to_string().green(),
        tally.hangs.to_string().yellow(),
        if tally.failures == 0 {
            tally.failures.to_string().green()
        } else {
            tally.failures.to_string().red().bold()
        },
    );

    Ok(if tally.failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
