use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use scheme_gen::{script, ProgramGenerator};

mod config;

/// Print randomly generated Scheme programs, each followed by `(exit)`.
#[derive(Parser, Debug)]
struct Args {
    /// Path to .toml configuration for the generator
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Nesting level past which only leaves are generated
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,
    /// Seed for the program stream; drawn at random when absent
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(..=config::MAX_SEED))]
    seed: Option<u64>,
    /// Number of programs to print
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Args::parse();

    let mut configuration = config::load(cli.config.as_deref())?;
    if let Some(max_depth) = cli.max_depth {
        configuration.max_depth = max_depth;
    }
    let seed = config::resolve_seed(&mut configuration, cli.seed)?;
    info!("generating with seed {seed}");

    let mut generator = ProgramGenerator::from_config(configuration)?;
    let mut out = io::stdout().lock();
    for _ in 0..cli.count {
        out.write_all(script(&generator.generate()?).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
