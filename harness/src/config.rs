use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use scheme_gen::ProgramConfig;

/// Read a TOML generator configuration, or take the defaults.
pub fn load(path: Option<&Path>) -> Result<ProgramConfig> {
    let Some(path) = path else {
        return Ok(ProgramConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    text.parse::<ProgramConfig>()
        .with_context(|| format!("parsing configuration {}", path.display()))
}

/// Largest seed that survives a round trip through TOML, whose integers are
/// signed 64-bit.
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Pin the seed so the run can be replayed, drawing one if none was given.
pub fn resolve_seed(config: &mut ProgramConfig, requested: Option<u64>) -> Result<u64> {
    if requested.is_some() {
        config.seed = requested;
    }
    let seed = *config.seed.get_or_insert_with(|| rand::random::<u64>() >> 1);
    if seed > MAX_SEED {
        bail!("seed {seed} is larger than {MAX_SEED}");
    }
    Ok(seed)
}
