use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use short_uuid::ShortUuid;
use similar::TextDiff;

use crate::run::RunResult;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Match,
    /// Neither interpreter finished in time; not held against the target.
    BothHung,
    Mismatch(String),
}

impl Outcome {
    /// Why the trial failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Outcome::Mismatch(reason) => Some(reason),
            Outcome::Match | Outcome::BothHung => None,
        }
    }
}

/// Judge the target's run against the gold run of the same script.
pub fn compare(target: &RunResult, gold: &RunResult) -> Outcome {
    match (target.status, gold.status) {
        (None, None) => Outcome::BothHung,
        (None, Some(_)) => Outcome::Mismatch("target timed out".to_string()),
        (Some(_), None) => Outcome::Mismatch("gold timed out".to_string()),
        (Some(t), Some(g)) if t != g => {
            Outcome::Mismatch(format!("exit status {t:?}, gold exited with {g:?}"))
        }
        _ if target.output != gold.output => Outcome::Mismatch("output differs".to_string()),
        _ => Outcome::Match,
    }
}

/// Unified line diff from the gold output to the target output.
pub fn render_diff(target: &RunResult, gold: &RunResult) -> String {
    TextDiff::from_lines(&gold.output, &target.output)
        .unified_diff()
        .context_radius(3)
        .header("gold", "target")
        .to_string()
}

/// Save a failing script and its diff under `out`. Returns the script path.
pub fn record_failure(
    out: &Path,
    script: &str,
    reason: &str,
    target: &RunResult,
    gold: &RunResult,
) -> Result<PathBuf> {
    let id = ShortUuid::generate().to_string();
    let script_path = out.join(format!("{id}.scm"));
    fs::write(&script_path, script)
        .with_context(|| format!("writing {}", script_path.display()))?;

    let diff_path = out.join(format!("{id}.diff"));
    let report = format!("# {reason}\n{}", render_diff(target, gold));
    fs::write(&diff_path, report).with_context(|| format!("writing {}", diff_path.display()))?;
    Ok(script_path)
}

/// Running counts over a harness session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub runs: usize,
    pub matches: usize,
    pub hangs: usize,
    pub failures: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        self.runs += 1;
        match outcome {
            Outcome::Match => self.matches += 1,
            Outcome::BothHung => self.hangs += 1,
            Outcome::Mismatch(_) => self.failures += 1,
        }
    }
}
