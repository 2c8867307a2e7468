use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use subprocess::{ExitStatus, Popen, PopenConfig, Redirection};
use tempfile::NamedTempFile;

/// How a script reaches the interpreter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Input {
    /// Written to the interpreter's stdin.
    Stdin,
    /// Written to a temporary file whose path is the only argument.
    File,
}

/// Result of one interpreter invocation.
#[derive(Debug)]
pub struct RunResult {
    /// Everything written to stdout, lossily decoded.
    pub output: String,
    /// `None` if the interpreter had to be killed after the timeout.
    pub status: Option<ExitStatus>,
}

impl RunResult {
    pub fn terminated(&self) -> bool {
        self.status.is_some()
    }
}

/// Run `interpreter` on `script` for at most `timeout` of wall-clock time,
/// killing it once that runs out. Stderr is captured and dropped.
pub fn run(interpreter: &Path, script: &str, input: Input, timeout: Duration) -> Result<RunResult> {
    // Held until the process is gone.
    let file = match input {
        Input::File => {
            let file = NamedTempFile::new()?;
            fs::write(&file, script)?;
            Some(file)
        }
        Input::Stdin => None,
    };

    let mut argv: Vec<&OsStr> = vec![interpreter.as_os_str()];
    if let Some(ref f) = file {
        argv.push(f.path().as_os_str());
    }

    let deadline = Instant::now() + timeout;
    let mut p = Popen::create(
        &argv[..],
        PopenConfig {
            stdin: match input {
                Input::Stdin => Redirection::Pipe,
                Input::File => Redirection::None,
            },
            stdout: Redirection::Pipe,
            stderr: Redirection::Pipe,
            ..Default::default()
        },
    )
    .with_context(|| format!("starting {}", interpreter.display()))?;

    let stdin_data = match input {
        Input::Stdin => Some(script.as_bytes().to_vec()),
        Input::File => None,
    };
    let mut communicator = p.communicate_start(stdin_data).limit_time(timeout);
    let (stdout, timed_out) = match communicator.read() {
        Ok((out, _)) => (out.unwrap_or_default(), false),
        Err(err) => {
            log::debug!("{} stopped communicating: {}", interpreter.display(), err.error);
            (
                err.capture.0.unwrap_or_default(),
                err.error.kind() == io::ErrorKind::TimedOut,
            )
        }
    };

    // Closing stdout early does not buy the process a second timeout.
    let status = if timed_out {
        None
    } else {
        p.wait_timeout(deadline.saturating_duration_since(Instant::now()))?
    };
    if status.is_none() {
        p.kill()?;
        p.wait()?;
    }

    Ok(RunResult {
        output: String::from_utf8_lossy(&stdout).into_owned(),
        status,
    })
}
