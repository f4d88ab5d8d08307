//! Runs the body text as a program in a restricted child process.
//!
//! The body is written to a script in a fresh temporary directory and
//! handed to the configured interpreter. The child gets a cleared
//! environment, null stdin, the scratch directory as its working
//! directory and a wall-clock deadline. Nothing runs in-process.
//!
//! Captured stdout and stderr go to unnamed temp files. `max_output_bytes`
//! bounds what is read back; the files themselves are bounded at
//! [`CAPTURE_LIMIT_FACTOR`] times that, after which the child is killed.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use codepad_config::RunModuleConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Capture files may grow to this multiple of `max_output_bytes`.
pub const CAPTURE_LIMIT_FACTOR: u64 = 16;

/// Why a run counts as "Invalid Code".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// The interpreter could not be started or the script not staged.
    Spawn(String),
    /// The interpreter exited unsuccessfully. `None` when killed by a signal.
    ExitStatus(Option<i32>),
    TimedOut,
    /// Stdout or stderr outgrew the capture limit on disk.
    OutputLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Running code is switched off in the config.
    Disabled,
    Completed {
        stdout: String,
        truncated: bool,
    },
    /// `stdout` holds whatever the program printed before the fault.
    Failed {
        stdout: String,
        truncated: bool,
        reason: RunFailure,
    },
}

impl RunOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Executes module source according to a [`RunModuleConfig`].
#[derive(Debug, Clone)]
pub struct ModuleRunner {
    config: RunModuleConfig,
}

impl ModuleRunner {
    pub fn new(config: RunModuleConfig) -> Self {
        Self { config }
    }

    /// A runner that never executes anything.
    pub fn disabled() -> Self {
        Self::new(RunModuleConfig {
            enabled: false,
            ..RunModuleConfig::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &RunModuleConfig {
        &self.config
    }

    pub fn run(&self, source: &str) -> RunOutcome {
        if !self.config.enabled {
            return RunOutcome::Disabled;
        }
        match self.execute(source) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Run Module failed to start: {e:#}");
                RunOutcome::Failed {
                    stdout: String::new(),
                    truncated: false,
                    reason: RunFailure::Spawn(format!("{e:#}")),
                }
            }
        }
    }

    fn execute(&self, source: &str) -> Result<RunOutcome> {
        let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
        let script = scratch
            .path()
            .join(format!("module.{}", self.config.script_extension));
        std::fs::write(&script, source)
            .with_context(|| format!("Failed to write script: {}", script.display()))?;

        let mut stdout_file = tempfile::tempfile().context("Failed to create stdout capture")?;
        let mut stderr_file = tempfile::tempfile().context("Failed to create stderr capture")?;

        let mut command = Command::new(&self.config.interpreter);
        command
            .args(&self.config.args)
            .arg(&script)
            .current_dir(scratch.path())
            .env_clear()
            .stdin(Stdio::null())
            .stdout(Stdio::from(
                stdout_file.try_clone().context("Failed to share stdout capture")?,
            ))
            .stderr(Stdio::from(
                stderr_file.try_clone().context("Failed to share stderr capture")?,
            ));
        for key in ["PATH", "SYSTEMROOT"] {
            if let Some(value) = std::env::var_os(key) {
                command.env(key, value);
            }
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to spawn interpreter: {}", self.config.interpreter))?;
        tracing::debug!(pid = child.id(), "Module started");

        let disk_limit =
            (self.config.max_output_bytes as u64).saturating_mul(CAPTURE_LIMIT_FACTOR);
        let captures = [&stdout_file, &stderr_file];
        let exit = wait_with_limits(&mut child, self.config.timeout(), disk_limit, &captures)?;

        let (stdout, truncated) = read_capped(&mut stdout_file, self.config.max_output_bytes)?;
        let (stderr, _) = read_capped(&mut stderr_file, self.config.max_output_bytes)?;
        if !stderr.is_empty() {
            tracing::debug!("Module stderr:\n{stderr}");
        }

        Ok(match exit {
            Exit::Status(status) if status.success() => RunOutcome::Completed { stdout, truncated },
            Exit::Status(status) => RunOutcome::Failed {
                stdout,
                truncated,
                reason: RunFailure::ExitStatus(status.code()),
            },
            Exit::Killed(reason) => RunOutcome::Failed {
                stdout,
                truncated,
                reason,
            },
        })
    }
}

enum Exit {
    Status(ExitStatus),
    Killed(RunFailure),
}

/// Polls the child until it exits. It is killed and reaped when `timeout`
/// elapses or any capture file grows past `disk_limit` bytes.
fn wait_with_limits(
    child: &mut Child,
    timeout: Duration,
    disk_limit: u64,
    captures: &[&File],
) -> Result<Exit> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().context("Failed to poll module process")? {
            return Ok(Exit::Status(status));
        }
        let reason = if Instant::now() >= deadline {
            tracing::warn!(pid = child.id(), "Module timed out after {timeout:?}, killing");
            Some(RunFailure::TimedOut)
        } else if over_limit(captures, disk_limit)? {
            tracing::warn!(pid = child.id(), disk_limit, "Module output too large, killing");
            Some(RunFailure::OutputLimit)
        } else {
            None
        };
        if let Some(reason) = reason {
            // Already exited between the poll and the kill
            let _ = child.kill();
            child.wait().context("Failed to reap module process")?;
            return Ok(Exit::Killed(reason));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn over_limit(captures: &[&File], limit: u64) -> Result<bool> {
    for file in captures {
        let len = file.metadata().context("Failed to stat capture")?.len();
        if len > limit {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Reads at most `cap` bytes from the start of `file`, lossily decoded.
fn read_capped(file: &mut File, cap: usize) -> Result<(String, bool)> {
    file.seek(SeekFrom::Start(0))
        .context("Failed to rewind capture")?;
    let mut buf = Vec::new();
    file.by_ref()
        .take(cap as u64 + 1)
        .read_to_end(&mut buf)
        .context("Failed to read capture")?;
    let truncated = buf.len() > cap;
    buf.truncate(cap);
    Ok((String::from_utf8_lossy(&buf).into_owned(), truncated))
}
