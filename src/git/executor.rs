//! Subprocess execution for git commands.
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! existing git config, SSH agent, and credential store.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::GitError;

/// Default timeout for a single git invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "AUTOPUSH_GIT_TIMEOUT";

/// Get the configured git command timeout.
///
/// Reads from AUTOPUSH_GIT_TIMEOUT if set, otherwise uses the default of
/// 60 seconds. Logs a warning if the variable holds an invalid value.
pub fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Check that git is installed and on PATH.
pub fn check_git_installed() -> Result<PathBuf, GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful invocation with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for executing git commands.
///
/// Implementations never fail: spawn errors and timeouts are reported as an
/// unsuccessful [`CommandOutput`]. This abstraction allows scripting git in tests.
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run `git` with the given arguments.
    async fn run(&self, args: &[&str]) -> CommandOutput;
}

#[async_trait]
impl<T: GitExecutor + ?Sized> GitExecutor for Arc<T> {
    async fn run(&self, args: &[&str]) -> CommandOutput {
        (**self).run(args).await
    }
}

/// Executor that spawns the real git binary inside a repository path.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: OsString,
    repo_path: PathBuf,
    timeout: Duration,
}

impl SystemGit {
    pub fn new(repo_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self::with_program("git", repo_path, timeout)
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(
        program: impl Into<OsString>,
        repo_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            repo_path: repo_path.into(),
            timeout,
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    async fn try_run(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let output = timeout(
            self.timeout,
            Command::new(&self.program)
                .args(args)
                .current_dir(&self.repo_path)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| GitError::Timeout {
            command: args.join(" "),
            secs: self.timeout.as_secs(),
        })?
        .map_err(GitError::SpawnFailed)?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[async_trait]
impl GitExecutor for SystemGit {
    async fn run(&self, args: &[&str]) -> CommandOutput {
        debug!("Running git {}", args.join(" "));
        match self.try_run(args).await {
            Ok(output) => {
                if !output.success {
                    debug!("git {} failed: {}", args.join(" "), output.stderr.trim());
                }
                output
            }
            Err(e) => {
                debug!("git {} could not run: {}", args.join(" "), e);
                CommandOutput::failed(e.to_string())
            }
        }
    }
}
