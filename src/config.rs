//! Runtime configuration for the autopush pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::git::{DEFAULT_TIMEOUT_SECS, repo_name};

/// Default delay before pushing, so rapid successive edits batch into one push.
pub const DEFAULT_PUSH_DELAY_SECS: u64 = 60;

/// Default debounce after a change is detected in watch mode.
pub const DEFAULT_DEBOUNCE_SECS: u64 = 2;

/// Default interval between status polls in watch mode.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default remote used when setting an upstream branch.
pub const DEFAULT_REMOTE: &str = "origin";

/// Configuration for a run, derived from CLI flags and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Working tree the git commands run in.
    pub repo_path: PathBuf,
    pub remote: String,
    pub command_timeout: Duration,
    pub push_delay: Duration,
    pub debounce: Duration,
    pub poll_interval: Duration,
}

impl Config {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            ..Self::default()
        }
    }

    /// Scope used in generated commit headers.
    pub fn scope(&self) -> String {
        repo_name(&self.repo_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            remote: DEFAULT_REMOTE.to_string(),
            command_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            push_delay: Duration::from_secs(DEFAULT_PUSH_DELAY_SECS),
            debounce: Duration::from_secs(DEFAULT_DEBOUNCE_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}
