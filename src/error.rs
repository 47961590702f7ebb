//! Error types for autopush modules using thiserror.

use thiserror::Error;

/// Errors from spawning git subprocesses.
///
/// These never escape the process driver: they are rendered into the
/// `stderr` of a failed [`CommandOutput`](crate::git::CommandOutput).
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found on PATH. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {command} timed out after {secs} seconds")]
    Timeout { command: String, secs: u64 },
}

/// Errors from staging and committing changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("Failed to stage changes: {0}")]
    StagingFailed(String),

    #[error("Commit failed: {0}")]
    CommitFailed(String),
}

/// Errors from pushing to the remote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushError {
    #[error("Push failed: {0}")]
    Rejected(String),

    #[error("Push with --set-upstream for branch '{branch}' failed: {stderr}")]
    UpstreamFailed { branch: String, stderr: String },
}
