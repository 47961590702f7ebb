//! Outcome reporting for a single autopush cycle.

use std::fmt;

use crate::error::{CommitError, PushError};

/// Options for a single run, derived from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Commit message to use instead of a generated one.
    pub message: Option<String>,
    /// Print the message without staging, committing, or pushing.
    pub dry_run: bool,
}

impl RunOptions {
    /// The custom message, if one was given and is not blank.
    pub fn custom_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// What a single run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The working tree was clean.
    NoChanges,
    /// Dry run: the message that would have been committed.
    DryRun(String),
    /// Committed and pushed.
    Pushed,
    /// Staging produced an empty index.
    NothingToCommit,
    CommitFailed(CommitError),
    PushFailed(PushError),
}

impl RunOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::CommitFailed(_) | RunOutcome::PushFailed(_))
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::NoChanges => f.write_str("No changes"),
            RunOutcome::DryRun(_) => f.write_str("Dry run completed"),
            RunOutcome::Pushed => f.write_str("Success"),
            RunOutcome::NothingToCommit => f.write_str("Nothing to push"),
            RunOutcome::CommitFailed(e) => write!(f, "{}", e),
            RunOutcome::PushFailed(e) => write!(f, "{}", e),
        }
    }
}
