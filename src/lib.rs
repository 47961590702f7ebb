//! autopush - A CLI tool that commits and pushes working tree changes.
//!
//! # Overview
//!
//! autopush reads `git status --porcelain`, classifies pending changes,
//! generates a conventional commit message from their shape, commits, and
//! pushes. It can run once or keep watching the working tree.

pub mod autopilot;
pub mod clock;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod status;

// Re-export commonly used types
pub use autopilot::{Autopilot, RunOptions, RunOutcome};
pub use clock::{Sleeper, TokioSleeper};
pub use commit::{CommitMessage, CommitType, generate_commit_message};
pub use config::Config;
pub use error::{CommitError, GitError, PushError};
pub use git::{CommandOutput, GitExecutor, SystemGit};
pub use status::{Category, ChangeSet};
