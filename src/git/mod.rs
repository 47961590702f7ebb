//! Git operations by shelling out to the system git binary.

pub mod executor;
pub mod ops;
pub mod repo;

pub use executor::{
    CommandOutput, DEFAULT_TIMEOUT_SECS, GitExecutor, SystemGit, check_git_installed, get_timeout,
};
pub use ops::{
    CommitOutcome, DEFAULT_BRANCH, NO_UPSTREAM_MARKER, PushOutcome, current_branch, fetch_status,
    push, stage_and_commit,
};
pub use repo::{find_repo_root, is_git_repo, repo_name};
