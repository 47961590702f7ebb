//! Git operations for the autopush pipeline: status, commit, and push.

use tracing::{debug, info, warn};

use crate::error::{CommitError, PushError};
use crate::status::ChangeSet;

use super::executor::GitExecutor;

/// Branch assumed when git cannot report one.
pub const DEFAULT_BRANCH: &str = "main";

/// Stderr fragment git emits when the current branch has no upstream.
pub const NO_UPSTREAM_MARKER: &str = "no upstream branch";

/// Result of a stage-and-commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Nothing was staged after `git add`.
    NothingToCommit,
}

/// Result of a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// The first push failed for lack of an upstream and was retried with one.
    UpstreamSet { branch: String },
}

/// Current branch name, falling back to `main`.
pub async fn current_branch<G: GitExecutor + ?Sized>(git: &G) -> String {
    let output = git.run(&["branch", "--show-current"]).await;
    let branch = output.stdout.trim();

    if output.success && !branch.is_empty() {
        branch.to_string()
    } else {
        debug!("Could not determine current branch, assuming {}", DEFAULT_BRANCH);
        DEFAULT_BRANCH.to_string()
    }
}

/// Pending changes from `git status --porcelain`.
///
/// A failing status command yields an empty change set.
pub async fn fetch_status<G: GitExecutor + ?Sized>(git: &G) -> ChangeSet {
    let output = git.run(&["status", "--porcelain"]).await;
    if !output.success {
        warn!("git status failed: {}", output.stderr.trim());
        return ChangeSet::default();
    }

    ChangeSet::from_porcelain(&output.stdout)
}

/// Stage everything and commit it with `message`.
///
/// Steps:
/// 1. `git add -A` - stage all changes, including deletions
/// 2. `git diff --cached --quiet` - exit 0 means nothing is staged
/// 3. `git commit -m <message>`
pub async fn stage_and_commit<G: GitExecutor + ?Sized>(
    git: &G,
    message: &str,
) -> Result<CommitOutcome, CommitError> {
    let staged = git.run(&["add", "-A"]).await;
    if !staged.success {
        return Err(CommitError::StagingFailed(staged.stderr.trim().to_string()));
    }

    let diff = git.run(&["diff", "--cached", "--quiet"]).await;
    if diff.success {
        debug!("Index matches HEAD after staging");
        return Ok(CommitOutcome::NothingToCommit);
    }

    let commit = git.run(&["commit", "-m", message]).await;
    if !commit.success {
        return Err(CommitError::CommitFailed(commit.stderr.trim().to_string()));
    }

    info!("Created commit: {}", message.lines().next().unwrap_or_default());
    Ok(CommitOutcome::Committed)
}

/// Push the current branch.
///
/// When git rejects the push because the branch has no upstream, retries
/// exactly once with `--set-upstream <remote> <branch>`. Any other failure is
/// returned without retrying.
pub async fn push<G: GitExecutor + ?Sized>(git: &G, remote: &str) -> Result<PushOutcome, PushError> {
    let output = git.run(&["push"]).await;
    if output.success {
        return Ok(PushOutcome::Pushed);
    }

    if !output.stderr.contains(NO_UPSTREAM_MARKER) {
        return Err(PushError::Rejected(output.stderr.trim().to_string()));
    }

    let branch = current_branch(git).await;
    info!("Setting upstream {}/{}", remote, branch);

    let retry = git.run(&["push", "--set-upstream", remote, &branch]).await;
    if retry.success {
        Ok(PushOutcome::UpstreamSet { branch })
    } else {
        Err(PushError::UpstreamFailed {
            branch,
            stderr: retry.stderr.trim().to_string(),
        })
    }
}
