//! Repository discovery.

use std::path::{Path, PathBuf};

/// Name of git's metadata entry at a repository root.
const GIT_DIR: &str = ".git";

/// Walk upward from `start` looking for a directory containing `.git`.
///
/// `.git` may be a directory or a file (worktrees and submodules use a file).
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(GIT_DIR).exists())
        .map(Path::to_path_buf)
}

/// Whether `start` lies inside a git working tree.
pub fn is_git_repo(start: &Path) -> bool {
    find_repo_root(start).is_some()
}

/// Scope name for commit headers: the final component of the repository path.
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "repo".to_string())
}
