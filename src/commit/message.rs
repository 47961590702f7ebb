//! Commit message generation from the shape of pending changes.

use std::fmt;
use std::path::Path;

use crate::commit::rules::{CommitType, classify};
use crate::status::ChangeSet;

/// Message used when there is nothing to describe.
pub const FALLBACK_MESSAGE: &str = "chore: minor updates";

/// Sample paths listed per category before truncating.
const MAX_LISTED_FILES: usize = 3;

/// A generated commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub header: String,
    pub body: Option<String>,
}

impl CommitMessage {
    /// Format the commit message for git.
    ///
    /// Produces:
    /// ```text
    /// feat(scope): Add main.rs and 2 others
    ///
    /// Changes summary:
    /// - Added: 3 files
    ///   • src/main.rs
    ///   • src/lib.rs
    ///   • src/cli.rs
    /// ```
    pub fn format(&self) -> String {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => format!("{}\n\n{}", self.header, body),
            _ => self.header.clone(),
        }
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Generate a conventional commit message for `changes`.
///
/// `scope` is usually the repository directory name.
pub fn generate_commit_message(changes: &ChangeSet, scope: &str) -> CommitMessage {
    let Some(first) = changes.all_files().next() else {
        return CommitMessage {
            header: FALLBACK_MESSAGE.to_string(),
            body: None,
        };
    };

    let commit_type = classify(changes);
    let header = build_header(commit_type, scope, first, changes.len());

    CommitMessage {
        header,
        body: Some(build_body(changes)),
    }
}

fn build_header(commit_type: CommitType, scope: &str, primary: &str, total: usize) -> String {
    let primary_name = Path::new(primary)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| primary.to_string());

    let mut header = format!(
        "{}({}): {} {}",
        commit_type.prefix(),
        scope,
        commit_type.action(),
        primary_name
    );

    if total > 1 {
        header.push_str(&format!(" and {} others", total - 1));
    }

    header
}

fn build_body(changes: &ChangeSet) -> String {
    let mut lines = vec!["Changes summary:".to_string()];

    for (category, files) in changes.iter().filter(|(_, files)| !files.is_empty()) {
        lines.push(format!("- {}: {} files", category, files.len()));
        for file in files.iter().take(MAX_LISTED_FILES) {
            lines.push(format!("  • {}", file));
        }
        if files.len() > MAX_LISTED_FILES {
            lines.push(format!("  ... and {} more", files.len() - MAX_LISTED_FILES));
        }
    }

    lines.join("\n")
}
