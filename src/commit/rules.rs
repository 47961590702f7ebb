//! Ordered classification rules mapping a change set to a commit type.
//!
//! Rules are evaluated top to bottom; the first matching rule decides the
//! commit type. [`CommitType::Refactor`] applies when nothing matches.

use tracing::debug;

use crate::status::{Category, ChangeSet};

/// File extensions treated as documentation.
const DOC_EXTENSIONS: &[&str] = &[".md", ".markdown", ".rst", ".adoc"];

/// Path fragments that mark a change as a fix.
const FIX_KEYWORDS: &[&str] = &["fix", "bug"];

/// Conventional commit types produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Fix,
    Docs,
    Feat,
    Refactor,
    Chore,
}

impl CommitType {
    /// Prefix used in the commit header.
    pub fn prefix(&self) -> &'static str {
        match self {
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Refactor => "refactor",
            CommitType::Chore => "chore",
        }
    }

    /// Verb used in the commit header.
    pub fn action(&self) -> &'static str {
        match self {
            CommitType::Fix => "Fix",
            CommitType::Feat => "Add",
            CommitType::Docs | CommitType::Refactor | CommitType::Chore => "Update",
        }
    }
}

/// A single classification rule.
pub struct Rule {
    pub name: &'static str,
    pub commit_type: CommitType,
    pub matches: fn(&ChangeSet) -> bool,
}

/// Classification rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "path mentions a fix",
        commit_type: CommitType::Fix,
        matches: mentions_fix,
    },
    Rule {
        name: "documentation touched",
        commit_type: CommitType::Docs,
        matches: touches_docs,
    },
    Rule {
        name: "more files added than modified",
        commit_type: CommitType::Feat,
        matches: adds_more_than_modifies,
    },
];

/// Pick the commit type for a non-empty change set.
pub fn classify(changes: &ChangeSet) -> CommitType {
    match RULES.iter().find(|rule| (rule.matches)(changes)) {
        Some(rule) => {
            debug!("Classified changes as {} ({})", rule.commit_type.prefix(), rule.name);
            rule.commit_type
        }
        None => CommitType::Refactor,
    }
}

fn mentions_fix(changes: &ChangeSet) -> bool {
    changes.all_files().any(|path| {
        let lower = path.to_lowercase();
        FIX_KEYWORDS.iter().any(|kw| lower.contains(kw))
    })
}

fn touches_docs(changes: &ChangeSet) -> bool {
    changes.all_files().any(|path| {
        let lower = path.to_lowercase();
        DOC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    })
}

fn adds_more_than_modifies(changes: &ChangeSet) -> bool {
    let added = changes.files(Category::Added).len() + changes.files(Category::Untracked).len();
    added > changes.files(Category::Modified).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(entries: &[(Category, &str)]) -> ChangeSet {
        entries.iter().map(|(c, p)| (*c, *p)).collect()
    }

    #[test]
    fn test_fix_wins_over_docs() {
        let set = changes(&[
            (Category::Modified, "README.md"),
            (Category::Modified, "src/bugfix.rs"),
        ]);
        assert_eq!(classify(&set), CommitType::Fix);
    }

    #[test]
    fn test_fix_match_is_case_insensitive() {
        let set = changes(&[(Category::Modified, "src/BugTracker.rs")]);
        assert_eq!(classify(&set), CommitType::Fix);
    }

    #[test]
    fn test_docs_wins_over_feat() {
        let set = changes(&[
            (Category::Untracked, "guide.md"),
            (Category::Untracked, "src/new.rs"),
        ]);
        assert_eq!(classify(&set), CommitType::Docs);
    }

    #[test]
    fn test_untracked_counts_as_added() {
        let set = changes(&[
            (Category::Untracked, "a.rs"),
            (Category::Untracked, "b.rs"),
            (Category::Modified, "c.rs"),
        ]);
        assert_eq!(classify(&set), CommitType::Feat);
    }

    #[test]
    fn test_equal_counts_fall_back_to_refactor() {
        let set = changes(&[(Category::Added, "a.rs"), (Category::Modified, "b.rs")]);
        assert_eq!(classify(&set), CommitType::Refactor);
    }

    #[test]
    fn test_deletions_only_is_refactor() {
        let set = changes(&[(Category::Deleted, "old.rs")]);
        assert_eq!(classify(&set), CommitType::Refactor);
    }

    #[test]
    fn test_rule_order_is_fix_docs_feat() {
        let order: Vec<CommitType> = RULES.iter().map(|r| r.commit_type).collect();
        assert_eq!(order, vec![CommitType::Fix, CommitType::Docs, CommitType::Feat]);
    }

    #[test]
    fn test_prefix_and_action() {
        assert_eq!(CommitType::Feat.prefix(), "feat");
        assert_eq!(CommitType::Feat.action(), "Add");
        assert_eq!(CommitType::Docs.action(), "Update");
        assert_eq!(CommitType::Fix.action(), "Fix");
    }
}
