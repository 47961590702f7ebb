//! Rule-based commit message generation.

pub mod message;
pub mod rules;

pub use message::{CommitMessage, FALLBACK_MESSAGE, generate_commit_message};
pub use rules::{CommitType, RULES, Rule, classify};
