//! Working tree change classification from porcelain status output.

pub mod parser;

pub use parser::{Category, ChangeSet, parse_status, parse_status_line};
