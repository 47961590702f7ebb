//! Porcelain status parsing into categorized change sets.

use std::fmt;

/// Separator git uses between old and new path on rename lines.
const RENAME_ARROW: &str = " -> ";

/// Category of a pending change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Added,
    Modified,
    Deleted,
    Renamed,
    Untracked,
}

impl Category {
    /// All categories in summary order.
    pub const ALL: [Category; 5] = [
        Category::Added,
        Category::Modified,
        Category::Deleted,
        Category::Renamed,
        Category::Untracked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Added => "Added",
            Category::Modified => "Modified",
            Category::Deleted => "Deleted",
            Category::Renamed => "Renamed",
            Category::Untracked => "Untracked",
        }
    }

    /// Classify a two-character porcelain status code.
    ///
    /// First match wins: `??`, then `A`, `M`, `D`, `R` anywhere in the code.
    pub fn from_status_code(code: &str) -> Option<Self> {
        if code.contains("??") {
            Some(Category::Untracked)
        } else if code.contains('A') {
            Some(Category::Added)
        } else if code.contains('M') {
            Some(Category::Modified)
        } else if code.contains('D') {
            Some(Category::Deleted)
        } else if code.contains('R') {
            Some(Category::Renamed)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending changes grouped by category, in the order git reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    added: Vec<String>,
    modified: Vec<String>,
    deleted: Vec<String>,
    renamed: Vec<String>,
    untracked: Vec<String>,
}

impl ChangeSet {
    /// Build a change set from raw `git status --porcelain` output.
    pub fn from_porcelain(output: &str) -> Self {
        parse_status(output)
    }

    pub fn files(&self, category: Category) -> &[String] {
        match category {
            Category::Added => &self.added,
            Category::Modified => &self.modified,
            Category::Deleted => &self.deleted,
            Category::Renamed => &self.renamed,
            Category::Untracked => &self.untracked,
        }
    }

    /// Iterate categories in summary order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.files(c)))
    }

    /// All paths across categories in summary order.
    pub fn all_files(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .flat_map(|(_, files)| files.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.files(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Added => &mut self.added,
            Category::Modified => &mut self.modified,
            Category::Deleted => &mut self.deleted,
            Category::Renamed => &mut self.renamed,
            Category::Untracked => &mut self.untracked,
        }
    }
}

impl<S: Into<String>> FromIterator<(Category, S)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (Category, S)>>(iter: I) -> Self {
        let mut changes = ChangeSet::default();
        for (category, path) in iter {
            changes.bucket_mut(category).push(path.into());
        }
        changes
    }
}

/// Split a porcelain line into its status code and path.
///
/// For renames only the destination path is kept. Quotes git adds around
/// paths with special characters are stripped. Returns `None` for lines too
/// short to carry a path.
pub fn parse_status_line(line: &str) -> Option<(&str, String)> {
    let code = line.get(..2)?;
    let raw_path = line.get(3..)?.trim();

    let path = match raw_path.rsplit_once(RENAME_ARROW) {
        Some((_, new_path)) => new_path,
        None => raw_path,
    };

    let path = path.trim_matches('"');
    if path.is_empty() {
        return None;
    }

    Some((code, path.to_string()))
}

/// Parse full porcelain output. Unrecognized status codes are dropped.
pub fn parse_status(output: &str) -> ChangeSet {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(parse_status_line)
        .filter_map(|(code, path)| Category::from_status_code(code).map(|c| (c, path)))
        .collect()
}
