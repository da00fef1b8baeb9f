use colored::{ColoredString, Colorize};

const LABEL_WIDTH: usize = 12;

/// A difference between the staging index and the HEAD tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StagedChange {
    Added,
    Modified,
    Deleted,
}

impl StagedChange {
    pub fn label(&self) -> &'static str {
        match self {
            StagedChange::Added => "new file:",
            StagedChange::Modified => "modified:",
            StagedChange::Deleted => "deleted:",
        }
    }

    pub fn render(&self, path: &str) -> ColoredString {
        format!("    {:<width$}{}", self.label(), path, width = LABEL_WIDTH).green()
    }
}

/// A difference between the working directory and the index or HEAD tree
///
/// `ModifiedSinceStage` is the index-shadowed flavor: the path is staged and
/// the working copy has drifted from the staged content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnstagedChange {
    Modified,
    ModifiedSinceStage,
    Deleted,
    Untracked,
}

impl UnstagedChange {
    pub fn is_untracked(&self) -> bool {
        matches!(self, UnstagedChange::Untracked)
    }

    pub fn render(&self, path: &str) -> ColoredString {
        match self {
            UnstagedChange::Modified => {
                format!("    {:<width$}{}", "modified:", path, width = LABEL_WIDTH).red()
            }
            UnstagedChange::ModifiedSinceStage => format!(
                "    {:<width$}{} (staged version differs)",
                "modified:",
                path,
                width = LABEL_WIDTH
            )
            .red(),
            UnstagedChange::Deleted => {
                format!("    {:<width$}{}", "deleted:", path, width = LABEL_WIDTH).red()
            }
            UnstagedChange::Untracked => format!("    {}", path).red(),
        }
    }
}
