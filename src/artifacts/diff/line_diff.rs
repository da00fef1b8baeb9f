//! Heuristic line diff
//!
//! A linewise walk over two byte sequences. At each position, matching
//! current lines advance both sides; otherwise the walk probes whether the
//! current left line reappears later on the right (and vice versa) and
//! classifies the non-matching side as a deletion or an addition. When both
//! current lines reappear on the other side, the left line is emitted as a
//! deletion so the walk always advances. The result is not guaranteed to be
//! minimal.

/// One line of diff output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Unchanged(String),
    Removed(String),
    Added(String),
}

impl std::fmt::Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffLine::Unchanged(line) => write!(f, "  {}", line),
            DiffLine::Removed(line) => write!(f, "- {}", line),
            DiffLine::Added(line) => write!(f, "+ {}", line),
        }
    }
}

/// Split content at line terminators; a trailing newline does not produce a
/// final empty line
fn split_lines(content: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(content);
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

pub fn diff_lines(old: &[u8], new: &[u8]) -> Vec<DiffLine> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let mut edits = Vec::new();
    let mut old_idx = 0;
    let mut new_idx = 0;

    loop {
        match (old_lines.get(old_idx), new_lines.get(new_idx)) {
            (None, None) => break,
            (Some(old_line), Some(new_line)) if old_line == new_line => {
                edits.push(DiffLine::Unchanged(old_line.clone()));
                old_idx += 1;
                new_idx += 1;
            }
            (Some(old_line), None) => {
                edits.push(DiffLine::Removed(old_line.clone()));
                old_idx += 1;
            }
            (None, Some(new_line)) => {
                edits.push(DiffLine::Added(new_line.clone()));
                new_idx += 1;
            }
            (Some(old_line), Some(new_line)) => {
                let old_reappears = new_lines[new_idx..].contains(old_line);
                let new_reappears = old_lines[old_idx..].contains(new_line);

                if !old_reappears {
                    edits.push(DiffLine::Removed(old_line.clone()));
                    old_idx += 1;
                } else if !new_reappears {
                    edits.push(DiffLine::Added(new_line.clone()));
                    new_idx += 1;
                } else {
                    // both lines reappear on the other side; take the left
                    // one as removed so the walk makes progress
                    edits.push(DiffLine::Removed(old_line.clone()));
                    old_idx += 1;
                }
            }
        }
    }

    edits
}
