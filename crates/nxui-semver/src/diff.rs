use std::fmt;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::version_utils::strip_range_prefix;

/// A target version split into the part shared with the current version and
/// the trailing part that changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    pub unchanged: String,
    pub changed: String,
}

impl VersionDiff {
    pub fn plain(version: &str) -> Self {
        Self {
            unchanged: version.to_string(),
            changed: String::new(),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.changed.is_empty()
    }

    /// Length of the text without any markup.
    pub fn width(&self) -> usize {
        self.unchanged.len() + self.changed.len()
    }

    /// Index of the first changed dot-separated segment.
    fn changed_segment(&self) -> usize {
        self.unchanged.matches('.').count()
    }

    /// Renders the diff, coloring the changed tail by how significant it is.
    pub fn paint(&self, color: bool) -> String {
        if !color || self.is_plain() {
            return self.to_string();
        }

        let tail = match self.changed_segment() {
            0 => self.changed.bright_red().bold().to_string(),
            1 => self.changed.bright_yellow().to_string(),
            _ => self.changed.bright_green().to_string(),
        };
        format!("{}{tail}", self.unchanged)
    }
}

impl fmt::Display for VersionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.unchanged, self.changed)
    }
}

/// Marks the dot-separated segments of `target` from the first one that
/// differs from `current` onwards.
pub fn highlight_diff(current: &str, target: &str) -> VersionDiff {
    let current = strip_range_prefix(current);
    let target = strip_range_prefix(target);

    let current_segments: Vec<&str> = current.split('.').collect();
    let target_segments: Vec<&str> = target.split('.').collect();

    let first_diff = target_segments
        .iter()
        .enumerate()
        .position(|(i, segment)| current_segments.get(i) != Some(segment));

    let Some(index) = first_diff else {
        return VersionDiff::plain(&target);
    };

    let (head, tail) = target_segments.split_at(index);
    let mut unchanged = head.join(".");
    if !head.is_empty() {
        unchanged.push('.');
    }

    VersionDiff {
        unchanged,
        changed: tail.join("."),
    }
}
