use std::fmt;

use serde::Serialize;

use crate::version_utils::strip_range_prefix;

/// How loosely a manifest entry pins its version. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RangeMode {
    #[serde(rename = "^")]
    Caret,
    #[serde(rename = "~")]
    Tilde,
    #[default]
    #[serde(rename = "")]
    Exact,
}

impl RangeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::Exact => "",
        }
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    pub version: String,
    pub mode: RangeMode,
}

/// Splits a manifest entry such as `^2.1.0` into `2.1.0` and its mode.
pub fn split_version_and_mode(entry: &str) -> VersionSpec {
    let trimmed = entry.trim();
    let mode = match trimmed.chars().next() {
        Some('^') => RangeMode::Caret,
        Some('~') => RangeMode::Tilde,
        _ => RangeMode::Exact,
    };

    VersionSpec {
        version: strip_range_prefix(trimmed),
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_caret() {
        let spec = split_version_and_mode("^2.1.0");
        assert_eq!(spec.version, "2.1.0");
        assert_eq!(spec.mode, RangeMode::Caret);
    }

    #[test]
    fn test_split_tilde_and_exact() {
        assert_eq!(split_version_and_mode("~1.0.3").mode, RangeMode::Tilde);

        let exact = split_version_and_mode("3.4.5");
        assert_eq!(exact.version, "3.4.5");
        assert_eq!(exact.mode, RangeMode::Exact);
    }

    #[test]
    fn test_split_collapses_repeated_prefix() {
        let spec = split_version_and_mode("^^2.0.0");
        assert_eq!(spec.version, "2.0.0");
        assert_eq!(spec.mode.to_string(), "^");
    }

    #[test]
    fn test_unparseable_entry_is_kept() {
        let spec = split_version_and_mode("workspace:*");
        assert_eq!(spec.version, "workspace:*");
        assert_eq!(spec.mode, RangeMode::Exact);
    }
}
