//! Version handling for upgrade checks: semver precedence, manifest range
//! prefixes, npm range collapsing and segment-level diffs for display.

pub mod comparators;
pub mod diff;
pub mod mode;
pub mod range;
pub mod version_utils;

pub use comparators::{Comparator, Range};
pub use diff::{VersionDiff, highlight_diff};
pub use mode::{RangeMode, VersionSpec, split_version_and_mode};
pub use range::{min_version, parse_npm_semver_ranges};
pub use version_utils::{compare, parse_partial_version, parse_version, strip_range_prefix};
