use semver::Version;

use crate::comparators::{Comparator, Range};
use crate::version_utils::parse_partial_version;
use nxui_error::{Result, UpgradeError};

const OPERATOR_CHARS: [char; 5] = ['>', '<', '=', '^', '~'];

pub fn parse_npm_semver_ranges(range_str: &str) -> Result<Vec<Range>> {
    let range_str = range_str.trim();

    if range_str.is_empty() || range_str == "*" {
        return Ok(vec![Range::new(vec![Comparator::Wildcard])]);
    }

    let mut ranges = Vec::new();
    for clause in range_str.split("||").map(str::trim) {
        if clause.is_empty() {
            continue;
        }
        ranges.push(parse_range_clause(clause)?);
    }

    if ranges.is_empty() {
        return Ok(vec![Range::new(vec![Comparator::Wildcard])]);
    }

    Ok(ranges)
}

fn parse_range_clause(clause: &str) -> Result<Range> {
    let clause = clause.trim();

    if clause == "*" || clause.is_empty() {
        return Ok(Range::new(vec![Comparator::Wildcard]));
    }

    if let Some((low, high)) = clause.split_once(" - ") {
        return Ok(Range::new(vec![
            Comparator::GreaterThanOrEqual(parse_partial_version(low)?),
            Comparator::LessThanOrEqual(parse_partial_version(high)?),
        ]));
    }

    let mut comparators = Vec::new();
    let mut remaining = clause;

    while !remaining.trim().is_empty() {
        remaining = remaining.trim();

        let (constructor, rest): (fn(Version) -> Comparator, &str) =
            if let Some(rest) = remaining.strip_prefix(">=") {
                (Comparator::GreaterThanOrEqual, rest)
            } else if let Some(rest) = remaining.strip_prefix("<=") {
                (Comparator::LessThanOrEqual, rest)
            } else if let Some(rest) = remaining.strip_prefix('>') {
                (Comparator::GreaterThan, rest)
            } else if let Some(rest) = remaining.strip_prefix('<') {
                (Comparator::LessThan, rest)
            } else if let Some(rest) = remaining.strip_prefix('^') {
                (Comparator::Compatible, rest)
            } else if let Some(rest) = remaining.strip_prefix('~') {
                (Comparator::Tilde, rest)
            } else if let Some(rest) = remaining.strip_prefix('=') {
                (Comparator::Exact, rest)
            } else {
                (Comparator::Exact, remaining)
            };

        let has_operator = rest.len() != remaining.len();
        let (version_str, next) = extract_version_and_remaining(clause, rest)?;
        let version = parse_partial_version(version_str)?;
        if !has_operator && is_partial(version_str) {
            comparators.extend(partial_comparators(version_str, &version)?);
        } else {
            comparators.push(constructor(version));
        }
        remaining = next;
    }

    if comparators.is_empty() {
        return Ok(Range::new(vec![Comparator::Wildcard]));
    }

    Ok(Range::new(comparators))
}

fn is_partial(version_str: &str) -> bool {
    version_str.split('.').count() < 3
        || version_str
            .split('.')
            .any(|part| matches!(part, "*" | "x" | "X"))
}

/// A bare partial such as `18` or `1.2.x` admits every version it prefixes.
fn partial_comparators(version_str: &str, version: &Version) -> Result<Vec<Comparator>> {
    let pinned = version_str
        .split('.')
        .take_while(|part| !matches!(*part, "*" | "x" | "X"))
        .count();

    let overflow = || {
        UpgradeError::InvalidRange(
            version_str.to_string(),
            "version component overflows".to_string(),
        )
    };

    Ok(match pinned {
        0 => vec![Comparator::Wildcard],
        1 => vec![
            Comparator::GreaterThanOrEqual(Version::new(version.major, 0, 0)),
            Comparator::LessThan(Version::new(
                version.major.checked_add(1).ok_or_else(overflow)?,
                0,
                0,
            )),
        ],
        _ => vec![
            Comparator::GreaterThanOrEqual(Version::new(version.major, version.minor, 0)),
            Comparator::LessThan(Version::new(
                version.major,
                version.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            )),
        ],
    })
}

fn extract_version_and_remaining<'a>(clause: &str, input: &'a str) -> Result<(&'a str, &'a str)> {
    let input = input.trim_start();

    let end_pos = input
        .char_indices()
        .find(|&(i, c)| c.is_whitespace() || (i > 0 && OPERATOR_CHARS.contains(&c)))
        .map_or(input.len(), |(i, _)| i);

    let (version_str, remaining) = input.split_at(end_pos);

    if version_str.is_empty() {
        return Err(UpgradeError::InvalidRange(
            clause.to_string(),
            "expected a version after the operator".to_string(),
        ));
    }

    Ok((version_str, remaining))
}

/// Collapses a range expression to the smallest concrete version it admits,
/// e.g. `^3.0.0` to `3.0.0`, `>=18 || >=17` to `17.0.0`, `>1.2.3` to `1.2.4`.
pub fn min_version(range: &str) -> Result<String> {
    let mut lowest: Option<Version> = None;
    for clause in parse_npm_semver_ranges(range)? {
        if let Some(candidate) = clause.min_version()? {
            if lowest.as_ref().is_none_or(|current| candidate < *current) {
                lowest = Some(candidate);
            }
        }
    }

    lowest.map(|v| v.to_string()).ok_or_else(|| {
        UpgradeError::InvalidRange(range.to_string(), "no version satisfies it".to_string())
    })
}
