use std::cmp::Ordering;

use semver::Version;

use nxui_error::{Result, UpgradeError};

const RANGE_PREFIX_CHARS: &[char] = &['^', '~', '=', 'v'];

/// Parse a single version string into a Version, handling partial versions
/// (`1`, `1.2`) and wildcard segments (`1.x`, `1.2.*`).
pub fn parse_partial_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim().trim_start_matches('v');

    if matches!(cleaned, "" | "*" | "x" | "X") {
        return Ok(Version::new(0, 0, 0));
    }

    if let Ok(version) = Version::parse(cleaned) {
        return Ok(version);
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(cleaned.split('.')) {
        if matches!(part, "*" | "x" | "X") {
            break;
        }
        *slot = part.parse::<u64>().map_err(|_| {
            UpgradeError::InvalidRange(version_str.to_string(), format!("bad segment '{part}'"))
        })?;
    }

    if cleaned.split('.').count() > 3 {
        return Err(UpgradeError::InvalidRange(
            version_str.to_string(),
            "too many segments".to_string(),
        ));
    }

    let [major, minor, patch] = numbers;
    Ok(Version::new(major, minor, patch))
}

/// Parses a concrete version, tolerating a leading range prefix.
pub fn parse_version(version: &str) -> Result<Version> {
    Version::parse(&strip_range_prefix(version))
        .map_err(|_| UpgradeError::MalformedVersion(version.to_string()))
}

/// Orders two versions by semver precedence. Build metadata is ignored.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    let a = parse_version(a)?;
    let b = parse_version(b)?;

    Ok((a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        .then_with(|| a.pre.cmp(&b.pre)))
}

/// Removes the leading range operators (`^`, `~`, `=`, `v`) when what remains
/// is a bare semantic version. Anything else is returned trimmed but otherwise
/// untouched, which keeps the function idempotent.
pub fn strip_range_prefix(version: &str) -> String {
    let trimmed = version.trim();
    let bare = trimmed.trim_start_matches(RANGE_PREFIX_CHARS);

    if bare.len() != trimmed.len() && Version::parse(bare).is_ok() {
        bare.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_versions() {
        assert_eq!(parse_partial_version("18").unwrap(), Version::new(18, 0, 0));
        assert_eq!(parse_partial_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_partial_version("1.x").unwrap(), Version::new(1, 0, 0));
        assert_eq!(parse_partial_version("2.1.*").unwrap(), Version::new(2, 1, 0));
        assert_eq!(parse_partial_version("*").unwrap(), Version::new(0, 0, 0));
        assert!(parse_partial_version("1.two").is_err());
        assert!(parse_partial_version("1.2.3.4").is_err());
    }

    #[test]
    fn test_compare_orders_numerically() {
        assert_eq!(compare("1.10.0", "1.9.0").unwrap(), Ordering::Greater);
        assert_eq!(compare("2.0.0", "2.0.0").unwrap(), Ordering::Equal);
        assert_eq!(compare("0.9.9", "1.0.0").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_compare_prerelease_precedence() {
        assert_eq!(compare("1.0.0-beta", "1.0.0").unwrap(), Ordering::Less);
        assert_eq!(compare("1.0.0-beta.2", "1.0.0-beta.11").unwrap(), Ordering::Less);
        assert_eq!(compare("1.0.0-beta", "1.0.0-alpha").unwrap(), Ordering::Greater);
        assert_eq!(compare("1.0.0-alpha.1", "1.0.0-alpha").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_ignores_build_metadata() {
        assert_eq!(compare("1.0.0+build.1", "1.0.0+build.2").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_tolerates_prefix() {
        assert_eq!(compare("^2.1.0", "2.1.0").unwrap(), Ordering::Equal);
        assert_eq!(compare("~2.1.1", "2.1.0").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_rejects_malformed() {
        let err = compare("latest", "1.0.0").unwrap_err();
        assert_eq!(err, UpgradeError::MalformedVersion("latest".to_string()));
        assert!(compare("1.0.0", "1.0").is_err());
    }

    #[test]
    fn test_strip_range_prefix() {
        assert_eq!(strip_range_prefix("^1.2.3"), "1.2.3");
        assert_eq!(strip_range_prefix("~1.2.3"), "1.2.3");
        assert_eq!(strip_range_prefix("^^1.2.3"), "1.2.3");
        assert_eq!(strip_range_prefix("1.2.3"), "1.2.3");
        assert_eq!(strip_range_prefix(">=1.2.3"), ">=1.2.3");
        assert_eq!(strip_range_prefix("^1.2"), "^1.2");
    }

    #[test]
    fn test_strip_range_prefix_is_idempotent() {
        for input in [
            "^1.2.3", "~~0.1.0", "1.0.0", "v2.0.0-rc.1", "^1.x", "latest", " ^3.0.0 ", "",
        ] {
            let once = strip_range_prefix(input);
            assert_eq!(strip_range_prefix(&once), once, "input {input:?}");
        }
    }
}
