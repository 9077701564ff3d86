use semver::{Prerelease, Version};

use nxui_error::{Result, UpgradeError};

#[derive(Debug, Clone)]
pub enum Comparator {
    Exact(Version),
    GreaterThan(Version),
    GreaterThanOrEqual(Version),
    LessThan(Version),
    LessThanOrEqual(Version),
    Compatible(Version), // ^
    Tilde(Version),      // ~
    Wildcard,            // *
}

impl Comparator {
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Exact(v) => version == v,
            Self::GreaterThan(v) => version > v,
            Self::GreaterThanOrEqual(v) => version >= v,
            Self::LessThan(v) => version < v,
            Self::LessThanOrEqual(v) => version <= v,
            Self::Wildcard => true,
            Self::Compatible(v) => {
                // ^1.2.3 := >=1.2.3 <2.0.0
                // ^0.2.3 := >=0.2.3 <0.3.0
                // ^0.0.3 := >=0.0.3 <0.0.4
                if version < v {
                    return false;
                }
                if v.major > 0 {
                    version.major == v.major
                } else if v.minor > 0 {
                    version.major == 0 && version.minor == v.minor
                } else {
                    version.major == 0 && version.minor == 0 && version.patch == v.patch
                }
            }
            Self::Tilde(v) => {
                // ~1.2.3 := >=1.2.3 <1.3.0
                if version < v {
                    return false;
                }
                version.major == v.major && version.minor == v.minor
            }
        }
    }

    /// Smallest version this comparator admits, or `None` when it is
    /// unbounded below.
    pub fn lower_bound(&self) -> Result<Option<Version>> {
        match self {
            Self::Exact(v) | Self::GreaterThanOrEqual(v) | Self::Compatible(v) | Self::Tilde(v) => {
                Ok(Some(v.clone()))
            }
            Self::GreaterThan(v) => next_after(v).map(Some),
            Self::LessThan(_) | Self::LessThanOrEqual(_) | Self::Wildcard => Ok(None),
        }
    }
}

fn next_after(v: &Version) -> Result<Version> {
    if v.pre.is_empty() {
        let patch = v.patch.checked_add(1).ok_or_else(|| {
            UpgradeError::InvalidRange(format!(">{v}"), "patch version overflows".to_string())
        })?;
        Ok(Version::new(v.major, v.minor, patch))
    } else {
        let mut next = v.clone();
        next.pre = Prerelease::new(&format!("{}.0", v.pre)).unwrap_or(Prerelease::EMPTY);
        next.build = semver::BuildMetadata::EMPTY;
        Ok(next)
    }
}

#[derive(Debug, Clone)]
pub struct Range {
    pub comparators: Vec<Comparator>,
}

impl Range {
    pub const fn new(comparators: Vec<Comparator>) -> Self {
        Self { comparators }
    }

    pub fn matches(&self, version: &Version) -> bool {
        if self.comparators.is_empty() {
            return true;
        }
        self.comparators.iter().all(|comp| comp.matches(version))
    }

    /// Smallest version satisfying every comparator of this range, if any.
    pub fn min_version(&self) -> Result<Option<Version>> {
        let mut lowest: Option<Version> = None;
        for comparator in &self.comparators {
            if let Some(bound) = comparator.lower_bound()? {
                if lowest.as_ref().is_none_or(|current| bound > *current) {
                    lowest = Some(bound);
                }
            }
        }

        let candidate = lowest.unwrap_or_else(|| Version::new(0, 0, 0));
        Ok(self.matches(&candidate).then_some(candidate))
    }
}
