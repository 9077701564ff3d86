use indexmap::IndexMap;
use serde::Serialize;

use nxui_error::Result;
use nxui_semver::{
    RangeMode, VersionDiff, compare, highlight_diff, split_version_and_mode, strip_range_prefix,
};

/// One package's upgrade decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeCandidate {
    pub package: String,
    /// Installed version without its range prefix.
    pub version: String,
    /// Target version used for comparison.
    pub latest_version: String,
    /// Target as shown in the report.
    #[serde(skip)]
    pub display: VersionDiff,
    pub is_latest: bool,
    pub version_mode: RangeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<IndexMap<String, String>>,
}

impl UpgradeCandidate {
    /// Classifies a manifest entry such as `^2.1.0` against `latest_version`.
    pub fn from_installed(package: &str, installed_entry: &str, latest_version: &str) -> Result<Self> {
        let spec = split_version_and_mode(installed_entry);
        let latest_version = strip_range_prefix(latest_version);
        let is_latest = compare(&spec.version, &latest_version)?.is_ge();

        Ok(Self {
            package: package.to_string(),
            display: highlight_diff(&spec.version, &latest_version),
            version: spec.version,
            latest_version,
            is_latest,
            version_mode: spec.mode,
            peer_dependencies: None,
        })
    }

    #[must_use]
    pub fn with_peer_dependencies(mut self, peers: IndexMap<String, String>) -> Self {
        self.peer_dependencies = Some(peers);
        self
    }

    /// Collapses repeated range prefixes on `version` and recomputes the
    /// highlighted display against `latest_version`.
    pub(crate) fn normalize(&mut self) {
        self.version = strip_range_prefix(&self.version);
        self.display = highlight_diff(&self.version, &self.latest_version);
    }

    /// `name@version` argument for a package manager's install command.
    pub fn install_spec(&self) -> String {
        format!("{}@{}", self.package, self.latest_version)
    }
}
