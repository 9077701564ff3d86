use indexmap::IndexMap;

use crate::candidate::UpgradeCandidate;
use crate::sink::ReportSink;
use nxui_error::Result;
use nxui_registry::RegistryLookup;
use nxui_semver::{VersionDiff, compare, highlight_diff, min_version, split_version_and_mode};

/// Turns a package's declared peer dependencies into upgrade candidates.
pub struct PeerResolver<'a, L, S> {
    lookup: &'a L,
    sink: &'a S,
}

impl<'a, L: RegistryLookup, S: ReportSink> PeerResolver<'a, L, S> {
    pub const fn new(lookup: &'a L, sink: &'a S) -> Self {
        Self { lookup, sink }
    }

    /// Resolves the peers of `package_name` against `installed`.
    ///
    /// `explicit_peers` takes precedence over the registry. A failed lookup
    /// counts as "no peers". Peers missing from `installed` are reported and
    /// skipped; malformed versions or ranges abort the call.
    pub async fn resolve_peers(
        &self,
        package_name: &str,
        installed: &IndexMap<String, String>,
        explicit_peers: Option<&IndexMap<String, String>>,
    ) -> Result<Vec<UpgradeCandidate>> {
        let fetched;
        let peers = match explicit_peers {
            Some(peers) => peers,
            None => {
                fetched = match self.lookup.peer_dependencies(package_name).await {
                    Ok(peers) => peers,
                    Err(e) => {
                        self.sink.debug(&format!(
                            "Could not read peer dependencies of {package_name}: {e}"
                        ));
                        IndexMap::new()
                    }
                };
                &fetched
            }
        };

        self.candidates_from_peers(
            package_name,
            peers.iter().map(|(name, range)| (name.as_str(), range.as_str())),
            installed,
        )
    }

    pub(crate) fn candidates_from_peers<'p>(
        &self,
        package_name: &str,
        peers: impl IntoIterator<Item = (&'p str, &'p str)>,
        installed: &IndexMap<String, String>,
    ) -> Result<Vec<UpgradeCandidate>> {
        let mut candidates: Vec<UpgradeCandidate> = Vec::new();

        for (peer_name, peer_range) in peers {
            if candidates.iter().any(|c| c.package == peer_name) {
                continue;
            }

            let Some(installed_entry) = installed.get(peer_name) else {
                self.sink.warn(&format!(
                    "Missing peer dependency {peer_name}@{peer_range} required by {package_name}. Install it manually."
                ));
                continue;
            };

            let current = split_version_and_mode(installed_entry);
            let target = min_version(peer_range)?;
            let is_latest = compare(&current.version, &target)?.is_ge();

            // A satisfied peer shows what is installed rather than the declared minimum.
            let display = if is_latest {
                VersionDiff::plain(&current.version)
            } else {
                highlight_diff(&current.version, &target)
            };

            candidates.push(UpgradeCandidate {
                package: peer_name.to_string(),
                version: current.version,
                latest_version: target,
                display,
                is_latest,
                version_mode: current.mode,
                peer_dependencies: None,
            });
        }

        Ok(candidates)
    }
}
