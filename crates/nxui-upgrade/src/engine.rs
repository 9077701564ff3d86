use futures::future::join_all;
use indexmap::IndexMap;

use crate::candidate::UpgradeCandidate;
use crate::peers::PeerResolver;
use crate::report::ReportFormatter;
use crate::sink::ReportSink;
use nxui_constants::{THEME_PACKAGE, UMBRELLA_PACKAGE};
use nxui_error::Result;
use nxui_registry::RegistryLookup;
use nxui_semver::compare;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub umbrella_package: String,
    pub theme_package: String,
    pub color: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            umbrella_package: UMBRELLA_PACKAGE.to_string(),
            theme_package: THEME_PACKAGE.to_string(),
            color: true,
        }
    }
}

/// What to upgrade.
#[derive(Debug, Clone)]
pub enum UpgradeRequest {
    /// Upgrade the umbrella package as a whole. `latest_version` is looked up
    /// once by the caller for the entire run.
    Umbrella { latest_version: String },
    /// Upgrade individually installed components.
    Components { candidates: Vec<UpgradeCandidate> },
}

pub struct UpgradeEngine<'a, L, S> {
    config: EngineConfig,
    lookup: &'a L,
    sink: &'a S,
}

impl<'a, L: RegistryLookup, S: ReportSink> UpgradeEngine<'a, L, S> {
    pub const fn new(config: EngineConfig, lookup: &'a L, sink: &'a S) -> Self {
        Self {
            config,
            lookup,
            sink,
        }
    }

    /// Resolves the request against the installed dependency map, reports both
    /// sections to the sink and returns every candidate that needs upgrading.
    pub async fn resolve(
        &self,
        installed: &IndexMap<String, String>,
        request: UpgradeRequest,
    ) -> Result<Vec<UpgradeCandidate>> {
        match request {
            UpgradeRequest::Umbrella { latest_version } => {
                self.resolve_umbrella(installed, &latest_version).await
            }
            UpgradeRequest::Components { candidates } => {
                self.resolve_components(installed, candidates).await
            }
        }
    }

    async fn resolve_umbrella(
        &self,
        installed: &IndexMap<String, String>,
        latest_version: &str,
    ) -> Result<Vec<UpgradeCandidate>> {
        let umbrella_name = self.config.umbrella_package.as_str();
        let Some(entry) = installed.get(umbrella_name) else {
            self.sink
                .debug(&format!("{umbrella_name} is not installed, nothing to upgrade"));
            return Ok(Vec::new());
        };

        let umbrella = UpgradeCandidate::from_installed(umbrella_name, entry, latest_version)?;

        let resolver = PeerResolver::new(self.lookup, self.sink);
        let (umbrella_peers, theme_peers) = futures::join!(
            resolver.resolve_peers(umbrella_name, installed, None),
            resolver.resolve_peers(&self.config.theme_package, installed, None),
        );
        let peers = merge_peer_lists([umbrella_peers?, theme_peers?])?;

        self.report(std::slice::from_ref(&umbrella), &peers);

        if umbrella.is_latest {
            return Ok(Vec::new());
        }

        Ok(std::iter::once(umbrella)
            .chain(peers.into_iter().filter(|c| !c.is_latest))
            .collect())
    }

    async fn resolve_components(
        &self,
        installed: &IndexMap<String, String>,
        mut candidates: Vec<UpgradeCandidate>,
    ) -> Result<Vec<UpgradeCandidate>> {
        for candidate in &mut candidates {
            candidate.normalize();
        }

        let resolver = PeerResolver::new(self.lookup, self.sink);
        let peer_tasks = candidates.iter().map(|candidate| {
            resolver.resolve_peers(
                &candidate.package,
                installed,
                candidate.peer_dependencies.as_ref(),
            )
        });

        // Every lookup runs to completion before the first error is surfaced.
        let results = join_all(peer_tasks).await;
        let peer_lists = results.into_iter().collect::<Result<Vec<_>>>()?;
        let peers = merge_peer_lists(peer_lists)?;

        self.report(&candidates, &peers);

        Ok(candidates
            .into_iter()
            .chain(peers)
            .filter(|c| !c.is_latest)
            .collect())
    }

    fn report(&self, primary: &[UpgradeCandidate], peers: &[UpgradeCandidate]) {
        let report = ReportFormatter::new(self.config.color).render(primary, peers);

        for block in report.blocks() {
            if !block.body.is_empty() {
                self.sink.show_block(&block);
            }
        }
    }
}

/// Concatenates per-package peer lists in order. A peer declared by several
/// packages appears once, at its first position, carrying the highest
/// minimum any of them requires.
fn merge_peer_lists(
    lists: impl IntoIterator<Item = Vec<UpgradeCandidate>>,
) -> Result<Vec<UpgradeCandidate>> {
    let mut merged: Vec<UpgradeCandidate> = Vec::new();

    for candidate in lists.into_iter().flatten() {
        match merged.iter_mut().find(|c| c.package == candidate.package) {
            Some(existing) => {
                if compare(&candidate.latest_version, &existing.latest_version)?.is_gt() {
                    *existing = candidate;
                }
            }
            None => merged.push(candidate),
        }
    }

    Ok(merged)
}
