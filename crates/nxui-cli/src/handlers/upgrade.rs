use anyhow::Result;
use futures::future::join_all;
use indexmap::IndexMap;
use owo_colors::OwoColorize;
use std::path::Path;

use crate::commands::GlobalArgs;
use nxui_constants::COMPONENT_SCOPE;
use nxui_error::UpgradeError;
use nxui_project::{PackageJson, read_installed_manifest, read_package_json};
use nxui_registry::{NpmRegistry, RegistryLookup};
use nxui_upgrade::{
    EngineConfig, ReportBlock, ReportSink, TerminalSink, UpgradeCandidate, UpgradeEngine,
    UpgradeRequest,
};

pub struct UpgradeHandler;

impl UpgradeHandler {
    pub async fn handle_upgrade(
        global: &GlobalArgs,
        packages: &[String],
        all: bool,
        json: bool,
    ) -> Result<()> {
        if !json {
            Self::print_upgrade_header(packages);
        }

        let project_dir = global.cwd.as_path();
        let manifest = read_package_json(project_dir)
            .map_err(|e| UpgradeError::PackageJsonError(format!("{e:#}")))?;
        let installed = manifest.get_all_dependencies();

        let registry = NpmRegistry::new(&global.registry);
        let config = EngineConfig {
            color: !global.no_color,
            ..EngineConfig::default()
        };

        let Some(request) = Self::plan_request(
            &registry,
            project_dir,
            &manifest,
            &config.umbrella_package,
            packages,
            all,
        )
        .await?
        else {
            if json {
                println!("[]");
            }
            return Ok(());
        };

        let upgrades = if json {
            UpgradeEngine::new(config, &registry, &JsonSink)
                .resolve(&installed, request)
                .await?
        } else {
            let sink = TerminalSink::new(config.color);
            UpgradeEngine::new(config, &registry, &sink)
                .resolve(&installed, request)
                .await?
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&upgrades)?);
        } else {
            Self::print_summary(&upgrades);
        }

        Ok(())
    }

    /// Builds the engine request, or `None` when there is nothing to check.
    async fn plan_request<L: RegistryLookup>(
        registry: &L,
        project_dir: &Path,
        manifest: &PackageJson,
        umbrella: &str,
        packages: &[String],
        all: bool,
    ) -> Result<Option<UpgradeRequest>> {
        let installed = manifest.get_all_dependencies();
        let umbrella_installed = installed.contains_key(umbrella);

        if all && !umbrella_installed {
            nxui_logger::warn(&format!("{umbrella} is not installed, nothing to upgrade"));
            return Ok(None);
        }

        if all || (packages.is_empty() && umbrella_installed) {
            return Self::umbrella_request(registry, umbrella).await.map(Some);
        }

        let targets = Self::select_components(manifest, &installed, packages);
        if targets.is_empty() {
            nxui_logger::info("No NextUI components found in package.json");
            return Ok(None);
        }

        Self::components_request(registry, project_dir, &targets)
            .await
            .map(Some)
    }

    async fn umbrella_request<L: RegistryLookup>(
        registry: &L,
        umbrella: &str,
    ) -> Result<UpgradeRequest> {
        nxui_logger::status(&format!("Fetching latest version of {umbrella}"));

        let latest_version = registry
            .latest_version(umbrella)
            .await
            .map_err(|e| UpgradeError::RegistryError(umbrella.to_string(), e.to_string()))?;

        nxui_logger::finish_line(&format!("{umbrella} latest is {latest_version}"));
        Ok(UpgradeRequest::Umbrella { latest_version })
    }

    async fn components_request<L: RegistryLookup>(
        registry: &L,
        project_dir: &Path,
        targets: &IndexMap<String, String>,
    ) -> Result<UpgradeRequest> {
        nxui_logger::status(&format!(
            "Fetching latest versions of {} components",
            targets.len()
        ));

        let lookups = targets.keys().map(|name| registry.latest_version(name));
        let latest_versions = join_all(lookups).await;

        let mut candidates = Vec::with_capacity(targets.len());
        for ((name, entry), latest) in targets.iter().zip(latest_versions) {
            let latest =
                latest.map_err(|e| UpgradeError::RegistryError(name.clone(), e.to_string()))?;
            let mut candidate = UpgradeCandidate::from_installed(name, entry, &latest)?;

            if let Some(peers) =
                read_installed_manifest(project_dir, name).and_then(|pkg| pkg.peer_dependencies)
            {
                nxui_logger::debug(&format!(
                    "Using {} peer dependencies from installed {name}",
                    peers.len()
                ));
                candidate = candidate.with_peer_dependencies(peers);
            }

            candidates.push(candidate);
        }

        nxui_logger::finish_line(&format!("Fetched {} components", candidates.len()));
        Ok(UpgradeRequest::Components { candidates })
    }

    /// Named packages that are installed, or every installed component when
    /// none are named. Bare names are looked up inside the component scope.
    fn select_components(
        manifest: &PackageJson,
        installed: &IndexMap<String, String>,
        packages: &[String],
    ) -> IndexMap<String, String> {
        if packages.is_empty() {
            return manifest.component_dependencies();
        }

        let mut targets = IndexMap::new();
        for requested in packages {
            let name = Self::resolve_package_name(installed, requested);
            match installed.get(&name) {
                Some(entry) => {
                    targets.insert(name, entry.clone());
                }
                None => nxui_logger::warn(&format!("{requested} is not installed, skipping")),
            }
        }
        targets
    }

    fn resolve_package_name(installed: &IndexMap<String, String>, requested: &str) -> String {
        if installed.contains_key(requested) || requested.starts_with('@') {
            return requested.to_string();
        }
        format!("{COMPONENT_SCOPE}{requested}")
    }

    fn print_summary(upgrades: &[UpgradeCandidate]) {
        if upgrades.is_empty() {
            nxui_logger::success("All NextUI packages are up to date");
            return;
        }

        nxui_logger::info(&format!(
            "{} package(s) can be upgraded, install them with:",
            upgrades.len()
        ));

        let specs: Vec<String> = upgrades.iter().map(UpgradeCandidate::install_spec).collect();
        println!("  {}", specs.join(" ").bright_white());
    }

    fn print_upgrade_header(packages: &[String]) {
        println!(
            "{} {} {}",
            "nxui".bright_cyan().bold(),
            "upgrade".bright_white(),
            packages.join(" ").bright_white()
        );
        println!();
    }
}

/// Keeps stdout clean for `--json`. Diagnostics still reach stderr.
struct JsonSink;

impl ReportSink for JsonSink {
    fn warn(&self, message: &str) {
        nxui_logger::warn(message);
    }

    fn debug(&self, message: &str) {
        nxui_logger::debug(message);
    }

    fn show_block(&self, _block: &ReportBlock) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const UMBRELLA: &str = "@nextui-org/react";

    #[derive(Default)]
    struct StaticRegistry {
        latest: HashMap<String, String>,
        latest_lookups: AtomicUsize,
    }

    impl StaticRegistry {
        fn with_latest(mut self, name: &str, version: &str) -> Self {
            self.latest.insert(name.to_string(), version.to_string());
            self
        }

        fn latest_lookups(&self) -> usize {
            self.latest_lookups.load(Ordering::SeqCst)
        }
    }

    impl RegistryLookup for StaticRegistry {
        async fn latest_version(&self, name: &str) -> anyhow::Result<String> {
            self.latest_lookups.fetch_add(1, Ordering::SeqCst);
            self.latest
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("{name} is not published"))
        }

        async fn peer_dependencies(&self, _name: &str) -> anyhow::Result<IndexMap<String, String>> {
            Ok(IndexMap::new())
        }
    }

    fn installed(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(name, version)| ((*name).to_string(), (*version).to_string()))
            .collect()
    }

    fn manifest(json: &str) -> PackageJson {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_bare_names_resolve_into_component_scope() {
        let deps = installed(&[("@nextui-org/button", "2.0.0"), ("react", "18.2.0")]);

        assert_eq!(
            UpgradeHandler::resolve_package_name(&deps, "button"),
            "@nextui-org/button"
        );
        assert_eq!(UpgradeHandler::resolve_package_name(&deps, "react"), "react");
        assert_eq!(
            UpgradeHandler::resolve_package_name(&deps, "@other/button"),
            "@other/button"
        );
    }

    #[test]
    fn test_select_components_defaults_to_installed_components() {
        let pkg = manifest(
            r#"{
                "dependencies": {
                    "@nextui-org/theme": "2.1.0",
                    "@nextui-org/button": "^2.0.0",
                    "react": "^18.2.0"
                },
                "devDependencies": { "@nextui-org/input": "2.0.5" }
            }"#,
        );
        let deps = pkg.get_all_dependencies();

        let targets = UpgradeHandler::select_components(&pkg, &deps, &[]);
        let names: Vec<&str> = targets.keys().map(String::as_str).collect();

        assert_eq!(names, vec!["@nextui-org/button", "@nextui-org/input"]);
    }

    #[test]
    fn test_select_components_skips_missing_names() {
        let pkg = manifest(r#"{ "dependencies": { "@nextui-org/button": "^2.0.0" } }"#);
        let deps = pkg.get_all_dependencies();

        let targets = UpgradeHandler::select_components(
            &pkg,
            &deps,
            &["button".to_string(), "card".to_string()],
        );

        assert_eq!(targets.len(), 1);
        assert_eq!(targets.get("@nextui-org/button").unwrap(), "^2.0.0");
    }

    #[tokio::test]
    async fn test_all_without_umbrella_skips_registry() {
        let registry = StaticRegistry::default().with_latest(UMBRELLA, "2.4.6");
        let pkg = manifest(r#"{ "dependencies": { "@nextui-org/button": "^2.0.0" } }"#);
        let dir = tempfile::tempdir().unwrap();

        let request =
            UpgradeHandler::plan_request(&registry, dir.path(), &pkg, UMBRELLA, &[], true)
                .await
                .unwrap();

        assert!(request.is_none());
        assert_eq!(registry.latest_lookups(), 0);
    }

    #[tokio::test]
    async fn test_installed_umbrella_fetches_latest_once() {
        let registry = StaticRegistry::default().with_latest(UMBRELLA, "2.4.6");
        let pkg = manifest(
            r#"{ "dependencies": { "@nextui-org/react": "^2.2.9", "@nextui-org/button": "2.0.0" } }"#,
        );
        let dir = tempfile::tempdir().unwrap();

        let request =
            UpgradeHandler::plan_request(&registry, dir.path(), &pkg, UMBRELLA, &[], false)
                .await
                .unwrap();

        match request {
            Some(UpgradeRequest::Umbrella { latest_version }) => {
                assert_eq!(latest_version, "2.4.6");
            }
            other => panic!("expected umbrella request, got {other:?}"),
        }
        assert_eq!(registry.latest_lookups(), 1);
    }

    #[tokio::test]
    async fn test_components_use_installed_peer_manifests() {
        let registry = StaticRegistry::default()
            .with_latest("@nextui-org/button", "2.0.26")
            .with_latest("@nextui-org/card", "2.0.24");
        let pkg = manifest(
            r#"{
                "dependencies": {
                    "@nextui-org/button": "^2.0.0",
                    "@nextui-org/card": "2.0.24"
                }
            }"#,
        );

        let dir = tempfile::tempdir().unwrap();
        let button_dir = dir.path().join("node_modules").join("@nextui-org").join("button");
        fs::create_dir_all(&button_dir).unwrap();
        fs::write(
            button_dir.join("package.json"),
            r#"{ "name": "@nextui-org/button", "peerDependencies": { "react": ">=18" } }"#,
        )
        .unwrap();

        let request =
            UpgradeHandler::plan_request(&registry, dir.path(), &pkg, UMBRELLA, &[], false)
                .await
                .unwrap();

        let Some(UpgradeRequest::Components { candidates }) = request else {
            panic!("expected components request");
        };
        assert_eq!(candidates.len(), 2);

        let button = &candidates[0];
        assert_eq!(button.package, "@nextui-org/button");
        assert_eq!(button.latest_version, "2.0.26");
        assert!(!button.is_latest);
        let peers = button.peer_dependencies.as_ref().unwrap();
        assert_eq!(peers.get("react").map(String::as_str), Some(">=18"));

        let card = &candidates[1];
        assert!(card.is_latest);
        assert!(card.peer_dependencies.is_none());
        assert_eq!(registry.latest_lookups(), 2);
    }

    #[tokio::test]
    async fn test_failed_latest_lookup_names_package() {
        let registry = StaticRegistry::default();
        let pkg = manifest(r#"{ "dependencies": { "@nextui-org/button": "^2.0.0" } }"#);
        let dir = tempfile::tempdir().unwrap();

        let err = UpgradeHandler::plan_request(&registry, dir.path(), &pkg, UMBRELLA, &[], false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UpgradeError>(),
            Some(UpgradeError::RegistryError(name, _)) if name == "@nextui-org/button"
        ));
    }
}
