use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::GlobalArgs;
use nxui_constants::{THEME_PACKAGE, UMBRELLA_PACKAGE};
use nxui_error::UpgradeError;
use nxui_project::{DependencyType, PackageJson, read_package_json};
use nxui_semver::split_version_and_mode;

pub struct ListHandler;

/// One installed package as shown by `nxui list`.
#[derive(Debug, PartialEq, Eq)]
struct ListedPackage {
    name: String,
    version: String,
    dev: bool,
}

impl ListHandler {
    pub fn handle_list_components(global: &GlobalArgs) -> Result<()> {
        let pkg = read_package_json(&global.cwd)
            .map_err(|e| UpgradeError::PackageJsonError(format!("{e:#}")))?;

        let listed = Self::collect(&pkg);
        if listed.is_empty() {
            nxui_logger::info("No NextUI packages found in package.json");
            return Ok(());
        }

        nxui_logger::info(&format!("{} NextUI package(s) installed:", listed.len()));

        let name_width = listed.iter().map(|p| p.name.len()).max().unwrap_or(0);
        for package in &listed {
            let dev_marker = if package.dev { " (dev)" } else { "" };
            if global.no_color {
                println!("  {:<name_width$}  {}{dev_marker}", package.name, package.version);
            } else {
                println!(
                    "  {}  {}{}",
                    format!("{:<name_width$}", package.name).bright_white(),
                    package.version.bright_green(),
                    dev_marker.bright_black()
                );
            }
        }

        Ok(())
    }

    /// Umbrella and theme packages first, then components in manifest order.
    fn collect(pkg: &PackageJson) -> Vec<ListedPackage> {
        let all = pkg.get_all_dependencies();

        let core = [UMBRELLA_PACKAGE, THEME_PACKAGE]
            .into_iter()
            .filter_map(|name| all.get_key_value(name))
            .map(|(name, entry)| (name.clone(), entry.clone()));

        core.chain(pkg.component_dependencies())
            .map(|(name, entry)| {
                let spec = split_version_and_mode(&entry);
                ListedPackage {
                    dev: pkg.has_dependency(&name) == Some(DependencyType::DevDependencies),
                    version: format!("{}{}", spec.mode, spec.version),
                    name,
                }
            })
            .collect()
    }
}
