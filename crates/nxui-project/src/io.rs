use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::package_json::PackageJson;

pub fn read_package_json(project_dir: &Path) -> anyhow::Result<PackageJson> {
    let path = project_dir.join("package.json");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: PackageJson = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parsed)
}

/// Reads `node_modules/<name>/package.json`. Returns `None` when the package
/// is not installed on disk or its manifest cannot be parsed.
pub fn read_installed_manifest(project_dir: &Path, name: &str) -> Option<PackageJson> {
    let package_dir = name
        .split('/')
        .fold(project_dir.join("node_modules"), |dir, part| dir.join(part));
    read_package_json(&package_dir).ok()
}
