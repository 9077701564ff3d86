use indexmap::IndexMap;
use serde::Deserialize;

use nxui_constants::{COMPONENT_SCOPE, NON_COMPONENT_PACKAGES};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PackageJson {
    pub name: Option<String>,
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<IndexMap<String, String>>,
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    Dependencies,
    DevDependencies,
}

impl PackageJson {
    /// `dependencies` followed by `devDependencies`, in manifest order.
    /// A package listed in both keeps its `dependencies` entry.
    pub fn get_all_dependencies(&self) -> IndexMap<String, String> {
        let mut all_deps = IndexMap::new();

        for deps in [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
        {
            for (name, version) in deps {
                all_deps
                    .entry(name.clone())
                    .or_insert_with(|| version.clone());
            }
        }

        all_deps
    }

    pub fn has_dependency(&self, name: &str) -> Option<DependencyType> {
        if self
            .dependencies
            .as_ref()
            .is_some_and(|deps| deps.contains_key(name))
        {
            return Some(DependencyType::Dependencies);
        }
        if self
            .dev_dependencies
            .as_ref()
            .is_some_and(|deps| deps.contains_key(name))
        {
            return Some(DependencyType::DevDependencies);
        }
        None
    }

    /// Installed packages from the component scope, excluding the umbrella,
    /// theme and shared infrastructure packages.
    pub fn component_dependencies(&self) -> IndexMap<String, String> {
        self.get_all_dependencies()
            .into_iter()
            .filter(|(name, _)| {
                name.starts_with(COMPONENT_SCOPE) && !NON_COMPONENT_PACKAGES.contains(&name.as_str())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> PackageJson {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_all_dependencies_keeps_manifest_order() {
        let pkg = manifest(
            r#"{
                "dependencies": { "react": "^18.2.0", "@nextui-org/button": "2.0.1" },
                "devDependencies": { "typescript": "~5.3.0", "react": "^17.0.0" }
            }"#,
        );

        let all = pkg.get_all_dependencies();
        let names: Vec<&str> = all.keys().map(String::as_str).collect();

        assert_eq!(names, vec!["react", "@nextui-org/button", "typescript"]);
        assert_eq!(all["react"], "^18.2.0");
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let pkg = manifest(r#"{ "name": "app" }"#);
        assert!(pkg.get_all_dependencies().is_empty());
        assert_eq!(pkg.has_dependency("react"), None);
    }

    #[test]
    fn test_has_dependency_reports_section() {
        let pkg = manifest(
            r#"{ "dependencies": { "a": "1.0.0" }, "devDependencies": { "b": "1.0.0" } }"#,
        );
        assert_eq!(pkg.has_dependency("a"), Some(DependencyType::Dependencies));
        assert_eq!(pkg.has_dependency("b"), Some(DependencyType::DevDependencies));
    }

    #[test]
    fn test_component_dependencies_skip_non_components() {
        let pkg = manifest(
            r#"{
                "dependencies": {
                    "@nextui-org/react": "2.2.0",
                    "@nextui-org/theme": "2.1.0",
                    "@nextui-org/button": "2.0.24",
                    "@nextui-org/input": "^2.1.0",
                    "framer-motion": "^10.0.0"
                }
            }"#,
        );

        let components = pkg.component_dependencies();
        let names: Vec<&str> = components.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["@nextui-org/button", "@nextui-org/input"]);
    }

    #[test]
    fn test_unread_manifest_sections_are_ignored() {
        let pkg = manifest(
            r#"{
                "name": "app",
                "version": "0.1.0",
                "optionalDependencies": { "fsevents": "^2.3.0" },
                "dependencies": { "@nextui-org/button": "2.0.24" }
            }"#,
        );
        let all = pkg.get_all_dependencies();
        let names: Vec<&str> = all.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["@nextui-org/button"]);
        assert_eq!(pkg.has_dependency("fsevents"), None);
    }
}
