pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Checks NextUI packages and their peer dependencies for upgrades";
pub const REPOSITORY_URL: &str = "https://github.com/nextui-org/nextui-cli";
pub const BIN_NAME: &str = "nxui";

pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    (
        "upgrade",
        "Checks installed NextUI packages and their peers for upgrades",
        &["up"],
    ),
    ("list", "Lists installed NextUI components", &["ls"]),
    ("help", "Shows help information", &[]),
];

pub const EXAMPLES: &[(&str, &str)] = &[
    ("nxui upgrade", "Check every installed NextUI package"),
    ("nxui upgrade button", "Check a single component"),
    ("nxui upgrade --all", "Check the @nextui-org/react package"),
    ("nxui upgrade --json", "Print the upgrades as JSON"),
    ("nxui list", "List installed components"),
];

/// The all-in-one package. When installed, the whole library is upgraded as one unit.
pub const UMBRELLA_PACKAGE: &str = "@nextui-org/react";
/// Theme package whose peers are upgraded together with the umbrella package.
pub const THEME_PACKAGE: &str = "@nextui-org/theme";
/// Scope shared by every individually installable component.
pub const COMPONENT_SCOPE: &str = "@nextui-org/";
/// Scoped packages that are not components.
pub const NON_COMPONENT_PACKAGES: &[&str] = &[
    "@nextui-org/react",
    "@nextui-org/theme",
    "@nextui-org/system",
    "@nextui-org/system-rsc",
    "@nextui-org/shared-utils",
    "@nextui-org/shared-icons",
    "@nextui-org/use-aria-button",
];

pub const REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const USER_AGENT: &str = concat!("nxui/", env!("CARGO_PKG_VERSION"));
pub const MAX_ATTEMPTS: u32 = 4;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const COMPONENTS_LABEL: &str = "Components";
pub const PEER_DEPENDENCIES_LABEL: &str = "PeerDependencies";
pub const LATEST_MARKER: &str = "latest";
