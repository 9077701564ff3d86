use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    MalformedVersion(String),
    InvalidRange(String, String),
    PackageJsonError(String),
    RegistryError(String, String),
}

impl fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedVersion(version) => {
                write!(f, "Malformed version '{version}'")
            }
            Self::InvalidRange(range, reason) => {
                write!(f, "Invalid version range '{range}': {reason}")
            }
            Self::PackageJsonError(msg) => {
                write!(f, "Package.json error: {msg}")
            }
            Self::RegistryError(name, msg) => {
                write!(f, "Registry lookup failed for '{name}': {msg}")
            }
        }
    }
}

impl std::error::Error for UpgradeError {}

pub type Result<T> = std::result::Result<T, UpgradeError>;
