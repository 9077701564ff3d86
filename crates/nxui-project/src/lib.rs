pub mod io;
pub mod package_json;

pub use io::{read_installed_manifest, read_package_json};
pub use package_json::{DependencyType, PackageJson};
