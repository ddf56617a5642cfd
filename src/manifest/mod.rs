//! Manifest layer
//! - package_json.rs: package.json reader and node_modules lookup
//! - types.rs: Common types (DependencyDeclaration, DependencyKind)

pub mod package_json;
pub mod types;

pub use package_json::{InstalledPackages, Manifest, NodeModules, read_manifest};
pub use types::{DependencyDeclaration, DependencyKind};
