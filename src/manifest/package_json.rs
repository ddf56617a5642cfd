//! package.json reader and installed-version lookup

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::Config;
use crate::manifest::types::{DependencyDeclaration, DependencyKind};
use crate::version::error::{InstalledLookupError, ManifestError};

const MANIFEST_FILE: &str = "package.json";

/// The parts of package.json this tool reads
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
    /// Tool configuration under the `verifyDeps` key
    pub verify_deps: Config,
}

impl Manifest {
    /// All declarations, production first, each group in manifest order
    pub fn declarations(&self) -> Vec<DependencyDeclaration> {
        let group = |deps: &IndexMap<String, String>, kind: DependencyKind| {
            deps.iter()
                .map(move |(name, range)| DependencyDeclaration {
                    name: name.clone(),
                    declared_range: range.clone(),
                    kind,
                })
                .collect::<Vec<_>>()
        };

        let mut declarations = group(&self.dependencies, DependencyKind::Prod);
        declarations.extend(group(&self.dev_dependencies, DependencyKind::Dev));
        declarations
    }
}

/// Read `<dir>/package.json`
pub fn read_manifest(dir: &Path) -> Result<Manifest, ManifestError> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ManifestError::NotFound { path: path.clone() }
        } else {
            ManifestError::Io {
                path: path.clone(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Parse { path, source })
}

/// Lookup of locally installed package versions
#[async_trait::async_trait]
pub trait InstalledPackages: Send + Sync {
    /// Version of the installed package, or why it could not be determined
    async fn installed_version(&self, package_name: &str) -> Result<String, InstalledLookupError>;
}

#[derive(Debug, Deserialize)]
struct InstalledManifest {
    version: Option<String>,
}

/// Reads installed versions from `<dir>/node_modules/<name>/package.json`
#[derive(Debug, Clone)]
pub struct NodeModules {
    root: PathBuf,
}

impl NodeModules {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            root: project_dir.join("node_modules"),
        }
    }
}

#[async_trait::async_trait]
impl InstalledPackages for NodeModules {
    async fn installed_version(&self, package_name: &str) -> Result<String, InstalledLookupError> {
        // Scoped names map onto nested directories: @scope/name -> @scope/name/
        let path = package_name
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
            .join(MANIFEST_FILE);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => {
                    InstalledLookupError::NotInstalled(package_name.to_string())
                }
                _ => InstalledLookupError::Io {
                    name: package_name.to_string(),
                    source,
                },
            })?;

        let manifest: InstalledManifest =
            serde_json::from_str(&content).map_err(|source| InstalledLookupError::Parse {
                name: package_name.to_string(),
                source,
            })?;

        manifest
            .version
            .ok_or_else(|| InstalledLookupError::MissingVersion(package_name.to_string()))
    }
}
