//! Verification layer
//!
//! Runs the version resolution pipeline over a project's declared
//! dependencies and reports or applies the resulting upgrade plan.
//!
//! # Modules
//!
//! - [`batch`]: Concurrent per-dependency pipelines and plan handling
//! - [`verdict`]: Per-dependency upgrade determination
//! - [`plan`]: Upgrades grouped by production / development
//! - [`installer`]: Installer trait and the npm implementation
//! - [`reporter`]: User-facing report output

pub mod batch;
pub mod installer;
pub mod plan;
pub mod reporter;
pub mod verdict;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::RegistryClient;
use crate::manifest::package_json::{NodeModules, read_manifest};
use crate::version::error::VerifyError;
use crate::version::registries::{NpmCliRegistry, NpmRegistry};
use crate::version::registry::Registry;

pub use batch::Verifier;
pub use installer::{Installer, NpmInstaller};
pub use reporter::{ConsoleReporter, Reporter};

/// What to do with a non-empty upgrade plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpgradeMode {
    /// Report the plan and fail
    #[default]
    Manual,
    /// Install the plan
    Auto,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate,
    Upgraded { output: String },
}

/// Options for [`verify_deps`]
pub struct VerifyOptions {
    /// Directory containing package.json and node_modules
    pub dir: PathBuf,
    pub mode: UpgradeMode,
    /// Query this registry over HTTP instead of the configured client
    pub registry_url: Option<String>,
    /// Defaults to [`ConsoleReporter`]
    pub reporter: Option<Arc<dyn Reporter>>,
}

impl VerifyOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: UpgradeMode::default(),
            registry_url: None,
            reporter: None,
        }
    }
}

/// Verify the dependencies of the project in `options.dir`
pub async fn verify_deps(options: VerifyOptions) -> Result<Outcome, VerifyError> {
    let manifest = read_manifest(&options.dir)?;

    let mut config = manifest.verify_deps.clone();
    if let Some(url) = &options.registry_url {
        config = config.with_registry_url(url);
    }

    let registry: Arc<dyn Registry> = match config.registry.client {
        RegistryClient::Npm => Arc::new(NpmCliRegistry),
        RegistryClient::Http => Arc::new(NpmRegistry::new(&config.registry.url)?),
    };
    info!(
        "Verifying {} with {:?} registry client",
        options.dir.display(),
        config.registry.client
    );

    let verifier = Verifier::new(
        registry,
        Arc::new(NodeModules::new(&options.dir)),
        Arc::new(NpmInstaller::new(&options.dir)),
        options
            .reporter
            .unwrap_or_else(|| Arc::new(ConsoleReporter) as Arc<dyn Reporter>),
    );

    verifier.verify(&manifest, options.mode).await
}
