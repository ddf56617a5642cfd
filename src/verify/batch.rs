//! Concurrent verification of every declared dependency

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::manifest::package_json::{InstalledPackages, Manifest};
use crate::manifest::types::{DependencyDeclaration, DependencyKind};
use crate::verify::installer::Installer;
use crate::verify::plan::UpgradePlan;
use crate::verify::reporter::Reporter;
use crate::verify::verdict::{Verdict, build_verdict};
use crate::verify::{Outcome, UpgradeMode};
use crate::version::error::{RegistryError, VerifyError};
use crate::version::name::NameValidator;
use crate::version::range::DeclaredRange;
use crate::version::registry::Registry;
use crate::version::resolver::reconcile_with_latest;
use crate::version::selector::select_candidate;

/// Groups the collaborators needed to verify a manifest:
/// - Querying the registry for published versions and dist-tags
/// - Looking up installed versions
/// - Installing upgrades in auto-upgrade mode
/// - Reporting progress to the user
pub struct Verifier {
    registry: Arc<dyn Registry>,
    installed: Arc<dyn InstalledPackages>,
    installer: Arc<dyn Installer>,
    reporter: Arc<dyn Reporter>,
    names: NameValidator,
}

impl Verifier {
    pub fn new(
        registry: Arc<dyn Registry>,
        installed: Arc<dyn InstalledPackages>,
        installer: Arc<dyn Installer>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            registry,
            installed,
            installer,
            reporter,
            names: NameValidator::new(),
        }
    }

    /// Resolve every declared dependency concurrently and act on the result.
    ///
    /// Any failing dependency aborts the whole batch. In manual mode a
    /// non-empty plan is reported and returned as
    /// [`VerifyError::UpgradesRequired`].
    pub async fn verify(
        &self,
        manifest: &Manifest,
        mode: UpgradeMode,
    ) -> Result<Outcome, VerifyError> {
        self.reporter.info("Checking NPM module versions…");

        let pipelines = manifest
            .declarations()
            .into_iter()
            .filter_map(|declaration| {
                let range = DeclaredRange::parse(&declaration.declared_range);
                if range.is_locked() {
                    debug!(
                        "Skipping locked dependency {}@{}",
                        declaration.name, declaration.declared_range
                    );
                    return None;
                }
                if let DeclaredRange::Unsupported(raw) = &range {
                    warn!(
                        "Skipping {}: \"{}\" is not a registry version range",
                        declaration.name, raw
                    );
                    return None;
                }
                Some(self.resolve(declaration, range))
            });

        let verdicts = try_join_all(pipelines).await?;
        let plan = UpgradePlan::from_verdicts(&verdicts);

        if plan.is_empty() {
            self.reporter.info("All NPM modules are up to date.");
            return Ok(Outcome::UpToDate);
        }

        match mode {
            UpgradeMode::Manual => {
                self.report_plan(&plan);
                Err(VerifyError::UpgradesRequired)
            }
            UpgradeMode::Auto => self.apply(&plan).await,
        }
    }

    /// Run the resolution pipeline for a single dependency
    async fn resolve(
        &self,
        declaration: DependencyDeclaration,
        range: DeclaredRange,
    ) -> Result<Verdict, VerifyError> {
        self.names.validate(&declaration.name)?;

        let name = declaration.name.as_str();
        let metadata = async {
            let versions = self.registry.fetch_versions(name).await?;
            let tags = self.registry.fetch_dist_tags(name).await?;
            Ok::<_, RegistryError>((versions, tags))
        };
        let (installed, metadata) = tokio::join!(self.installed_version(name), metadata);
        let (versions, tags) = metadata?;

        let raw_candidate = select_candidate(
            name,
            &declaration.declared_range,
            &range,
            &versions.versions,
        )?;
        let candidate =
            reconcile_with_latest(&raw_candidate, tags.latest.as_deref(), range.is_prerelease());
        debug!(
            "{}@{}: raw candidate {}, resolved {}",
            name, declaration.declared_range, raw_candidate, candidate
        );

        let verdict = build_verdict(declaration, installed, candidate);
        if verdict.should_upgrade {
            self.reporter.info(&verdict.summary());
        }
        Ok(verdict)
    }

    /// Installed version, with lookup failures treated as "not installed"
    async fn installed_version(&self, name: &str) -> Option<String> {
        self.installed
            .installed_version(name)
            .await
            .inspect_err(|e| info!("{}", e))
            .ok()
    }

    fn report_plan(&self, plan: &UpgradePlan) {
        self.reporter.info("To resolve this, run:");
        for kind in [DependencyKind::Prod, DependencyKind::Dev] {
            if let Some(command) = plan.install_command(kind) {
                self.reporter.info(&command);
            }
        }
    }

    async fn apply(&self, plan: &UpgradePlan) -> Result<Outcome, VerifyError> {
        self.reporter.info("Upgrading dependencies…");

        let mut outputs = Vec::new();
        for kind in [DependencyKind::Prod, DependencyKind::Dev] {
            if plan.group(kind).is_empty() {
                continue;
            }
            let output = self.installer.install(kind, &plan.package_ids(kind)).await?;
            outputs.push(output.trim_end().to_string());
        }

        let output = outputs.join("\n");
        self.reporter.info(&output);
        Ok(Outcome::Upgraded { output })
    }
}
