//! Registry and collaborator test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::Barrier;

use verify_deps::manifest::package_json::{InstalledPackages, Manifest};
use verify_deps::manifest::types::DependencyKind;
use verify_deps::verify::{Installer, Reporter, Verifier};
use verify_deps::version::error::{InstallError, InstalledLookupError, RegistryError};
use verify_deps::version::registry::Registry;
use verify_deps::version::types::{DistTags, PackageVersions};

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<String, Vec<String>>,
    latest: HashMap<String, String>,
    queried: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>, latest: &str) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self.latest.insert(package.to_string(), latest.to_string());
        self
    }

    /// Package names passed to `fetch_versions`, in call order
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        self.queried.lock().unwrap().push(package_name.to_string());
        match self.versions.get(package_name) {
            Some(versions) => Ok(PackageVersions::new(versions.clone())),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }

    async fn fetch_dist_tags(&self, package_name: &str) -> Result<DistTags, RegistryError> {
        Ok(self
            .latest
            .get(package_name)
            .map(|latest| DistTags::latest(latest))
            .unwrap_or_default())
    }
}

/// Registry whose version lookups only complete once `size` of them are in flight
pub struct BarrierRegistry {
    inner: MockRegistry,
    barrier: Barrier,
}

impl BarrierRegistry {
    pub fn new(inner: MockRegistry, size: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(size),
        }
    }
}

#[async_trait]
impl Registry for BarrierRegistry {
    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        self.barrier.wait().await;
        self.inner.fetch_versions(package_name).await
    }

    async fn fetch_dist_tags(&self, package_name: &str) -> Result<DistTags, RegistryError> {
        self.inner.fetch_dist_tags(package_name).await
    }
}

/// Installed versions keyed by package name; anything else is "not installed"
#[derive(Default)]
pub struct MockInstalled {
    versions: HashMap<String, String>,
}

impl MockInstalled {
    pub fn new(installed: &[(&str, &str)]) -> Self {
        Self {
            versions: installed
                .iter()
                .map(|(name, version)| (name.to_string(), version.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl InstalledPackages for MockInstalled {
    async fn installed_version(&self, package_name: &str) -> Result<String, InstalledLookupError> {
        self.versions
            .get(package_name)
            .cloned()
            .ok_or_else(|| InstalledLookupError::NotInstalled(package_name.to_string()))
    }
}

/// Records installer invocations
#[derive(Default)]
pub struct MockInstaller {
    calls: Mutex<Vec<(DependencyKind, String)>>,
}

impl MockInstaller {
    pub fn calls(&self) -> Vec<(DependencyKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Installer for MockInstaller {
    async fn install(&self, kind: DependencyKind, package_ids: &str) -> Result<String, InstallError> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, package_ids.to_string()));
        Ok(format!("+ {package_ids}"))
    }
}

/// Collects reported lines
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// A verifier wired to mocks, with handles to inspect them afterwards
pub struct TestVerifier {
    pub verifier: Verifier,
    pub registry: Arc<MockRegistry>,
    pub installer: Arc<MockInstaller>,
    pub reporter: Arc<RecordingReporter>,
}

pub fn create_test_verifier(registry: MockRegistry, installed: &[(&str, &str)]) -> TestVerifier {
    let registry = Arc::new(registry);
    let installer = Arc::new(MockInstaller::default());
    let reporter = Arc::new(RecordingReporter::default());
    let verifier = Verifier::new(
        registry.clone(),
        Arc::new(MockInstalled::new(installed)),
        installer.clone(),
        reporter.clone(),
    );
    TestVerifier {
        verifier,
        registry,
        installer,
        reporter,
    }
}

/// Build a manifest from (name, range) pairs
pub fn create_manifest(prod: &[(&str, &str)], dev: &[(&str, &str)]) -> Manifest {
    let group = |deps: &[(&str, &str)]| {
        deps.iter()
            .map(|(name, range)| (name.to_string(), range.to_string()))
            .collect::<IndexMap<_, _>>()
    };
    Manifest {
        dependencies: group(prod),
        dev_dependencies: group(dev),
        ..Default::default()
    }
}
