//! Registry trait for fetching package metadata

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{DistTags, PackageVersions};

/// Trait for querying published versions and dist-tags of a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches all published versions for a package
    ///
    /// # Returns
    /// * `Ok(PackageVersions)` - List of versions, possibly empty
    /// * `Err(RegistryError)` - If the query fails or its output cannot be parsed
    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError>;

    /// Fetches the dist-tags for a package (`latest` may be absent)
    async fn fetch_dist_tags(&self, package_name: &str) -> Result<DistTags, RegistryError>;
}
