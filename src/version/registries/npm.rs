//! npm registry API implementation

use std::collections::HashMap;

use crate::version::error::{RegistryError, RegistryQuery, RegistrySource};
use crate::version::registry::Registry;
use crate::version::types::{DistTags, PackageVersions};
use semver::Version;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default base URL for npm registry
pub const DEFAULT_BASE_URL: &str = "https://registry.npmjs.org";

/// Response from npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
}

/// Registry implementation for npm registry API
#[derive(Clone)]
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("verify-deps/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package_name: &str,
        query: RegistryQuery,
    ) -> Result<T, RegistryError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| {
            warn!("Failed to parse npm registry response: {}", source);
            RegistryError::Parse {
                origin: RegistrySource::Http,
                query,
                source,
            }
        })
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        let url = format!(
            "{}/{}",
            self.base_url,
            Self::encode_package_name(package_name)
        );

        let package_info: NpmPackageResponse = self
            .get_json(&url, package_name, RegistryQuery::Versions)
            .await?;

        // Sort versions by semver (lowest first, highest last)
        let mut versions: Vec<(String, Version)> = package_info
            .versions
            .into_keys()
            .filter_map(|v| Version::parse(&v).ok().map(|parsed| (v, parsed)))
            .collect();

        versions.sort_by(|(_, a), (_, b)| a.cmp(b));

        let versions: Vec<String> = versions.into_iter().map(|(v, _)| v).collect();

        Ok(PackageVersions::new(versions))
    }

    async fn fetch_dist_tags(&self, package_name: &str) -> Result<DistTags, RegistryError> {
        let url = format!(
            "{}/-/package/{}/dist-tags",
            self.base_url,
            Self::encode_package_name(package_name)
        );

        self.get_json(&url, package_name, RegistryQuery::Tags).await
    }
}
