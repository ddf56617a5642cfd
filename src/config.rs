use serde::Deserialize;
use std::path::PathBuf;

use crate::version::registries::npm::DEFAULT_BASE_URL;

/// File name of the log written under [`data_dir`]
pub const LOG_FILE_NAME: &str = "verify-deps.log";

/// Tool configuration, read from the `verifyDeps` key of package.json
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub registry: RegistryConfig,
}

/// How the registry is queried
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistryClient {
    /// Run `npm view`, honoring the user's npm configuration
    #[default]
    Npm,
    /// Query the registry HTTP API directly
    Http,
}

/// Registry-specific configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub client: RegistryClient,
    /// Base URL for the HTTP client
    pub url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            client: RegistryClient::default(),
            url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Switch to the HTTP client at `url`
    pub fn with_registry_url(mut self, url: &str) -> Self {
        self.registry = RegistryConfig {
            client: RegistryClient::Http,
            url: url.to_string(),
        };
        self
    }
}

/// Returns the path to the data directory for verify-deps.
/// Uses $XDG_DATA_HOME/verify-deps if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/verify-deps,
/// or ./verify-deps if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("verify-deps")
}
