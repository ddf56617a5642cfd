//! Registry implementation backed by the `npm view` command
//!
//! Honors the user's npm configuration (`.npmrc`, auth, custom registries)
//! since the npm client itself performs the queries.

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::version::error::{RegistryError, RegistryQuery, RegistrySource};
use crate::version::registry::Registry;
use crate::version::types::{DistTags, PackageVersions};

/// Build a command invoking the npm client
pub fn npm_command() -> Command {
    if cfg!(windows) {
        Command::new("npm.cmd")
    } else {
        Command::new("npm")
    }
}

/// `npm view <pkg> versions --json` prints a bare string for single-version packages
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionsOutput {
    One(String),
    Many(Vec<String>),
}

/// Parse the JSON printed by `npm view <pkg> versions --json`
pub fn parse_versions_output(stdout: &str) -> Result<PackageVersions, RegistryError> {
    let output: VersionsOutput =
        serde_json::from_str(stdout).map_err(|source| RegistryError::Parse {
            origin: RegistrySource::NpmView,
            query: RegistryQuery::Versions,
            source,
        })?;

    Ok(match output {
        VersionsOutput::One(version) => PackageVersions::new(vec![version]),
        VersionsOutput::Many(versions) => PackageVersions::new(versions),
    })
}

/// Parse the JSON printed by `npm view <pkg> dist-tags --json`
pub fn parse_dist_tags_output(stdout: &str) -> Result<DistTags, RegistryError> {
    serde_json::from_str(stdout).map_err(|source| RegistryError::Parse {
        origin: RegistrySource::NpmView,
        query: RegistryQuery::Tags,
        source,
    })
}

#[derive(Debug, Clone, Default)]
pub struct NpmCliRegistry;

impl NpmCliRegistry {
    async fn view(&self, package_name: &str, field: &str) -> Result<String, RegistryError> {
        let command = format!("npm view {package_name} {field} --json");
        debug!("Running `{}`", command);

        let output = npm_command()
            .args(["view", package_name, field, "--json"])
            .output()
            .await?;

        if !output.status.success() {
            return Err(RegistryError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait::async_trait]
impl Registry for NpmCliRegistry {
    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        let stdout = self.view(package_name, "versions").await?;
        parse_versions_output(&stdout)
    }

    async fn fetch_dist_tags(&self, package_name: &str) -> Result<DistTags, RegistryError> {
        let stdout = self.view(package_name, "dist-tags").await?;
        parse_dist_tags_output(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_versions_output_reads_array() {
        let versions = parse_versions_output(r#"["1.0.0", "1.0.1", "2.0.0-beta.0"]"#).unwrap();

        assert_eq!(
            versions.versions,
            vec![
                "1.0.0".to_string(),
                "1.0.1".to_string(),
                "2.0.0-beta.0".to_string()
            ]
        );
    }

    #[test]
    fn parse_versions_output_reads_single_version_as_one_element_list() {
        let versions = parse_versions_output("\"0.1.0\"\n").unwrap();

        assert_eq!(versions.versions, vec!["0.1.0".to_string()]);
    }

    #[test]
    fn parse_versions_output_rejects_non_json() {
        let err = parse_versions_output("npm ERR! something").unwrap_err();

        assert!(matches!(
            err,
            RegistryError::Parse {
                query: RegistryQuery::Versions,
                ..
            }
        ));
        assert!(
            err.to_string()
                .starts_with("Failed to parse output from npm view when getting versions - ")
        );
    }

    #[test]
    fn parse_dist_tags_output_reads_latest() {
        let tags = parse_dist_tags_output(r#"{"latest": "1.2.4", "next": "2.0.0-rc.1"}"#).unwrap();

        assert_eq!(tags.latest.as_deref(), Some("1.2.4"));
    }

    #[test]
    fn parse_dist_tags_output_rejects_non_json() {
        let err = parse_dist_tags_output("").unwrap_err();

        assert!(matches!(
            err,
            RegistryError::Parse {
                query: RegistryQuery::Tags,
                ..
            }
        ));
    }
}
