use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::types::DependencyKind;

/// Fatal errors that abort a verification run
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Invalid package name \"{name}\": {}", reasons.join(", "))]
    InvalidName { name: String, reasons: Vec<String> },

    #[error(
        "No applicable version found for {name}@{range}, it is likely unpublished. \
         Please upgrade it manually and re-run."
    )]
    NoApplicableVersion { name: String, range: String },

    #[error("Please update your installed modules.")]
    UpgradesRequired,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Which registry query produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryQuery {
    Versions,
    Tags,
}

impl fmt::Display for RegistryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryQuery::Versions => f.write_str("versions"),
            RegistryQuery::Tags => f.write_str("tags"),
        }
    }
}

/// Which client produced the registry output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrySource {
    NpmView,
    Http,
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::NpmView => f.write_str("npm view"),
            RegistrySource::Http => f.write_str("the registry API"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to parse output from {origin} when getting {query} - {source}")]
    Parse {
        origin: RegistrySource,
        query: RegistryQuery,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to run npm: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No package.json found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Lookup failures for a locally installed package; never fatal
#[derive(Debug, Error)]
pub enum InstalledLookupError {
    #[error("{0} is not installed")]
    NotInstalled(String),

    #[error("Failed to read installed package {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse installed package.json for {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Installed package.json for {0} has no version")]
    MissingVersion(String),
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to run npm install for {kind} dependencies: {source}")]
    Spawn {
        kind: DependencyKind,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn invalid_name_lists_every_reason() {
        let err = VerifyError::InvalidName {
            name: ".Foo".to_string(),
            reasons: vec![
                "name cannot start with a period".to_string(),
                "name can no longer contain capital letters".to_string(),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Invalid package name \".Foo\": name cannot start with a period, \
             name can no longer contain capital letters"
        );
    }

    #[rstest]
    #[case(RegistrySource::NpmView, "Failed to parse output from npm view when getting tags - ")]
    #[case(
        RegistrySource::Http,
        "Failed to parse output from the registry API when getting tags - "
    )]
    fn parse_error_names_the_client_and_query(
        #[case] origin: RegistrySource,
        #[case] prefix: &str,
    ) {
        let source = serde_json::from_str::<Vec<String>>("nope").unwrap_err();
        let err = RegistryError::Parse {
            origin,
            query: RegistryQuery::Tags,
            source,
        };

        assert!(err.to_string().starts_with(prefix));
    }

    #[test]
    fn no_applicable_version_asks_for_manual_upgrade() {
        let err = VerifyError::NoApplicableVersion {
            name: "left-pad".to_string(),
            range: "^1.2.4".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("left-pad@^1.2.4"));
        assert!(message.contains("upgrade it manually and re-run"));
    }
}
