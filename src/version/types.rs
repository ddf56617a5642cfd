//! Registry metadata types

use std::collections::HashMap;

use serde::Deserialize;

/// Versions published for a package, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVersions {
    pub versions: Vec<String>,
}

impl PackageVersions {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Dist-tags published for a package (e.g. `{"latest": "4.17.21", "next": "5.0.0-rc.1"}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DistTags {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(flatten)]
    pub other: HashMap<String, String>,
}

impl DistTags {
    pub fn latest(latest: &str) -> Self {
        Self {
            latest: Some(latest.to_string()),
            other: HashMap::new(),
        }
    }
}
