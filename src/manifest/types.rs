//! Common types for manifests

use std::fmt;

/// Which dependency group a declaration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// `dependencies`
    Prod,
    /// `devDependencies`
    Dev,
}

impl DependencyKind {
    /// Returns the string representation of the dependency kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Prod => "prod",
            DependencyKind::Dev => "dev",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency as declared in package.json
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// Package name (e.g., "lodash", "@types/node")
    pub name: String,
    /// Declared range (e.g., "^4.17.21", "~1.2.0", "1.0.0")
    pub declared_range: String,
    pub kind: DependencyKind,
}
