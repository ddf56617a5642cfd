//! Per-dependency upgrade verdicts

use crate::manifest::types::{DependencyDeclaration, DependencyKind};

/// Operators stripped from a declared range to get its bare version
const RANGE_OPERATORS: [&str; 7] = [">=", "<=", "^", "~", ">", "<", "="];

/// The upgrade determination for one declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub name: String,
    /// Declared range from package.json
    pub wanted: String,
    /// Version found in node_modules, if any
    pub installed: Option<String>,
    /// Final upgrade candidate after latest-tag reconciliation
    pub latest: String,
    pub should_upgrade: bool,
    pub kind: DependencyKind,
}

impl Verdict {
    /// The bare version implied by the declared range
    pub fn range_fixed(&self) -> &str {
        range_fixed(&self.wanted)
    }

    /// `"not installed"`, or `"<shown> → <latest>"` where `<shown>` is the
    /// declared version when it differs from what is installed
    pub fn diff(&self) -> String {
        match &self.installed {
            None => "not installed".to_string(),
            Some(installed) => {
                let fixed = self.range_fixed();
                let shown = if fixed != installed { fixed } else { installed };
                format!("{} → {}", shown, self.latest)
            }
        }
    }

    /// The report line for a dependency that needs upgrading
    pub fn summary(&self) -> String {
        match self.installed {
            None => format!("{} is {}", self.name, self.diff()),
            Some(_) => format!("{} is outdated: {}", self.name, self.diff()),
        }
    }
}

/// Strip a leading range operator (`^1.2.3` -> `1.2.3`)
pub fn range_fixed(declared_range: &str) -> &str {
    let trimmed = declared_range.trim();
    RANGE_OPERATORS
        .iter()
        .find_map(|op| trimmed.strip_prefix(op))
        .unwrap_or(trimmed)
        .trim_start()
}

/// Combine the installed version and the resolved candidate into a verdict
pub fn build_verdict(
    declaration: DependencyDeclaration,
    installed: Option<String>,
    candidate: String,
) -> Verdict {
    let should_upgrade = match installed.as_deref() {
        None => true,
        Some(installed) => {
            range_fixed(&declaration.declared_range) != installed || installed != candidate
        }
    };

    Verdict {
        name: declaration.name,
        wanted: declaration.declared_range,
        installed,
        latest: candidate,
        should_upgrade,
        kind: declaration.kind,
    }
}
