//! Upgrade plan built from verdicts

use crate::manifest::types::DependencyKind;
use crate::verify::verdict::Verdict;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpgrade {
    pub name: String,
    pub candidate: String,
}

impl PlannedUpgrade {
    /// `name@candidate`, as passed to the installer
    pub fn package_id(&self) -> String {
        format!("{}@{}", self.name, self.candidate)
    }
}

/// Upgrades to apply, split by dependency group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradePlan {
    pub prod: Vec<PlannedUpgrade>,
    pub dev: Vec<PlannedUpgrade>,
}

impl UpgradePlan {
    /// Collect every verdict that needs an upgrade, keeping verdict order
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut plan = Self::default();
        for verdict in verdicts.iter().filter(|v| v.should_upgrade) {
            let upgrade = PlannedUpgrade {
                name: verdict.name.clone(),
                candidate: verdict.latest.clone(),
            };
            match verdict.kind {
                DependencyKind::Prod => plan.prod.push(upgrade),
                DependencyKind::Dev => plan.dev.push(upgrade),
            }
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.prod.is_empty() && self.dev.is_empty()
    }

    pub fn group(&self, kind: DependencyKind) -> &[PlannedUpgrade] {
        match kind {
            DependencyKind::Prod => &self.prod,
            DependencyKind::Dev => &self.dev,
        }
    }

    /// Space-joined `name@candidate` tokens for one group
    pub fn package_ids(&self, kind: DependencyKind) -> String {
        self.group(kind)
            .iter()
            .map(PlannedUpgrade::package_id)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The npm command that applies one group, or None when it is empty
    pub fn install_command(&self, kind: DependencyKind) -> Option<String> {
        if self.group(kind).is_empty() {
            return None;
        }
        let ids = self.package_ids(kind);
        Some(match kind {
            DependencyKind::Prod => format!("npm i {ids}"),
            DependencyKind::Dev => format!("npm i -D {ids}"),
        })
    }
}
