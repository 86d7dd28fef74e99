//! Dependency planning
//!
//! Maps a [`FeatureSet`] to the packages the generated project needs. When several active
//! rules name the same package, the most specific one decides (UI preset over styling over
//! other features over the framework default).

pub mod table;

use crate::error::{Result, ScaffoldError};
use crate::features::FeatureSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub use table::{PackageRule, PackageTable, Scope, Specificity, Trigger};

/// A single resolved package
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    pub package_name: String,
    pub version_constraint: String,
    pub scope: Scope,
}

impl PackageSpec {
    /// `name@constraint`, as handed to the package manager
    pub fn install_spec(&self) -> String {
        format!("{}@{}", self.package_name, self.version_constraint)
    }
}

/// Ordered list of packages: runtime before dev, then by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyPlan {
    pub packages: Vec<PackageSpec>,
}

impl DependencyPlan {
    pub fn iter(&self) -> impl Iterator<Item = &PackageSpec> {
        self.packages.iter()
    }

    pub fn in_scope(&self, scope: Scope) -> impl Iterator<Item = &PackageSpec> {
        self.packages.iter().filter(move |p| p.scope == scope)
    }

    pub fn get(&self, package: &str) -> Option<&PackageSpec> {
        self.packages.iter().find(|p| p.package_name == package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.get(package).is_some()
    }

    pub fn install_specs(&self, scope: Scope) -> Vec<String> {
        self.in_scope(scope).map(PackageSpec::install_spec).collect()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Plan with the built-in table
pub fn plan(features: &FeatureSet) -> Result<DependencyPlan> {
    PackageTable::builtin()?.plan(features)
}

impl PackageTable {
    /// Resolve every active rule into a [`DependencyPlan`]
    pub fn plan(&self, features: &FeatureSet) -> Result<DependencyPlan> {
        let mut by_package: BTreeMap<&str, Vec<&PackageRule>> = BTreeMap::new();
        for rule in self.active_rules(features) {
            by_package.entry(rule.package.as_str()).or_default().push(rule);
        }

        let mut packages = Vec::with_capacity(by_package.len());
        for (package, rules) in by_package {
            let winner = most_specific(package, &rules)?;
            if rules.len() > 1 {
                debug!(
                    package,
                    constraint = %winner.constraint,
                    candidates = rules.len(),
                    "picked most specific constraint"
                );
            }
            packages.push(PackageSpec {
                package_name: package.to_string(),
                version_constraint: winner.constraint.clone(),
                scope: winner.scope,
            });
        }

        packages.sort_by(|a, b| {
            a.scope
                .cmp(&b.scope)
                .then_with(|| a.package_name.cmp(&b.package_name))
        });
        Ok(DependencyPlan { packages })
    }
}

fn most_specific<'r>(package: &str, rules: &[&'r PackageRule]) -> Result<&'r PackageRule> {
    let top = rules
        .iter()
        .map(|r| r.trigger.specificity())
        .max()
        .ok_or_else(|| ScaffoldError::conflict(package, "no rule selected"))?;

    let mut leaders = rules.iter().filter(|r| r.trigger.specificity() == top);
    let first = leaders
        .next()
        .copied()
        .ok_or_else(|| ScaffoldError::conflict(package, "no rule selected"))?;
    for other in leaders {
        if other.constraint != first.constraint || other.scope != first.scope {
            return Err(ScaffoldError::conflict(
                package,
                format!(
                    "`{}` ({}) and `{}` ({}) have the same specificity",
                    first.constraint, first.scope, other.constraint, other.scope
                ),
            ));
        }
    }
    Ok(first)
}
