//! Package lookup table
//!
//! A [`PackageTable`] is built once from a list of [`PackageRule`]s and then only read. Every
//! constraint is checked with `semver` at construction time so a bad entry fails before any
//! planning happens.

use crate::error::{Result, ScaffoldError};
use crate::features::{
    Animation, FeatureSet, Framework, IntegrationId, Language, StateManagement, Styling, UiPreset,
};
use semver::VersionReq;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a package lands in `package.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Runtime,
    Dev,
}

impl Scope {
    /// `package.json` section holding this scope
    pub fn manifest_key(&self) -> &'static str {
        match self {
            Scope::Runtime => "dependencies",
            Scope::Dev => "devDependencies",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Runtime => write!(f, "runtime"),
            Scope::Dev => write!(f, "dev"),
        }
    }
}

/// How specific a rule is; the higher rank wins when two rules name one package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Specificity {
    Framework,
    Feature,
    Styling,
    UiPreset,
}

/// The feature value that pulls a rule in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Framework(Framework),
    Styling(Styling),
    State(StateManagement),
    Router,
    UiPreset(UiPreset),
    Animation(Animation),
    Prettier,
}

impl Trigger {
    pub fn specificity(&self) -> Specificity {
        match self {
            Trigger::Framework(_) => Specificity::Framework,
            Trigger::Styling(_) => Specificity::Styling,
            Trigger::UiPreset(_) => Specificity::UiPreset,
            Trigger::State(_) | Trigger::Router | Trigger::Animation(_) | Trigger::Prettier => {
                Specificity::Feature
            }
        }
    }

    pub fn is_active(&self, features: &FeatureSet) -> bool {
        match self {
            Trigger::Framework(f) => features.framework == *f,
            Trigger::Styling(s) => features.styling == *s,
            Trigger::State(s) => features.state_management == *s,
            Trigger::Router => features.router,
            Trigger::UiPreset(p) => features.ui_preset == *p,
            Trigger::Animation(a) => features.has_animation(*a),
            Trigger::Prettier => features.prettier,
        }
    }

    /// Removable integration this trigger belongs to, if any
    pub fn integration(&self) -> Option<IntegrationId> {
        match self {
            Trigger::State(s) => s.integration(),
            Trigger::Router => Some(IntegrationId::Router),
            Trigger::UiPreset(UiPreset::Shadcn) => Some(IntegrationId::Shadcn),
            Trigger::Animation(a) => Some(a.integration()),
            Trigger::Prettier => Some(IntegrationId::Prettier),
            Trigger::Framework(_) | Trigger::Styling(_) | Trigger::UiPreset(UiPreset::None) => {
                None
            }
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRule {
    pub trigger: Trigger,
    /// Empty means every framework
    pub frameworks: Vec<Framework>,
    pub language: Option<Language>,
    pub package: String,
    pub constraint: String,
    pub scope: Scope,
}

impl PackageRule {
    pub fn new(trigger: Trigger, package: &str, constraint: &str, scope: Scope) -> Self {
        Self {
            trigger,
            frameworks: Vec::new(),
            language: None,
            package: package.to_string(),
            constraint: constraint.to_string(),
            scope,
        }
    }

    /// Restrict the rule to some frameworks
    pub fn only(mut self, frameworks: &[Framework]) -> Self {
        self.frameworks = frameworks.to_vec();
        self
    }

    /// Restrict the rule to one language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    fn applies_to(&self, framework: Framework, language: Language) -> bool {
        (self.frameworks.is_empty() || self.frameworks.contains(&framework))
            && self.language.map_or(true, |l| l == language)
    }

    pub fn is_active(&self, features: &FeatureSet) -> bool {
        self.trigger.is_active(features) && self.applies_to(features.framework, features.language)
    }
}

/// Immutable set of package rules
#[derive(Debug, Clone)]
pub struct PackageTable {
    rules: Vec<PackageRule>,
}

impl PackageTable {
    /// Build a table, rejecting constraints that are not valid semver ranges
    pub fn new(rules: Vec<PackageRule>) -> Result<Self> {
        for rule in &rules {
            validate_constraint(&rule.package, &rule.constraint)?;
        }
        Ok(Self { rules })
    }

    /// The table shipped with the scaffolder
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_rules())
    }

    pub fn rules(&self) -> &[PackageRule] {
        &self.rules
    }

    /// Rules whose trigger is active for `features`
    pub fn active_rules<'a>(
        &'a self,
        features: &'a FeatureSet,
    ) -> impl Iterator<Item = &'a PackageRule> + 'a {
        self.rules.iter().filter(move |r| r.is_active(features))
    }

    /// Packages an integration contributes for the given framework and language
    pub fn packages_for(
        &self,
        integration: IntegrationId,
        framework: Framework,
        language: Language,
    ) -> Vec<String> {
        let mut packages: Vec<String> = self
            .rules
            .iter()
            .filter(|r| r.trigger.integration() == Some(integration))
            .filter(|r| r.applies_to(framework, language))
            .map(|r| r.package.clone())
            .collect();
        packages.sort();
        packages.dedup();
        packages
    }
}

fn validate_constraint(package: &str, constraint: &str) -> Result<()> {
    if constraint == "latest" {
        return Ok(());
    }
    VersionReq::parse(constraint).map(|_| ()).map_err(|e| {
        ScaffoldError::validation(
            package,
            format!("invalid version constraint `{}`: {}", constraint, e),
        )
    })
}

fn builtin_rules() -> Vec<PackageRule> {
    use Framework::{Next, React, Vue};
    use Scope::{Dev, Runtime};

    let rule = PackageRule::new;
    vec![
        // React + Vite
        rule(Trigger::Framework(React), "react", "^18.3.1", Runtime),
        rule(Trigger::Framework(React), "react-dom", "^18.3.1", Runtime),
        rule(Trigger::Framework(React), "vite", "^5.4.0", Dev),
        rule(Trigger::Framework(React), "@vitejs/plugin-react", "^4.3.0", Dev),
        rule(Trigger::Framework(React), "tailwindcss", "^3", Dev),
        rule(Trigger::Framework(React), "typescript", "^5.5.0", Dev).with_language(Language::Ts),
        rule(Trigger::Framework(React), "@types/react", "^18.3.0", Dev)
            .with_language(Language::Ts),
        rule(Trigger::Framework(React), "@types/react-dom", "^18.3.0", Dev)
            .with_language(Language::Ts),
        // Next.js
        rule(Trigger::Framework(Next), "next", "^14.2.0", Runtime),
        rule(Trigger::Framework(Next), "react", "^18.3.1", Runtime),
        rule(Trigger::Framework(Next), "react-dom", "^18.3.1", Runtime),
        rule(Trigger::Framework(Next), "tailwindcss", "^3", Dev),
        rule(Trigger::Framework(Next), "typescript", "^5.5.0", Dev).with_language(Language::Ts),
        rule(Trigger::Framework(Next), "@types/react", "^18.3.0", Dev).with_language(Language::Ts),
        rule(Trigger::Framework(Next), "@types/react-dom", "^18.3.0", Dev)
            .with_language(Language::Ts),
        rule(Trigger::Framework(Next), "@types/node", "^20.14.0", Dev).with_language(Language::Ts),
        // Vue + Vite
        rule(Trigger::Framework(Vue), "vue", "^3.4.0", Runtime),
        rule(Trigger::Framework(Vue), "vite", "^5.4.0", Dev),
        rule(Trigger::Framework(Vue), "@vitejs/plugin-vue", "^5.1.0", Dev),
        rule(Trigger::Framework(Vue), "tailwindcss", "^3", Dev),
        rule(Trigger::Framework(Vue), "typescript", "^5.5.0", Dev).with_language(Language::Ts),
        rule(Trigger::Framework(Vue), "vue-tsc", "^2.0.0", Dev).with_language(Language::Ts),
        // Tailwind
        rule(Trigger::Styling(Styling::TailwindV3), "tailwindcss", "^3.4.14", Dev),
        rule(Trigger::Styling(Styling::TailwindV3), "postcss", "^8.4.0", Dev),
        rule(Trigger::Styling(Styling::TailwindV3), "autoprefixer", "^10.4.0", Dev),
        rule(Trigger::Styling(Styling::TailwindV4), "tailwindcss", "^4.0.0", Dev),
        rule(Trigger::Styling(Styling::TailwindV4), "@tailwindcss/vite", "^4.0.0", Dev)
            .only(&[React, Vue]),
        rule(Trigger::Styling(Styling::TailwindV4), "@tailwindcss/postcss", "^4.0.0", Dev)
            .only(&[Next]),
        // State management
        rule(Trigger::State(StateManagement::Zustand), "zustand", "^4.5.0", Runtime),
        rule(Trigger::State(StateManagement::Redux), "@reduxjs/toolkit", "^2.2.0", Runtime),
        rule(Trigger::State(StateManagement::Redux), "react-redux", "^9.1.0", Runtime),
        rule(Trigger::State(StateManagement::RtkQuery), "@reduxjs/toolkit", "^2.2.0", Runtime),
        rule(Trigger::State(StateManagement::RtkQuery), "react-redux", "^9.1.0", Runtime),
        rule(
            Trigger::State(StateManagement::ReactQuery),
            "@tanstack/react-query",
            "^5.51.0",
            Runtime,
        ),
        rule(Trigger::State(StateManagement::Swr), "swr", "^2.2.5", Runtime),
        rule(Trigger::State(StateManagement::Pinia), "pinia", "^2.2.0", Runtime),
        // Routing
        rule(Trigger::Router, "react-router-dom", "^6.26.0", Runtime).only(&[React]),
        rule(Trigger::Router, "vue-router", "^4.4.0", Runtime).only(&[Vue]),
        // shadcn/ui
        rule(Trigger::UiPreset(UiPreset::Shadcn), "tailwindcss", "3.4.14", Dev),
        rule(Trigger::UiPreset(UiPreset::Shadcn), "tailwindcss-animate", "^1.0.7", Dev),
        rule(
            Trigger::UiPreset(UiPreset::Shadcn),
            "class-variance-authority",
            "^0.7.0",
            Runtime,
        ),
        rule(Trigger::UiPreset(UiPreset::Shadcn), "clsx", "^2.1.1", Runtime),
        rule(Trigger::UiPreset(UiPreset::Shadcn), "tailwind-merge", "^2.5.0", Runtime),
        rule(Trigger::UiPreset(UiPreset::Shadcn), "lucide-react", "^0.441.0", Runtime),
        // Animation
        rule(Trigger::Animation(Animation::Framer), "framer-motion", "^11.3.0", Runtime),
        rule(Trigger::Animation(Animation::Gsap), "gsap", "^3.12.5", Runtime),
        // Formatting
        rule(Trigger::Prettier, "prettier", "^3.3.0", Dev),
        rule(Trigger::Prettier, "prettier-plugin-tailwindcss", "^0.6.0", Dev),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = PackageTable::builtin().unwrap();
        assert!(!table.rules().is_empty());
    }

    #[test]
    fn test_invalid_constraint_rejected() {
        let rules = vec![PackageRule::new(
            Trigger::Router,
            "react-router-dom",
            "six-ish",
            Scope::Runtime,
        )];
        let err = PackageTable::new(rules).unwrap_err();
        assert_eq!(err.field(), Some("react-router-dom"));
    }

    #[test]
    fn test_latest_tag_accepted() {
        let rules = vec![PackageRule::new(Trigger::Prettier, "prettier", "latest", Scope::Dev)];
        assert!(PackageTable::new(rules).is_ok());
    }

    #[test]
    fn test_packages_for_respects_framework() {
        let table = PackageTable::builtin().unwrap();
        assert_eq!(
            table.packages_for(IntegrationId::Router, Framework::React, Language::Js),
            vec!["react-router-dom"]
        );
        assert_eq!(
            table.packages_for(IntegrationId::Router, Framework::Vue, Language::Ts),
            vec!["vue-router"]
        );
        assert!(table
            .packages_for(IntegrationId::Router, Framework::Next, Language::Ts)
            .is_empty());
    }

    #[test]
    fn test_specificity_order() {
        assert!(Specificity::UiPreset > Specificity::Styling);
        assert!(Specificity::Styling > Specificity::Feature);
        assert!(Specificity::Feature > Specificity::Framework);
    }
}
