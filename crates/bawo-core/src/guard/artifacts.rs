//! Files and directories owned by each integration
//!
//! Patterns are language-agnostic: `{src}` is the framework's source prefix, `{demo}` its demo
//! directory, `{ext}` a module extension and `{jsx}` a component extension. Expansion yields
//! both the JavaScript and the TypeScript spelling so cleanup still works after the language
//! changed between runs. Removal goes one step further and expands every framework, so a
//! project that switched frameworks still sheds what the old one produced.
//!
//! Integrations can also own `package.json` scripts.

use crate::features::{Framework, IntegrationId, Language};
use crate::profile::{profile_for, FrameworkProfile};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    File,
    /// Removed recursively
    Dir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactRule {
    pub integration: IntegrationId,
    /// Empty means every framework
    pub frameworks: &'static [Framework],
    pub pattern: &'static str,
    pub kind: ArtifactKind,
}

/// A concrete path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Artifact {
    pub path: String,
    pub kind: ArtifactKind,
}

const REACT_FAMILY: &[Framework] = &[Framework::React, Framework::Next];
const VUE: &[Framework] = &[Framework::Vue];

const fn file(
    integration: IntegrationId,
    frameworks: &'static [Framework],
    pattern: &'static str,
) -> ArtifactRule {
    ArtifactRule {
        integration,
        frameworks,
        pattern,
        kind: ArtifactKind::File,
    }
}

const fn dir(
    integration: IntegrationId,
    frameworks: &'static [Framework],
    pattern: &'static str,
) -> ArtifactRule {
    ArtifactRule {
        integration,
        frameworks,
        pattern,
        kind: ArtifactKind::Dir,
    }
}

const BUILTIN: &[ArtifactRule] = &[
    file(IntegrationId::Zustand, REACT_FAMILY, "{src}store/useCounterStore.{ext}"),
    file(IntegrationId::Zustand, REACT_FAMILY, "{demo}/ZustandDemo.{jsx}"),
    file(IntegrationId::Redux, REACT_FAMILY, "{src}store/store.{ext}"),
    file(IntegrationId::Redux, REACT_FAMILY, "{src}store/counterSlice.{ext}"),
    file(IntegrationId::Redux, REACT_FAMILY, "{demo}/ReduxDemo.{jsx}"),
    file(IntegrationId::RtkQuery, REACT_FAMILY, "{src}store/store.{ext}"),
    file(IntegrationId::RtkQuery, REACT_FAMILY, "{src}store/counterSlice.{ext}"),
    file(IntegrationId::RtkQuery, REACT_FAMILY, "{src}store/api.{ext}"),
    file(IntegrationId::RtkQuery, REACT_FAMILY, "{demo}/RTKQueryDemo.{jsx}"),
    file(IntegrationId::ReactQuery, REACT_FAMILY, "{demo}/ReactQueryDemo.{jsx}"),
    file(IntegrationId::Swr, REACT_FAMILY, "{src}lib/fetcher.{ext}"),
    file(IntegrationId::Swr, REACT_FAMILY, "{demo}/SWRDemo.{jsx}"),
    file(IntegrationId::Context, REACT_FAMILY, "{demo}/ContextDemo.{jsx}"),
    file(IntegrationId::Pinia, VUE, "{src}stores/counter.{ext}"),
    file(IntegrationId::Pinia, VUE, "{demo}/PiniaDemo.{jsx}"),
    file(IntegrationId::Router, &[Framework::React], "{demo}/RouterDemo.{jsx}"),
    file(IntegrationId::Router, VUE, "{src}router/index.{ext}"),
    file(IntegrationId::Router, VUE, "{demo}/RouterDemo.{jsx}"),
    file(IntegrationId::Shadcn, REACT_FAMILY, "components.json"),
    file(IntegrationId::Shadcn, REACT_FAMILY, "{src}lib/utils.{ext}"),
    dir(IntegrationId::Shadcn, REACT_FAMILY, "{src}components/ui"),
    file(IntegrationId::Shadcn, REACT_FAMILY, "{demo}/ShadcnDemo.{jsx}"),
    file(IntegrationId::Framer, REACT_FAMILY, "{demo}/FramerDemo.{jsx}"),
    file(IntegrationId::Gsap, &[], "{demo}/GsapDemo.{jsx}"),
    file(IntegrationId::Prettier, &[], ".prettierrc"),
    file(IntegrationId::Prettier, &[], ".prettierignore"),
];

/// `(integration, script name, command)`
const SCRIPTS: &[(IntegrationId, &str, &str)] =
    &[(IntegrationId::Prettier, "format", "prettier --write .")];

/// Immutable artifact registry
#[derive(Debug, Clone, Copy)]
pub struct ArtifactTable {
    rules: &'static [ArtifactRule],
    scripts: &'static [(IntegrationId, &'static str, &'static str)],
}

impl Default for ArtifactTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArtifactTable {
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN,
            scripts: SCRIPTS,
        }
    }

    pub fn rules_for(
        &self,
        integration: IntegrationId,
        framework: Framework,
    ) -> impl Iterator<Item = &'static ArtifactRule> + '_ {
        self.rules.iter().filter(move |r| {
            r.integration == integration
                && (r.frameworks.is_empty() || r.frameworks.contains(&framework))
        })
    }

    /// Every concrete path an integration may have produced, in both languages
    pub fn artifacts(
        &self,
        integration: IntegrationId,
        profile: &dyn FrameworkProfile,
    ) -> BTreeSet<Artifact> {
        let mut out = BTreeSet::new();
        for rule in self.rules_for(integration, profile.framework()) {
            for language in [Language::Js, Language::Ts] {
                out.insert(Artifact {
                    path: expand(rule.pattern, profile, language),
                    kind: rule.kind,
                });
            }
        }
        out
    }

    /// [`ArtifactTable::artifacts`] for every framework
    pub fn artifacts_any_framework(&self, integration: IntegrationId) -> BTreeSet<Artifact> {
        Framework::ALL
            .iter()
            .flat_map(|framework| self.artifacts(integration, profile_for(*framework)))
            .collect()
    }

    /// `package.json` scripts the integration adds, as `(name, command)`
    pub fn scripts_for(&self, integration: IntegrationId) -> Vec<(&'static str, &'static str)> {
        self.scripts
            .iter()
            .filter(|(id, _, _)| *id == integration)
            .map(|(_, name, command)| (*name, *command))
            .collect()
    }

    /// Paths for one language only, as the generator writes them
    pub fn paths_for(
        &self,
        integration: IntegrationId,
        profile: &dyn FrameworkProfile,
        language: Language,
    ) -> Vec<String> {
        self.rules_for(integration, profile.framework())
            .map(|rule| expand(rule.pattern, profile, language))
            .collect()
    }
}

fn expand(pattern: &str, profile: &dyn FrameworkProfile, language: Language) -> String {
    pattern
        .replace("{demo}", &profile.demo_dir())
        .replace("{src}", profile.source_prefix())
        .replace("{ext}", language.module_ext())
        .replace("{jsx}", profile.component_ext(language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_for;

    #[test]
    fn test_expands_both_languages() {
        let table = ArtifactTable::builtin();
        let artifacts = table.artifacts(IntegrationId::Redux, profile_for(Framework::React));
        let paths: Vec<&str> = artifacts.iter().map(|a| a.path.as_str()).collect();
        assert!(paths.contains(&"src/store/store.js"));
        assert!(paths.contains(&"src/store/store.ts"));
        assert!(paths.contains(&"src/components/demo/ReduxDemo.jsx"));
        assert!(paths.contains(&"src/components/demo/ReduxDemo.tsx"));
    }

    #[test]
    fn test_next_has_no_src_prefix() {
        let table = ArtifactTable::builtin();
        let paths = table.paths_for(
            IntegrationId::Swr,
            profile_for(Framework::Next),
            Language::Ts,
        );
        assert_eq!(paths, vec!["lib/fetcher.ts", "components/demo/SWRDemo.tsx"]);
    }

    #[test]
    fn test_vue_components_use_vue_extension() {
        let table = ArtifactTable::builtin();
        let artifacts = table.artifacts(IntegrationId::Pinia, profile_for(Framework::Vue));
        assert!(artifacts
            .iter()
            .any(|a| a.path == "src/components/demo/PiniaDemo.vue"));
        assert_eq!(artifacts.len(), 3);
    }

    #[test]
    fn test_any_framework_covers_react_and_vue_router() {
        let table = ArtifactTable::builtin();
        let artifacts = table.artifacts_any_framework(IntegrationId::Router);
        assert!(artifacts
            .iter()
            .any(|a| a.path == "src/components/demo/RouterDemo.jsx"));
        assert!(artifacts.iter().any(|a| a.path == "src/router/index.ts"));
        assert!(artifacts
            .iter()
            .any(|a| a.path == "src/components/demo/RouterDemo.vue"));
    }

    #[test]
    fn test_prettier_owns_format_script() {
        let table = ArtifactTable::builtin();
        assert_eq!(
            table.scripts_for(IntegrationId::Prettier),
            vec![("format", "prettier --write .")]
        );
        assert!(table.scripts_for(IntegrationId::Zustand).is_empty());
    }

    #[test]
    fn test_shadcn_ui_is_directory() {
        let table = ArtifactTable::builtin();
        let artifacts = table.artifacts(IntegrationId::Shadcn, profile_for(Framework::React));
        assert!(artifacts
            .iter()
            .any(|a| a.path == "src/components/ui" && a.kind == ArtifactKind::Dir));
    }
}
