//! Per-framework project layout
//!
//! Each framework places its entry point, app shell and demo components differently. The
//! composition engine, the generator and the guard all ask the [`FrameworkProfile`] for paths
//! instead of hardcoding them.

use crate::compose::EntryShape;
use crate::features::{Framework, Language};
use std::path::Path;

/// Layout and tooling details for one framework
pub trait FrameworkProfile: Send + Sync {
    fn framework(&self) -> Framework;

    /// Human-readable framework name
    fn display_name(&self) -> &'static str {
        self.framework().display_name()
    }

    /// How the generated entry point wires providers
    fn entry_shape(&self) -> EntryShape;

    /// Prefix of the source tree relative to the project root (`src/` or empty)
    fn source_prefix(&self) -> &'static str;

    /// Module prefix that reaches the source tree from the entry point and app shell
    fn import_base(&self) -> &'static str;

    /// Entry point file, relative to the project root
    fn entry_file(&self, language: Language) -> String;

    /// App shell listing the demos
    fn app_file(&self, language: Language) -> String;

    /// Global stylesheet carrying the Tailwind directives
    fn stylesheet(&self) -> &'static str;

    /// Extension of generated component files
    fn component_ext(&self, language: Language) -> &'static str {
        language.component_ext()
    }

    /// Whether component imports spell out the file extension
    fn imports_with_ext(&self) -> bool {
        false
    }

    /// Directory holding demo components
    fn demo_dir(&self) -> String {
        format!("{}components/demo", self.source_prefix())
    }

    /// `package.json` scripts
    fn scripts(&self) -> Vec<(&'static str, &'static str)>;

    /// URL the dev server listens on
    fn dev_url(&self) -> &'static str;

    /// Instructions printed after generation
    fn next_steps(&self, dir: &Path, package_manager: &str) -> Vec<String> {
        vec![
            format!("cd {}", dir.display()),
            format!("{} run dev", package_manager),
            format!("open {}", self.dev_url()),
        ]
    }
}

/// Vite + React
#[derive(Debug, Clone, Copy)]
pub struct ReactProfile;

/// Next.js app router
#[derive(Debug, Clone, Copy)]
pub struct NextProfile;

/// Vite + Vue 3
#[derive(Debug, Clone, Copy)]
pub struct VueProfile;

const VITE_SCRIPTS: [(&str, &str); 3] = [
    ("dev", "vite"),
    ("build", "vite build"),
    ("preview", "vite preview"),
];

impl FrameworkProfile for ReactProfile {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn entry_shape(&self) -> EntryShape {
        EntryShape::ReactRoot
    }

    fn source_prefix(&self) -> &'static str {
        "src/"
    }

    fn import_base(&self) -> &'static str {
        "./"
    }

    fn entry_file(&self, language: Language) -> String {
        format!("src/main.{}", language.component_ext())
    }

    fn app_file(&self, language: Language) -> String {
        format!("src/App.{}", language.component_ext())
    }

    fn stylesheet(&self) -> &'static str {
        "src/styles/index.css"
    }

    fn scripts(&self) -> Vec<(&'static str, &'static str)> {
        VITE_SCRIPTS.to_vec()
    }

    fn dev_url(&self) -> &'static str {
        "http://localhost:5173"
    }
}

impl FrameworkProfile for NextProfile {
    fn framework(&self) -> Framework {
        Framework::Next
    }

    fn entry_shape(&self) -> EntryShape {
        EntryShape::NextProviders
    }

    fn source_prefix(&self) -> &'static str {
        ""
    }

    fn import_base(&self) -> &'static str {
        "../"
    }

    fn entry_file(&self, language: Language) -> String {
        format!("app/providers.{}", language.component_ext())
    }

    fn app_file(&self, language: Language) -> String {
        format!("app/page.{}", language.component_ext())
    }

    fn stylesheet(&self) -> &'static str {
        "app/globals.css"
    }

    fn scripts(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("dev", "next dev"),
            ("build", "next build"),
            ("start", "next start"),
        ]
    }

    fn dev_url(&self) -> &'static str {
        "http://localhost:3000"
    }
}

impl FrameworkProfile for VueProfile {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn entry_shape(&self) -> EntryShape {
        EntryShape::VuePlugins
    }

    fn source_prefix(&self) -> &'static str {
        "src/"
    }

    fn import_base(&self) -> &'static str {
        "./"
    }

    fn entry_file(&self, language: Language) -> String {
        format!("src/main.{}", language.module_ext())
    }

    fn app_file(&self, _language: Language) -> String {
        "src/App.vue".to_string()
    }

    fn stylesheet(&self) -> &'static str {
        "src/style.css"
    }

    fn component_ext(&self, _language: Language) -> &'static str {
        "vue"
    }

    fn imports_with_ext(&self) -> bool {
        true
    }

    fn scripts(&self) -> Vec<(&'static str, &'static str)> {
        VITE_SCRIPTS.to_vec()
    }

    fn dev_url(&self) -> &'static str {
        "http://localhost:5173"
    }
}

static REACT: ReactProfile = ReactProfile;
static NEXT: NextProfile = NextProfile;
static VUE: VueProfile = VueProfile;

/// Profile for a framework
pub fn profile_for(framework: Framework) -> &'static dyn FrameworkProfile {
    match framework {
        Framework::React => &REACT,
        Framework::Next => &NEXT,
        Framework::Vue => &VUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_match_framework() {
        for framework in Framework::ALL {
            assert_eq!(profile_for(framework).framework(), framework);
        }
    }

    #[test]
    fn test_entry_files() {
        assert_eq!(profile_for(Framework::React).entry_file(Language::Ts), "src/main.tsx");
        assert_eq!(
            profile_for(Framework::Next).entry_file(Language::Js),
            "app/providers.jsx"
        );
        assert_eq!(profile_for(Framework::Vue).entry_file(Language::Ts), "src/main.ts");
    }

    #[test]
    fn test_demo_dirs() {
        assert_eq!(profile_for(Framework::React).demo_dir(), "src/components/demo");
        assert_eq!(profile_for(Framework::Next).demo_dir(), "components/demo");
    }

    #[test]
    fn test_next_steps_mention_package_manager() {
        let steps = profile_for(Framework::Next).next_steps(Path::new("my-app"), "pnpm");
        assert_eq!(steps[0], "cd my-app");
        assert!(steps[1].starts_with("pnpm run dev"));
    }
}
