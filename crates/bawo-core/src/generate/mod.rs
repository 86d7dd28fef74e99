//! Writing the project to disk
//!
//! Runs after the guard has reconciled the target. The entry and app shells and the build
//! configuration are regenerated on every run; everything else is written once and then left
//! to the user, except files of integrations the guard just classified as new. Shells and
//! configuration a different language or framework would have written are deleted.

pub mod files;

use crate::compose::{render_app, render_entry, CompositionPlan};
use crate::features::{FeatureSet, Framework, Language};
use crate::guard::{ArtifactTable, Classification, ReconcileReport};
use crate::planner::DependencyPlan;
use crate::profile::{profile_for, FrameworkProfile};
use crate::project::PackageManifest;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub use files::{base_files, config_files, font_file, integration_files, GeneratedFile};

/// Toolchain files that only some configurations write
const SWITCHABLE: &[&str] = &[
    "vite.config.js",
    "vite.config.ts",
    "app/layout.jsx",
    "app/layout.tsx",
    "tailwind.config.js",
    "postcss.config.js",
    "postcss.config.mjs",
];

/// What a generation pass did, by relative path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub written: Vec<String>,
    /// Already present and left untouched
    pub skipped: Vec<String>,
    /// Left over from another language or framework and deleted
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Replace unless identical
    Always,
    IfMissing,
}

/// Write the project described by `features` into `target`
pub async fn generate(
    features: &FeatureSet,
    plan: &DependencyPlan,
    composition: &CompositionPlan,
    report: &ReconcileReport,
    target: &Path,
) -> Result<GenerationSummary> {
    fs::create_dir_all(target)
        .await
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;

    let profile = profile_for(features.framework);
    let mut summary = GenerationSummary::default();

    update_manifest(features, plan, profile, target)?;

    let mut shells = vec![
        GeneratedFile {
            path: profile.entry_file(features.language),
            content: render_entry(composition),
        },
        GeneratedFile {
            path: profile.app_file(features.language),
            content: render_app(composition),
        },
    ];
    shells.extend(config_files(features, profile));
    for file in &shells {
        write_file(target, file, WriteMode::Always, &mut summary).await?;
    }

    for file in base_files(features, profile) {
        write_file(target, &file, WriteMode::IfMissing, &mut summary).await?;
    }
    if let Some(font) = features.font_spec() {
        write_file(target, &font_file(font, profile), WriteMode::IfMissing, &mut summary).await?;
    }

    for id in features.integrations() {
        let mode = match report.classification(id) {
            Some(Classification::NewlyInitialized) => WriteMode::Always,
            _ => WriteMode::IfMissing,
        };
        for file in integration_files(id, features, profile) {
            write_file(target, &file, mode, &mut summary).await?;
        }
    }

    let produced: BTreeSet<String> = summary
        .written
        .iter()
        .chain(&summary.skipped)
        .cloned()
        .collect();
    for path in superseded_paths() {
        if !produced.contains(&path) && remove_file(target, &path).await? {
            summary.removed.push(path);
        }
    }

    debug!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        removed = summary.removed.len(),
        "generation finished"
    );
    Ok(summary)
}

/// Entry points, app shells and toolchain files of every framework and language
fn superseded_paths() -> BTreeSet<String> {
    let mut paths: BTreeSet<String> = SWITCHABLE.iter().map(|p| p.to_string()).collect();
    for framework in Framework::ALL {
        let profile = profile_for(framework);
        for language in [Language::Js, Language::Ts] {
            paths.insert(profile.entry_file(language));
            paths.insert(profile.app_file(language));
        }
    }
    paths
}

/// Delete `path` under `target`; false when it was not there
async fn remove_file(target: &Path, path: &str) -> Result<bool> {
    let full = target.join(path);
    match fs::remove_file(&full).await {
        Ok(()) => {
            debug!(path = %full.display(), "removed superseded file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Failed to remove file: {}", full.display()))),
    }
}

fn update_manifest(
    features: &FeatureSet,
    plan: &DependencyPlan,
    profile: &dyn FrameworkProfile,
    target: &Path,
) -> Result<()> {
    let existing = PackageManifest::load(target)?;
    let is_new = existing.is_none();
    let mut manifest =
        existing.unwrap_or_else(|| PackageManifest::new(target, &features.project_name));
    let before = manifest.to_json();

    manifest.apply_plan(plan);
    let artifacts = ArtifactTable::builtin();
    let mut scripts = profile.scripts();
    for id in features.integrations() {
        scripts.extend(artifacts.scripts_for(id));
    }
    manifest.ensure_scripts(scripts);

    if is_new || manifest.to_json() != before {
        manifest.save()?;
        debug!(path = %manifest.path().display(), "package.json updated");
    }
    Ok(())
}

async fn write_file(
    target: &Path,
    file: &GeneratedFile,
    mode: WriteMode,
    summary: &mut GenerationSummary,
) -> Result<()> {
    let full = target.join(&file.path);
    let existing = fs::read_to_string(&full).await.ok();
    let skip = match (&existing, mode) {
        (Some(_), WriteMode::IfMissing) => true,
        (Some(current), WriteMode::Always) => *current == file.content,
        (None, _) => false,
    };
    if skip {
        summary.skipped.push(file.path.clone());
        return Ok(());
    }

    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&full, &file.content)
        .await
        .with_context(|| format!("Failed to write file: {}", full.display()))?;
    summary.written.push(file.path.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::config::{resolve, RawConfigSources};
    use crate::guard::reconcile;
    use crate::planner::{plan, PackageTable};

    async fn run(sources: RawConfigSources, target: &Path) -> GenerationSummary {
        let features = resolve(&sources).unwrap().features;
        let plan = plan(&features).unwrap();
        let table = PackageTable::builtin().unwrap();
        let report = reconcile(&features, &plan, &table, target).unwrap();
        let composition = compose(&features);
        generate(&features, &plan, &composition, &report, target)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_generates_react_project() {
        let dir = tempfile::tempdir().unwrap();
        let sources = RawConfigSources::default().with_flag("stateManagement", "zustand");
        let summary = run(sources, dir.path()).await;

        for path in [
            "src/main.jsx",
            "src/App.jsx",
            "index.html",
            "src/store/useCounterStore.js",
            "src/components/demo/ZustandDemo.jsx",
            "src/components/demo/UseStateDemo.jsx",
            ".prettierrc",
        ] {
            assert!(dir.path().join(path).is_file(), "missing {}", path);
            assert!(summary.written.iter().any(|p| p == path));
        }

        let manifest = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"zustand\""));
        assert!(manifest.contains("\"type\": \"module\""));
        assert!(manifest.contains("\"format\": \"prettier --write .\""));
    }

    #[tokio::test]
    async fn test_rerun_leaves_user_edits_alone() {
        let dir = tempfile::tempdir().unwrap();
        let sources = RawConfigSources::default().with_flag("stateManagement", "zustand");
        run(sources.clone(), dir.path()).await;

        let demo = dir.path().join("src/components/demo/ZustandDemo.jsx");
        std::fs::write(&demo, "// mine\n").unwrap();
        let summary = run(sources, dir.path()).await;

        assert_eq!(std::fs::read_to_string(&demo).unwrap(), "// mine\n");
        assert!(summary.written.is_empty());
    }

    #[tokio::test]
    async fn test_new_integration_overwrites_shared_store() {
        let dir = tempfile::tempdir().unwrap();
        run(
            RawConfigSources::default().with_flag("stateManagement", "redux"),
            dir.path(),
        )
        .await;
        run(
            RawConfigSources::default().with_flag("stateManagement", "rtkQuery"),
            dir.path(),
        )
        .await;

        let store = std::fs::read_to_string(dir.path().join("src/store/store.js")).unwrap();
        assert!(store.contains("api.middleware"));
        assert!(!dir.path().join("src/components/demo/ReduxDemo.jsx").exists());
        assert!(dir.path().join("src/components/demo/RTKQueryDemo.jsx").exists());
    }

    #[tokio::test]
    async fn test_entry_tracks_composition() {
        let dir = tempfile::tempdir().unwrap();
        run(
            RawConfigSources::default().with_flag("stateManagement", "reactQuery"),
            dir.path(),
        )
        .await;
        let main = std::fs::read_to_string(dir.path().join("src/main.jsx")).unwrap();
        assert!(main.contains("QueryClientProvider"));

        run(RawConfigSources::default(), dir.path()).await;
        let main = std::fs::read_to_string(dir.path().join("src/main.jsx")).unwrap();
        assert!(!main.contains("QueryClientProvider"));
    }

    fn read(target: &Path, path: &str) -> String {
        std::fs::read_to_string(target.join(path)).unwrap()
    }

    #[tokio::test]
    async fn test_tailwind_config_follows_shadcn_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let shadcn = RawConfigSources::default().with_flag("ui", "shadcn");
        run(shadcn.clone(), dir.path()).await;
        assert!(read(dir.path(), "tailwind.config.js").contains("tailwindcss-animate"));

        run(RawConfigSources::default(), dir.path()).await;
        assert!(!read(dir.path(), "tailwind.config.js").contains("tailwindcss-animate"));
        assert!(!read(dir.path(), "package.json").contains("tailwindcss-animate"));

        run(shadcn, dir.path()).await;
        let config = read(dir.path(), "tailwind.config.js");
        assert!(config.contains("plugins: [animate],"));
        assert!(read(dir.path(), "package.json").contains("tailwindcss-animate"));
    }

    #[tokio::test]
    async fn test_language_switch_replaces_shell() {
        let dir = tempfile::tempdir().unwrap();
        run(RawConfigSources::default().with_flag("swr", true), dir.path()).await;
        assert!(dir.path().join("src/App.jsx").is_file());

        let summary = run(
            RawConfigSources::default()
                .with_flag("zustand", true)
                .with_flag("language", "ts"),
            dir.path(),
        )
        .await;
        for stale in ["src/main.jsx", "src/App.jsx", "vite.config.js"] {
            assert!(!dir.path().join(stale).exists(), "{} left behind", stale);
            assert!(summary.removed.iter().any(|p| p == stale));
        }
        assert!(read(dir.path(), "index.html").contains("src=\"/src/main.tsx\""));
        assert!(dir.path().join("vite.config.ts").is_file());
        let app = read(dir.path(), "src/App.tsx");
        assert!(app.contains("ZustandDemo"));
        assert!(!app.contains("SWRDemo"));
        assert!(!dir.path().join("src/components/demo/SWRDemo.jsx").exists());
    }

    #[tokio::test]
    async fn test_framework_switch_replaces_shell() {
        let dir = tempfile::tempdir().unwrap();
        run(RawConfigSources::default().with_flag("router", true), dir.path()).await;
        run(
            RawConfigSources::default().with_flag("framework", "vue"),
            dir.path(),
        )
        .await;
        assert!(!dir.path().join("src/main.jsx").exists());
        assert!(!dir.path().join("src/App.jsx").exists());
        assert!(!dir.path().join("src/components/demo/RouterDemo.jsx").exists());
        assert!(dir.path().join("src/App.vue").is_file());
        assert!(read(dir.path(), "index.html").contains("src=\"/src/main.js\""));
        assert!(!read(dir.path(), "package.json").contains("react-router-dom"));
    }

    #[tokio::test]
    async fn test_prettier_deselection_drops_format_script() {
        let dir = tempfile::tempdir().unwrap();
        run(RawConfigSources::default(), dir.path()).await;
        assert!(read(dir.path(), "package.json").contains("\"format\""));

        run(
            RawConfigSources::default().with_flag("prettier", false),
            dir.path(),
        )
        .await;
        let manifest = read(dir.path(), "package.json");
        assert!(!manifest.contains("\"format\""));
        assert!(!manifest.contains("\"prettier\""));
        assert!(!dir.path().join(".prettierrc").exists());
    }

    #[tokio::test]
    async fn test_generates_next_and_vue_shells() {
        let next = tempfile::tempdir().unwrap();
        run(
            RawConfigSources::default()
                .with_flag("framework", "next")
                .with_flag("language", "ts"),
            next.path(),
        )
        .await;
        assert!(next.path().join("app/providers.tsx").is_file());
        assert!(next.path().join("app/page.tsx").is_file());
        assert!(next.path().join("app/layout.tsx").is_file());

        let vue = tempfile::tempdir().unwrap();
        run(
            RawConfigSources::default()
                .with_flag("framework", "vue")
                .with_flag("font", "inter"),
            vue.path(),
        )
        .await;
        assert!(vue.path().join("src/App.vue").is_file());
        assert!(vue.path().join("src/components/demo/RefDemo.vue").is_file());
        assert!(vue.path().join("src/styles/fonts/inter.css").is_file());
    }
}
