//! Idempotency guard
//!
//! Compares the resolved [`FeatureSet`] with what a previous run recorded in the target
//! directory. Every tracked integration ends up in one of three buckets:
//!
//! - newly initialized: selected now, not recorded; it is recorded and the generator writes it
//! - already initialized: selected and recorded; the generator only fills in missing files
//! - removed: recorded but no longer selected; its artifacts, its unedited scripts and the
//!   packages nothing else needs are deleted and the record is dropped
//!
//! Removal looks for artifacts and packages under every framework and language, since the
//! previous run may have used different ones.
//!
//! Removing a path that is already gone is a no-op. Any other I/O failure aborts.
//!
//! The guard assumes it is the only process touching the target directory.

pub mod artifacts;
pub mod marker;

use crate::error::{Result, ScaffoldError};
use crate::features::{FeatureSet, Framework, IntegrationId, Language};
use crate::planner::{DependencyPlan, PackageTable};
use crate::profile::profile_for;
use crate::project::PackageManifest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use artifacts::{Artifact, ArtifactKind, ArtifactTable};
pub use marker::{IntegrationState, IntegrationStatus, Marker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    NewlyInitialized,
    AlreadyInitialized,
    Removed,
}

/// What happened to one integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationOutcome {
    pub integration: IntegrationId,
    pub classification: Classification,
    /// Paths deleted, relative to the target
    pub removed_paths: Vec<PathBuf>,
    /// `package.json` entries deleted
    pub removed_packages: Vec<String>,
    /// `package.json` scripts deleted
    pub removed_scripts: Vec<String>,
}

impl IntegrationOutcome {
    fn unchanged(integration: IntegrationId, classification: Classification) -> Self {
        Self {
            integration,
            classification,
            removed_paths: Vec::new(),
            removed_packages: Vec::new(),
            removed_scripts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub outcomes: Vec<IntegrationOutcome>,
}

impl ReconcileReport {
    pub fn classification(&self, id: IntegrationId) -> Option<Classification> {
        self.outcomes
            .iter()
            .find(|o| o.integration == id)
            .map(|o| o.classification)
    }

    fn with(&self, classification: Classification) -> Vec<IntegrationId> {
        self.outcomes
            .iter()
            .filter(|o| o.classification == classification)
            .map(|o| o.integration)
            .collect()
    }

    pub fn newly_initialized(&self) -> Vec<IntegrationId> {
        self.with(Classification::NewlyInitialized)
    }

    pub fn already_initialized(&self) -> Vec<IntegrationId> {
        self.with(Classification::AlreadyInitialized)
    }

    pub fn removed(&self) -> Vec<IntegrationId> {
        self.with(Classification::Removed)
    }
}

/// Reconcile `target` against `features`, stamping new integrations with the current time
pub fn reconcile(
    features: &FeatureSet,
    plan: &DependencyPlan,
    table: &PackageTable,
    target: &Path,
) -> Result<ReconcileReport> {
    reconcile_at(features, plan, table, target, Utc::now())
}

/// [`reconcile`] with an explicit timestamp
pub fn reconcile_at(
    features: &FeatureSet,
    plan: &DependencyPlan,
    table: &PackageTable,
    target: &Path,
    now: DateTime<Utc>,
) -> Result<ReconcileReport> {
    let mut marker = Marker::load(target)?;
    let artifact_table = ArtifactTable::builtin();
    let profile = profile_for(features.framework);

    // Files still owned by a selected integration are never removed
    let kept: BTreeSet<Artifact> = features
        .integrations()
        .into_iter()
        .flat_map(|id| artifact_table.artifacts(id, profile))
        .collect();

    let mut manifest = PackageManifest::load(target)?;
    let mut manifest_changed = false;
    let mut marker_changed = false;
    let mut report = ReconcileReport::default();

    for id in IntegrationId::ALL {
        let selected = features.is_selected(id);
        let recorded = marker.is_initialized(id);

        let outcome = match (selected, recorded) {
            (true, true) => {
                debug!(integration = %id, "already initialized");
                IntegrationOutcome::unchanged(id, Classification::AlreadyInitialized)
            }
            (true, false) => {
                marker_changed |= marker.mark_initialized(id, now);
                info!(integration = %id, "initializing");
                IntegrationOutcome::unchanged(id, Classification::NewlyInitialized)
            }
            (false, true) => {
                let mut removed_paths = Vec::new();
                for artifact in artifact_table.artifacts_any_framework(id) {
                    if kept.contains(&artifact) {
                        continue;
                    }
                    if let Some(path) = remove_artifact(target, &artifact)? {
                        removed_paths.push(path);
                    }
                }

                let mut removed_packages = Vec::new();
                let mut removed_scripts = Vec::new();
                if let Some(manifest) = manifest.as_mut() {
                    for package in owned_packages(table, id) {
                        if plan.contains(&package) {
                            continue;
                        }
                        if manifest.remove_dependency(&package) {
                            removed_packages.push(package);
                        }
                    }
                    for (name, command) in artifact_table.scripts_for(id) {
                        if manifest.remove_script(name, command) {
                            removed_scripts.push(name.to_string());
                        }
                    }
                }
                manifest_changed |= !removed_packages.is_empty() || !removed_scripts.is_empty();
                marker_changed |= marker.mark_absent(id);
                info!(
                    integration = %id,
                    paths = removed_paths.len(),
                    packages = removed_packages.len(),
                    scripts = removed_scripts.len(),
                    "removed de-selected integration"
                );
                IntegrationOutcome {
                    integration: id,
                    classification: Classification::Removed,
                    removed_paths,
                    removed_packages,
                    removed_scripts,
                }
            }
            (false, false) => continue,
        };
        report.outcomes.push(outcome);
    }

    if manifest_changed {
        if let Some(manifest) = &manifest {
            manifest.save()?;
        }
    }
    if marker_changed {
        marker.save(target)?;
    }
    Ok(report)
}

/// Every package `id` contributes under any framework and language
fn owned_packages(table: &PackageTable, id: IntegrationId) -> BTreeSet<String> {
    Framework::ALL
        .iter()
        .flat_map(|framework| {
            [Language::Js, Language::Ts]
                .into_iter()
                .flat_map(move |language| table.packages_for(id, *framework, language))
        })
        .collect()
}

/// Delete one artifact; `Ok(None)` when it was not there
fn remove_artifact(target: &Path, artifact: &Artifact) -> Result<Option<PathBuf>> {
    let full = target.join(&artifact.path);
    let result = match artifact.kind {
        ArtifactKind::File => std::fs::remove_file(&full),
        ArtifactKind::Dir => std::fs::remove_dir_all(&full),
    };
    match result {
        Ok(()) => {
            debug!(path = %full.display(), "removed artifact");
            Ok(Some(PathBuf::from(&artifact.path)))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ScaffoldError::filesystem(full, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, RawConfigSources};
    use crate::features::StateManagement;
    use crate::planner::Scope;
    use chrono::TimeZone;
    use std::fs;

    fn features(sources: RawConfigSources) -> FeatureSet {
        resolve(&sources).unwrap().features
    }

    fn run(features: &FeatureSet, target: &Path, secs: i64) -> Result<ReconcileReport> {
        let table = PackageTable::builtin().unwrap();
        let plan = table.plan(features).unwrap();
        reconcile_at(
            features,
            &plan,
            &table,
            target,
            Utc.timestamp_opt(secs, 0).unwrap(),
        )
    }

    fn touch(target: &Path, rel: &str) {
        let path = target.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn write_manifest(target: &Path, features: &FeatureSet) {
        let table = PackageTable::builtin().unwrap();
        let plan = table.plan(features).unwrap();
        let mut manifest = PackageManifest::new(target, "app");
        manifest.apply_plan(&plan);
        manifest.save().unwrap();
    }

    #[test]
    fn test_first_run_initializes_selected() {
        let dir = tempfile::tempdir().unwrap();
        let f = features(RawConfigSources::default().with_flag("redux", true));
        let report = run(&f, dir.path(), 100).unwrap();
        assert_eq!(
            report.newly_initialized(),
            vec![IntegrationId::Redux, IntegrationId::Prettier]
        );
        assert!(report.removed().is_empty());
        let marker = Marker::load(dir.path()).unwrap();
        assert!(marker.is_initialized(IntegrationId::Redux));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let f = features(
            RawConfigSources::default()
                .with_flag("zustand", true)
                .with_flag("gsap", true),
        );
        write_manifest(dir.path(), &f);
        run(&f, dir.path(), 100).unwrap();
        let marker_before = fs::read(Marker::path(dir.path())).unwrap();
        let manifest_before = fs::read(dir.path().join("package.json")).unwrap();

        let report = run(&f, dir.path(), 200).unwrap();
        assert!(report.newly_initialized().is_empty());
        assert!(report.removed().is_empty());
        assert_eq!(
            report.already_initialized(),
            vec![
                IntegrationId::Zustand,
                IntegrationId::Gsap,
                IntegrationId::Prettier
            ]
        );
        assert_eq!(fs::read(Marker::path(dir.path())).unwrap(), marker_before);
        assert_eq!(
            fs::read(dir.path().join("package.json")).unwrap(),
            manifest_before
        );
    }

    #[test]
    fn test_deselection_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let redux = features(RawConfigSources::default().with_flag("redux", true));
        write_manifest(target, &redux);
        run(&redux, target, 100).unwrap();
        touch(target, "src/store/store.js");
        touch(target, "src/store/counterSlice.js");
        touch(target, "src/components/demo/ReduxDemo.jsx");

        let zustand = features(
            RawConfigSources::default()
                .with_flag("redux", false)
                .with_flag("zustand", true),
        );
        assert_eq!(zustand.state_management, StateManagement::Zustand);
        let report = run(&zustand, target, 200).unwrap();

        assert_eq!(
            report.classification(IntegrationId::Redux),
            Some(Classification::Removed)
        );
        assert_eq!(
            report.classification(IntegrationId::Zustand),
            Some(Classification::NewlyInitialized)
        );
        assert!(!target.join("src/store/store.js").exists());
        assert!(!target.join("src/components/demo/ReduxDemo.jsx").exists());

        let manifest = PackageManifest::load(target).unwrap().unwrap();
        assert!(!manifest.has_dependency("@reduxjs/toolkit"));
        assert!(!manifest.has_dependency("react-redux"));
        let marker = Marker::load(target).unwrap();
        assert!(!marker.is_initialized(IntegrationId::Redux));
        assert!(marker.is_initialized(IntegrationId::Zustand));
    }

    #[test]
    fn test_switch_to_rtk_query_keeps_shared_pieces() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let redux = features(RawConfigSources::default().with_flag("redux", true));
        write_manifest(target, &redux);
        run(&redux, target, 100).unwrap();
        touch(target, "src/store/store.js");
        touch(target, "src/components/demo/ReduxDemo.jsx");

        let rtk = features(RawConfigSources::default().with_flag("rtk-query", true));
        let report = run(&rtk, target, 200).unwrap();
        let redux_outcome = report
            .outcomes
            .iter()
            .find(|o| o.integration == IntegrationId::Redux)
            .unwrap();
        assert!(redux_outcome.removed_packages.is_empty());
        assert_eq!(
            redux_outcome.removed_paths,
            vec![PathBuf::from("src/components/demo/ReduxDemo.jsx")]
        );
        assert!(target.join("src/store/store.js").exists());
        let manifest = PackageManifest::load(target).unwrap().unwrap();
        assert_eq!(
            manifest.dependency("@reduxjs/toolkit"),
            Some((Scope::Runtime, "^2.2.0"))
        );
    }

    #[test]
    fn test_missing_artifacts_are_noop() {
        let dir = tempfile::tempdir().unwrap();
        let with_gsap = features(RawConfigSources::default().with_flag("gsap", true));
        run(&with_gsap, dir.path(), 100).unwrap();
        let without = features(RawConfigSources::default());
        let report = run(&without, dir.path(), 200).unwrap();
        assert_eq!(report.removed(), vec![IntegrationId::Gsap]);
        assert!(report.outcomes.iter().all(|o| o.removed_paths.is_empty()));
    }

    #[test]
    fn test_language_switch_still_removes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let ts = features(
            RawConfigSources::default()
                .with_flag("swr", true)
                .with_flag("ts", true),
        );
        run(&ts, target, 100).unwrap();
        touch(target, "src/lib/fetcher.ts");

        let js = features(RawConfigSources::default());
        run(&js, target, 200).unwrap();
        assert!(!target.join("src/lib/fetcher.ts").exists());
    }

    #[test]
    fn test_framework_switch_removes_old_framework_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let react = features(RawConfigSources::default().with_flag("router", true));
        write_manifest(target, &react);
        run(&react, target, 100).unwrap();
        touch(target, "src/components/demo/RouterDemo.jsx");

        let vue = features(RawConfigSources::default().with_flag("framework", "vue"));
        let report = run(&vue, target, 200).unwrap();
        assert_eq!(
            report.classification(IntegrationId::Router),
            Some(Classification::Removed)
        );
        assert!(!target.join("src/components/demo/RouterDemo.jsx").exists());
        let manifest = PackageManifest::load(target).unwrap().unwrap();
        assert!(!manifest.has_dependency("react-router-dom"));
        assert!(!manifest.has_dependency("zustand"));
    }

    #[test]
    fn test_deselected_integration_drops_its_script() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let with_prettier = features(RawConfigSources::default());
        write_manifest(target, &with_prettier);
        let mut manifest = PackageManifest::load(target).unwrap().unwrap();
        manifest.ensure_scripts([("format", "prettier --write ."), ("dev", "vite")]);
        manifest.save().unwrap();
        run(&with_prettier, target, 100).unwrap();

        let without = features(RawConfigSources::default().with_flag("prettier", false));
        let report = run(&without, target, 200).unwrap();
        let outcome = report
            .outcomes
            .iter()
            .find(|o| o.integration == IntegrationId::Prettier)
            .unwrap();
        assert_eq!(outcome.removed_scripts, vec!["format".to_string()]);
        let manifest = PackageManifest::load(target).unwrap().unwrap();
        assert_eq!(manifest.script("format"), None);
        assert_eq!(manifest.script("dev"), Some("vite"));
        assert!(!manifest.has_dependency("prettier"));
    }

    #[test]
    fn test_directory_artifact_removed_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let shadcn = features(RawConfigSources::default().with_flag("ui", "shadcn"));
        run(&shadcn, target, 100).unwrap();
        touch(target, "src/components/ui/button.jsx");
        touch(target, "components.json");

        run(&features(RawConfigSources::default()), target, 200).unwrap();
        assert!(!target.join("src/components/ui").exists());
        assert!(!target.join("components.json").exists());
    }

    #[test]
    fn test_removal_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path();
        let framer = features(RawConfigSources::default().with_flag("framer", true));
        run(&framer, target, 100).unwrap();
        // A directory where a file is expected cannot be unlinked
        touch(target, "src/components/demo/FramerDemo.jsx/inner.txt");

        let err = run(&features(RawConfigSources::default()), target, 200).unwrap_err();
        assert!(matches!(err, ScaffoldError::Filesystem { .. }));
    }
}
