//! `package.json` handling
//!
//! The manifest is kept as a JSON object so fields this crate does not know about survive a
//! re-run untouched. Dependency sections are written with sorted keys.

use crate::error::{Result, ScaffoldError};
use crate::planner::{DependencyPlan, Scope};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const PACKAGE_JSON: &str = "package.json";

const SECTIONS: [Scope; 2] = [Scope::Runtime, Scope::Dev];

#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl PackageManifest {
    /// Fresh ES module manifest for a new project
    pub fn new(project_dir: &Path, name: &str) -> Self {
        let mut root = Map::new();
        root.insert("name".into(), Value::String(name.to_string()));
        root.insert("version".into(), Value::String("0.1.0".into()));
        root.insert("private".into(), Value::Bool(true));
        root.insert("type".into(), Value::String("module".into()));
        Self {
            path: project_dir.join(PACKAGE_JSON),
            root,
        }
    }

    /// Read `<project_dir>/package.json`; `None` when it does not exist
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        let path = project_dir.join(PACKAGE_JSON);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ScaffoldError::filesystem(path, e)),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(root)) => Ok(Some(Self { path, root })),
            Ok(_) => Err(ScaffoldError::corrupt(path, "expected a JSON object")),
            Err(e) => Err(ScaffoldError::corrupt(path, e.to_string())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// Run `f` on a top-level object, creating it (or replacing a non-object) first
    fn with_section<R>(&mut self, key: &str, f: impl FnOnce(&mut Map<String, Value>) -> R) -> R {
        let mut section = match self.root.remove(key) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let out = f(&mut section);
        self.root.insert(key.to_string(), Value::Object(section));
        out
    }

    /// Constraint recorded for `package`, in either section
    pub fn dependency(&self, package: &str) -> Option<(Scope, &str)> {
        SECTIONS.iter().find_map(|scope| {
            self.root
                .get(scope.manifest_key())
                .and_then(|s| s.get(package))
                .and_then(Value::as_str)
                .map(|v| (*scope, v))
        })
    }

    pub fn has_dependency(&self, package: &str) -> bool {
        self.dependency(package).is_some()
    }

    /// Insert or update one dependency; returns true when something changed
    pub fn set_dependency(&mut self, scope: Scope, package: &str, constraint: &str) -> bool {
        let other = match scope {
            Scope::Runtime => Scope::Dev,
            Scope::Dev => Scope::Runtime,
        };
        let moved = self.remove_from(other, package);
        let previous = self.with_section(scope.manifest_key(), |section| {
            section.insert(package.to_string(), Value::String(constraint.to_string()))
        });
        moved || previous.as_ref().and_then(Value::as_str) != Some(constraint)
    }

    fn remove_from(&mut self, scope: Scope, package: &str) -> bool {
        match self.root.get_mut(scope.manifest_key()) {
            Some(Value::Object(section)) => section.remove(package).is_some(),
            _ => false,
        }
    }

    /// Remove `package` from every dependency section
    pub fn remove_dependency(&mut self, package: &str) -> bool {
        let mut removed = false;
        for scope in SECTIONS {
            removed |= self.remove_from(scope, package);
        }
        removed
    }

    /// Add every planned package; existing entries are updated to the planned constraint
    pub fn apply_plan(&mut self, plan: &DependencyPlan) -> usize {
        let mut changed = 0;
        for spec in plan.iter() {
            if self.set_dependency(spec.scope, &spec.package_name, &spec.version_constraint) {
                changed += 1;
            }
        }
        changed
    }

    /// Set scripts that are missing; user-edited scripts are left alone
    pub fn ensure_scripts<'a>(&mut self, scripts: impl IntoIterator<Item = (&'a str, &'a str)>) {
        self.with_section("scripts", |section| {
            for (name, command) in scripts {
                section
                    .entry(name.to_string())
                    .or_insert_with(|| Value::String(command.to_string()));
            }
        });
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.root
            .get("scripts")
            .and_then(|s| s.get(name))
            .and_then(Value::as_str)
    }

    /// Remove script `name` if it still runs `command`; edited scripts are kept
    pub fn remove_script(&mut self, name: &str, command: &str) -> bool {
        if self.script(name) != Some(command) {
            return false;
        }
        match self.root.get_mut("scripts") {
            Some(Value::Object(section)) => section.remove(name).is_some(),
            _ => false,
        }
    }

    pub fn to_json(&self) -> String {
        let mut json = serde_json::to_string_pretty(&self.root).unwrap_or_else(|_| "{}".into());
        json.push('\n');
        json
    }

    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, self.to_json())
            .map_err(|e| ScaffoldError::filesystem(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::PackageSpec;

    fn manifest() -> PackageManifest {
        PackageManifest::new(Path::new("/tmp/app"), "app")
    }

    #[test]
    fn test_set_and_remove_dependency() {
        let mut m = manifest();
        assert!(m.set_dependency(Scope::Runtime, "zustand", "^4.5.0"));
        assert!(!m.set_dependency(Scope::Runtime, "zustand", "^4.5.0"));
        assert_eq!(m.dependency("zustand"), Some((Scope::Runtime, "^4.5.0")));
        assert!(m.remove_dependency("zustand"));
        assert!(!m.has_dependency("zustand"));
        assert!(!m.remove_dependency("zustand"));
    }

    #[test]
    fn test_scope_change_moves_entry() {
        let mut m = manifest();
        m.set_dependency(Scope::Runtime, "tailwindcss", "^3");
        assert!(m.set_dependency(Scope::Dev, "tailwindcss", "^3"));
        assert_eq!(m.dependency("tailwindcss"), Some((Scope::Dev, "^3")));
    }

    #[test]
    fn test_apply_plan_is_idempotent() {
        let plan = DependencyPlan {
            packages: vec![PackageSpec {
                package_name: "gsap".into(),
                version_constraint: "^3.12.5".into(),
                scope: Scope::Runtime,
            }],
        };
        let mut m = manifest();
        assert_eq!(m.apply_plan(&plan), 1);
        let before = m.to_json();
        assert_eq!(m.apply_plan(&plan), 0);
        assert_eq!(m.to_json(), before);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{"name":"x","browserslist":["defaults"],"scripts":{"dev":"custom"}}"#,
        )
        .unwrap();
        let mut m = PackageManifest::load(dir.path()).unwrap().unwrap();
        m.ensure_scripts([("dev", "vite"), ("build", "vite build")]);
        m.save().unwrap();
        let text = std::fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap();
        assert!(text.contains("browserslist"));
        assert!(text.contains("\"dev\": \"custom\""));
        assert!(text.contains("\"build\": \"vite build\""));
    }

    #[test]
    fn test_remove_script_only_when_unchanged() {
        let mut m = manifest();
        m.ensure_scripts([("format", "prettier --write .")]);
        assert!(m.remove_script("format", "prettier --write ."));
        assert_eq!(m.script("format"), None);
        assert!(!m.remove_script("format", "prettier --write ."));

        m.ensure_scripts([("format", "prettier --write src")]);
        assert!(!m.remove_script("format", "prettier --write ."));
        assert_eq!(m.script("format"), Some("prettier --write src"));
    }

    #[test]
    fn test_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PackageManifest::load(dir.path()).unwrap().is_none());
        std::fs::write(dir.path().join(PACKAGE_JSON), "[1, 2]").unwrap();
        assert!(matches!(
            PackageManifest::load(dir.path()).unwrap_err(),
            ScaffoldError::Corrupt { .. }
        ));
    }
}
