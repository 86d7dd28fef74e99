//! User defaults file (`bawo.yaml`)
//!
//! The file is a flat YAML mapping using the same option names as the CLI flags:
//!
//! ```yaml
//! framework: next
//! ts: true
//! animations: [framer]
//! ```

use super::sources::ConfigMap;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative defaults file
pub const DEFAULTS_ENV: &str = "BAWO_DEFAULTS";

/// File name looked up in the working directory
pub const DEFAULTS_FILE: &str = "bawo.yaml";

/// Locate the defaults file: `$BAWO_DEFAULTS` first, then `./bawo.yaml` if it exists
pub fn defaults_path(cwd: &Path) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(DEFAULTS_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let local = cwd.join(DEFAULTS_FILE);
    local.is_file().then_some(local)
}

/// Load a defaults file into a config map
pub fn load_defaults(path: &Path) -> Result<ConfigMap> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ScaffoldError::filesystem(path, e))?;
    parse_defaults(&content).map_err(|message| ScaffoldError::corrupt(path, message))
}

fn parse_defaults(content: &str) -> std::result::Result<ConfigMap, String> {
    if content.trim().is_empty() {
        return Ok(ConfigMap::new());
    }
    serde_yaml::from_str::<ConfigMap>(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sources::ConfigValue;

    #[test]
    fn test_parse_mixed_values() {
        let map = parse_defaults("framework: next\nts: true\nanimations: [framer, gsap]\n").unwrap();
        assert_eq!(map.get("framework"), Some(&ConfigValue::text("next")));
        assert_eq!(map.get("ts"), Some(&ConfigValue::Bool(true)));
        assert_eq!(
            map.get("animations"),
            Some(&ConfigValue::list(["framer", "gsap"]))
        );
    }

    #[test]
    fn test_empty_file_is_empty_map() {
        assert!(parse_defaults("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_load_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULTS_FILE);
        std::fs::write(&path, "framework: [unterminated").unwrap();
        let err = load_defaults(&path).unwrap_err();
        assert!(matches!(err, ScaffoldError::Corrupt { .. }));
    }

    #[test]
    fn test_load_missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_defaults(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ScaffoldError::Filesystem { .. }));
    }
}
