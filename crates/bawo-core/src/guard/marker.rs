//! Persisted integration state
//!
//! The marker lives at `<target>/.bawo/integrations.json` and maps every initialized
//! integration to the time it was first generated:
//!
//! ```json
//! {
//!   "prettier": "2024-05-01T10:00:00Z",
//!   "redux": "2024-05-01T10:00:00Z"
//! }
//! ```
//!
//! Keys are kept sorted so an unchanged state serializes to identical bytes.

use crate::error::{Result, ScaffoldError};
use crate::features::IntegrationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const MARKER_DIR: &str = ".bawo";
pub const MARKER_FILE: &str = "integrations.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationStatus {
    Absent,
    Initialized,
}

/// State of one integration in one target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationState {
    pub integration_id: IntegrationId,
    pub status: IntegrationStatus,
    pub initialized_at: Option<DateTime<Utc>>,
}

/// In-memory copy of the marker file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marker {
    /// Unknown keys are preserved as-is
    entries: BTreeMap<String, DateTime<Utc>>,
}

impl Marker {
    pub fn path(target: &Path) -> PathBuf {
        target.join(MARKER_DIR).join(MARKER_FILE)
    }

    /// Load the marker; a missing file is an empty marker
    pub fn load(target: &Path) -> Result<Self> {
        let path = Self::path(target);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ScaffoldError::filesystem(path, e)),
        };
        let entries = serde_json::from_str(&content)
            .map_err(|e| ScaffoldError::corrupt(&path, e.to_string()))?;
        Ok(Self { entries })
    }

    pub fn save(&self, target: &Path) -> Result<()> {
        let path = Self::path(target);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ScaffoldError::filesystem(dir, e))?;
        }
        std::fs::write(&path, self.to_json()).map_err(|e| ScaffoldError::filesystem(&path, e))
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> String {
        let mut json = serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "{}".into());
        json.push('\n');
        json
    }

    pub fn state(&self, id: IntegrationId) -> IntegrationState {
        let initialized_at = self.entries.get(id.as_str()).copied();
        IntegrationState {
            integration_id: id,
            status: if initialized_at.is_some() {
                IntegrationStatus::Initialized
            } else {
                IntegrationStatus::Absent
            },
            initialized_at,
        }
    }

    pub fn is_initialized(&self, id: IntegrationId) -> bool {
        self.entries.contains_key(id.as_str())
    }

    /// Record `id` as initialized; an existing timestamp is kept
    pub fn mark_initialized(&mut self, id: IntegrationId, at: DateTime<Utc>) -> bool {
        if self.is_initialized(id) {
            return false;
        }
        self.entries.insert(id.as_str().to_string(), at);
        true
    }

    pub fn mark_absent(&mut self, id: IntegrationId) -> bool {
        self.entries.remove(id.as_str()).is_some()
    }

    /// Known integrations currently recorded
    pub fn initialized(&self) -> Vec<IntegrationId> {
        IntegrationId::ALL
            .iter()
            .copied()
            .filter(|id| self.is_initialized(*id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
