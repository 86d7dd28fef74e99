//! Error and warning types shared by every pipeline stage
//!
//! Fatal conditions are [`ScaffoldError`]s. Conditions the pipeline recovers from on its own
//! (a feature the framework cannot host, a forced Tailwind downgrade) are [`Warning`]s that
//! travel next to the resolved value instead of aborting.

use crate::features::{Framework, StateManagement, Styling};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal scaffolding errors
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Malformed or contradictory input, detected before any mutation
    #[error("invalid value for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Two rules of equal rank disagree and no table can break the tie
    #[error("unresolvable conflict on `{subject}`: {message}")]
    Conflict { subject: String, message: String },

    /// I/O failure while touching the target directory
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted file exists but cannot be decoded
    #[error("corrupt file {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

impl ScaffoldError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::Conflict { subject, .. } => Some(subject),
            _ => None,
        }
    }
}

/// Non-fatal conditions recorded during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An optional feature requested for a framework that cannot host it; the feature is dropped
    UnsupportedCombination {
        feature: String,
        framework: Framework,
    },

    /// Tailwind was pinned back to v3
    StylingDowngraded { requested: Styling, reason: String },

    /// Several state-management libraries were selected in one source
    StateConflictResolved {
        selected: StateManagement,
        discarded: Vec<StateManagement>,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedCombination { feature, framework } => write!(
                f,
                "{} is not supported with {}; skipping it",
                feature,
                framework.display_name()
            ),
            Warning::StylingDowngraded { requested, reason } => write!(
                f,
                "Tailwind {} requested but {}; using Tailwind v3",
                requested, reason
            ),
            Warning::StateConflictResolved {
                selected,
                discarded,
            } => {
                let names: Vec<String> = discarded.iter().map(|s| s.to_string()).collect();
                write!(
                    f,
                    "only one state-management library can be used; keeping {} over {}",
                    selected,
                    names.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ScaffoldError::validation("framework", "unknown framework `svelte`");
        assert_eq!(err.field(), Some("framework"));
        assert_eq!(
            err.to_string(),
            "invalid value for `framework`: unknown framework `svelte`"
        );
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::UnsupportedCombination {
            feature: "framer".to_string(),
            framework: Framework::Vue,
        };
        assert_eq!(
            warning.to_string(),
            "framer is not supported with Vue; skipping it"
        );
    }
}
