//! Bawo Core - Scaffolding engine behind `create-bawo-frontend`
//!
//! Turns configuration gathered from flags, presets, prompts and a defaults file into a
//! React, Next.js or Vue starter project, and keeps re-runs against the same directory safe.
//!
//! # Architecture
//!
//! The pipeline runs in one direction:
//!
//! - **Resolver** ([`config`]) - merges raw sources into a canonical [`FeatureSet`]
//! - **Dependency Planner** ([`planner`]) - maps features to an ordered [`DependencyPlan`]
//! - **Composition Engine** ([`compose`]) - provider stack, imports and demos for the entry point
//! - **Idempotency Guard** ([`guard`]) - classifies integrations and removes de-selected ones
//! - **Generation** ([`generate`], [`runtime`]) - writes files and runs the package manager
//!
//! The first three are pure functions. The guard and the generator touch the target
//! directory; running two of them against the same directory at once is not supported.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and the end-to-end [`run`]
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use bawo_core::{compose, config, planner};
//!
//! let sources = config::RawConfigSources::default()
//!     .with_flag("framework", "next")
//!     .with_flag("redux", true);
//! let resolved = config::resolve(&sources)?;
//! let plan = planner::plan(&resolved.features)?;
//! let composition = compose::compose(&resolved.features);
//! # Ok::<(), bawo_core::ScaffoldError>(())
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod features;
pub mod generate;
pub mod guard;
pub mod planner;
pub mod profile;
pub mod project;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compose::{compose, CompositionPlan};
pub use config::{resolve, RawConfigSources, Resolved};
pub use error::{Result, ScaffoldError, Warning};
pub use features::{FeatureSet, Framework, IntegrationId, Language};
pub use generate::{generate, GenerationSummary};
pub use guard::{reconcile, Classification, ReconcileReport};
pub use planner::{plan, DependencyPlan, PackageSpec};

#[cfg(feature = "tui")]
pub use tui::run;
