//! Configuration collection and resolution

pub mod file;
pub mod preset;
pub mod resolver;
pub mod sources;

pub use file::{defaults_path, load_defaults};
pub use preset::Preset;
pub use resolver::{resolve, validate_project_name, Resolved, DEFAULT_PROJECT_NAME};
pub use sources::{keys, ConfigMap, ConfigValue, RawConfigSources};
