//! On-disk project files owned by the scaffolder

pub mod manifest;

pub use manifest::{PackageManifest, PACKAGE_JSON};
