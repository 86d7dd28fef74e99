//! Node.js detection and package manager invocation

pub mod check;
pub mod package_manager;

pub use check::{check_node, require_node, RuntimeInfo};
pub use package_manager::{describe_plan, run_streaming, PackageManager, PACKAGE_MANAGER_ENV};
