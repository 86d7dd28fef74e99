//! Node.js detection

use anyhow::Result;
use semver::Version;
use std::process::Command;

/// Vite 5 and Next 14 both need Node 18 or newer
pub const MIN_NODE_MAJOR: u64 = 18;

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `<binary> --version` and report what came back
pub fn probe(binary: &str, name: &'static str) -> RuntimeInfo {
    match Command::new(binary).arg("--version").output() {
        Ok(out) if out.status.success() => RuntimeInfo {
            name,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
            available: true,
        },
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Parse `v20.11.1`-style output
pub fn parse_node_version(raw: &str) -> Option<Version> {
    let cleaned = raw.trim().strip_prefix('v').unwrap_or(raw.trim());
    Version::parse(cleaned).ok()
}

/// Fail unless a recent enough Node.js is on the PATH
pub fn require_node() -> Result<RuntimeInfo> {
    let node = check_node();
    ensure_supported(&node)?;
    Ok(node)
}

fn ensure_supported(node: &RuntimeInfo) -> Result<()> {
    if !node.available {
        anyhow::bail!("Node.js was not found (install it from https://nodejs.org)");
    }
    let raw = node.version.as_deref().unwrap_or_default();
    match parse_node_version(raw) {
        Some(version) if version.major < MIN_NODE_MAJOR => anyhow::bail!(
            "Node.js {} is too old; version {} or newer is required",
            version,
            MIN_NODE_MAJOR
        ),
        // Unparseable versions are let through; the package manager will complain if needed
        _ => Ok(()),
    }
}
