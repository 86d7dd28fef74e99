//! Package manager detection and invocation
//!
//! `install` output is streamed line by line with an overall timeout. `run dev` inherits the
//! terminal, since it runs until the user stops it.

use crate::planner::{DependencyPlan, Scope};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::{debug, info};

/// Environment variable forcing a package manager
pub const PACKAGE_MANAGER_ENV: &str = "BAWO_PACKAGE_MANAGER";

/// Upper bound for a dependency install
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Detection order
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    pub fn install_args(&self) -> Vec<&'static str> {
        vec!["install"]
    }

    pub fn run_args<'a>(&self, script: &'a str) -> Vec<&'a str> {
        vec!["run", script]
    }

    /// Pick a package manager: the env override first, then the first one found on the PATH
    pub fn detect() -> Self {
        let forced = std::env::var(PACKAGE_MANAGER_ENV).ok();
        Self::detect_with(forced.as_deref(), is_available)
    }

    /// Detection with an injectable availability check
    pub fn detect_with(forced: Option<&str>, available: impl Fn(&str) -> bool) -> Self {
        if let Some(pm) = forced.and_then(|s| s.parse::<Self>().ok()) {
            return pm;
        }
        Self::ALL
            .into_iter()
            .find(|pm| available(pm.binary()))
            .unwrap_or(PackageManager::Npm)
    }

    /// `<pm> install` in `project_dir`, streaming output
    pub async fn install(&self, project_dir: &Path) -> Result<()> {
        info!(package_manager = %self, dir = %project_dir.display(), "installing dependencies");
        run_streaming(self.binary(), &self.install_args(), project_dir, INSTALL_TIMEOUT).await
    }

    /// `<pm> run dev`, attached to the terminal
    pub async fn run_dev(&self, project_dir: &Path) -> Result<()> {
        let args = self.run_args("dev");
        println!();
        println!(
            "{} {} {}",
            "Running:".dimmed(),
            self.binary().yellow(),
            args.join(" ").yellow()
        );
        let status = TokioCommand::new(self.binary())
            .args(&args)
            .current_dir(project_dir)
            .status()
            .await
            .with_context(|| format!("Failed to start {}", self.binary()))?;
        if !status.success() {
            anyhow::bail!(
                "{} run dev exited with code {}",
                self.binary(),
                status.code().unwrap_or(-1)
            );
        }
        Ok(())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for PackageManager {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            other => anyhow::bail!("unknown package manager `{}`", other),
        }
    }
}

fn is_available(binary: &str) -> bool {
    std::process::Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Human-readable summary of what an install adds
pub fn describe_plan(plan: &DependencyPlan) -> String {
    format!(
        "{} dependencies, {} dev dependencies",
        plan.in_scope(Scope::Runtime).count(),
        plan.in_scope(Scope::Dev).count()
    )
}

/// Spawn `program args..` in `cwd`, echo its output indented, and fail on timeout or non-zero exit
pub async fn run_streaming(
    program: &str,
    args: &[&str],
    cwd: &Path,
    limit: Duration,
) -> Result<()> {
    let shown = format!("{} {}", program, args.join(" "));
    println!();
    println!("{} {}", "Running:".dimmed(), shown.yellow());
    println!();

    let mut child = TokioCommand::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start `{}`", shown))?;

    let stdout = child
        .stdout
        .take()
        .context("Failed to capture stdout")?;
    let stderr = child
        .stderr
        .take()
        .context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let output_task = async {
        let mut stderr_open = true;
        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            break;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }
    };

    if timeout(limit, output_task).await.is_err() {
        let _ = child.kill().await;
        println!();
        anyhow::bail!(
            "`{}` timed out after {} seconds",
            shown,
            limit.as_secs()
        );
    }

    match timeout(Duration::from_secs(30), child.wait()).await {
        Ok(Ok(status)) if status.success() => {
            debug!(command = %shown, "command finished");
            println!();
            Ok(())
        }
        Ok(Ok(status)) => anyhow::bail!(
            "`{}` failed with exit code {}",
            shown,
            status.code().unwrap_or(-1)
        ),
        Ok(Err(e)) => anyhow::bail!("Failed to wait for `{}`: {}", shown, e),
        Err(_) => {
            let _ = child.kill().await;
            anyhow::bail!("`{}` hung after closing its output", shown)
        }
    }
}
