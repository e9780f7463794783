//! Precondition checks run before any repository mutation.
//!
//! Checks run in a fixed order and the first failure aborts:
//! 1. the git program responds to `--version`
//! 2. the patch program responds to `--version` (build only)
//! 3. the target directory is a git working tree
//! 4. the main branch exists
//! 5. enough free disk space (build only)

mod disk;

use std::process::Command;

use serde::Serialize;

pub use disk::available_bytes;

use crate::config::QuestConfig;
use crate::error::QuestError;
use crate::git::GitRepo;

/// Which operation the checks guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    Build,
    Cleanup,
}

/// What the checks observed.
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    pub git_version: String,
    pub patch_version: Option<String>,
    pub available_bytes: Option<u64>,
}

/// Run every check that applies to `mode`.
pub fn run_checks(
    repo: &GitRepo,
    config: &QuestConfig,
    mode: CheckMode,
) -> anyhow::Result<PreflightReport> {
    let git_version = probe_program(repo.program())?;
    let patch_version = match mode {
        CheckMode::Build => Some(probe_program(&config.patch_program)?),
        CheckMode::Cleanup => None,
    };

    if !repo.is_work_tree()? {
        return Err(QuestError::NotAWorkTree(repo.root().to_path_buf()).into());
    }
    if !repo.branch_exists(&config.main_branch)? {
        return Err(QuestError::MissingBranch(config.main_branch.clone()).into());
    }

    let available_bytes = match mode {
        CheckMode::Build => Some(ensure_free_space(repo, config.min_free_bytes)?),
        CheckMode::Cleanup => None,
    };

    tracing::info!(
        git = %git_version,
        patch = patch_version.as_deref().unwrap_or("-"),
        "preflight checks passed"
    );

    Ok(PreflightReport {
        git_version,
        patch_version,
        available_bytes,
    })
}

/// Run `<program> --version` and return the first line of its output.
pub fn probe_program(program: &str) -> anyhow::Result<String> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|e| QuestError::ToolMissing {
            program: program.to_string(),
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(QuestError::ToolMissing {
            program: program.to_string(),
            reason: format!("`{program} --version` exited with {}", output.status),
        }
        .into());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
}

fn ensure_free_space(repo: &GitRepo, required_bytes: u64) -> anyhow::Result<u64> {
    if required_bytes == 0 {
        return Ok(available_bytes(repo.root()).unwrap_or(0));
    }
    let available = available_bytes(repo.root()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to query free space for {}: {}",
            repo.root().display(),
            e
        )
    })?;
    if available < required_bytes {
        return Err(QuestError::InsufficientDiskSpace {
            available_bytes: available,
            required_bytes,
        }
        .into());
    }
    Ok(available)
}
