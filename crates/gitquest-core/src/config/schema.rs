//! Configuration schema for `.gitquest.toml`.
//!
//! Every key is optional; a missing file and an empty file both yield the
//! defaults below.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Minimum free space required before building (10 MiB).
pub const DEFAULT_MIN_FREE_BYTES: u64 = 10 * 1024 * 1024;

/// Root configuration structure for `.gitquest.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestConfig {
    /// Branch every challenge forks from and returns to
    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    /// Free bytes required on the repository filesystem
    #[serde(default = "default_min_free_bytes")]
    pub min_free_bytes: u64,

    /// Version-control program
    #[serde(default = "default_git_program")]
    pub git_program: String,

    /// Program used to apply the challenge 5 patch
    #[serde(default = "default_patch_program")]
    pub patch_program: String,

    /// Per-branch hint document name
    #[serde(default = "default_hint_file")]
    pub hint_file: String,

    /// Overview document committed on the main branch
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

fn default_main_branch() -> String {
    "main".to_string()
}

fn default_min_free_bytes() -> u64 {
    DEFAULT_MIN_FREE_BYTES
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_patch_program() -> String {
    "patch".to_string()
}

fn default_hint_file() -> String {
    "HINT.md".to_string()
}

fn default_summary_file() -> String {
    "CHALLENGES.md".to_string()
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            main_branch: default_main_branch(),
            min_free_bytes: default_min_free_bytes(),
            git_program: default_git_program(),
            patch_program: default_patch_program(),
            hint_file: default_hint_file(),
            summary_file: default_summary_file(),
        }
    }
}

impl QuestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values that would make the build write outside the work tree
    /// or run an empty program name.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_not_blank("main_branch", &self.main_branch)?;
        check_not_blank("git_program", &self.git_program)?;
        check_not_blank("patch_program", &self.patch_program)?;
        check_relative_file("hint_file", &self.hint_file)?;
        check_relative_file("summary_file", &self.summary_file)?;
        if self.hint_file == self.summary_file {
            anyhow::bail!("hint_file and summary_file must differ");
        }
        Ok(())
    }
}

fn check_not_blank(key: &str, value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("Invalid configuration: `{}` must not be empty", key);
    }
    Ok(())
}

fn check_relative_file(key: &str, value: &str) -> anyhow::Result<()> {
    check_not_blank(key, value)?;
    let path = std::path::Path::new(value);
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));
    if escapes {
        return Err(anyhow::anyhow!("`{}` = {:?}", key, value))
            .context("Invalid configuration: file names must stay inside the work tree");
    }
    Ok(())
}
