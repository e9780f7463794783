//! Scenario driver: preflight, overview document, then each selected
//! challenge in numeric order.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::challenges::{self, ChallengeOutcome, ChallengeSelection, Stage, hints};
use crate::cleanup::{self, CleanupReport};
use crate::config::QuestConfig;
use crate::git::{CommitSpec, GitRepo};
use crate::guard::{BranchGuard, OverwritePrompt};
use crate::preflight::{self, CheckMode, PreflightReport};

/// Message of the commit adding the overview document on the main branch.
pub const SUMMARY_COMMIT_MESSAGE: &str = "Add git challenge overview";

/// Result of a build run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub preflight: PreflightReport,
    /// Whether the overview document changed and was committed
    pub summary_committed: bool,
    pub challenges: Vec<ChallengeOutcome>,
    /// Existing branches that were deleted and recreated
    pub replaced_branches: Vec<String>,
    /// Every local branch after the build
    pub branches: Vec<String>,
}

/// Builds and removes challenges in one repository.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    repo: GitRepo,
    config: QuestConfig,
}

impl ScenarioBuilder {
    pub fn new(root: impl Into<PathBuf>, config: QuestConfig) -> Self {
        let repo = GitRepo::new(root, config.git_program.clone());
        Self { repo, config }
    }

    pub fn repo(&self) -> &GitRepo {
        &self.repo
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    /// Build every challenge in `selection`.
    ///
    /// The first failure stops the run; challenges already built stay in place.
    pub fn build(
        &self,
        selection: &ChallengeSelection,
        prompt: &mut dyn OverwritePrompt,
    ) -> anyhow::Result<BuildReport> {
        self.config.validate()?;
        let preflight = preflight::run_checks(&self.repo, &self.config, CheckMode::Build)?;

        let main = self.config.main_branch.as_str();
        self.repo.checkout(main)?;
        let summary_committed = self.commit_summary()?;

        let mut guard = BranchGuard::new(main, prompt);
        let mut challenges = Vec::with_capacity(selection.len());
        for challenge in selection.iter() {
            let mut stage = Stage::new(&self.repo, &self.config, &mut guard);
            let outcome = challenge
                .build(&mut stage)
                .with_context(|| format!("Failed to build challenge {}", challenge.id()))?;
            challenges.push(outcome);
        }
        let replaced_branches = guard.replaced().to_vec();

        self.repo.checkout(main)?;
        let branches = self.repo.list_branches()?;
        tracing::info!(count = challenges.len(), "build finished");

        Ok(BuildReport {
            preflight,
            summary_committed,
            challenges,
            replaced_branches,
            branches,
        })
    }

    /// Remove every challenge branch, tag, stash entry and file.
    pub fn cleanup(&self) -> anyhow::Result<CleanupReport> {
        self.config.validate()?;
        cleanup::run_cleanup(&self.repo, &self.config)
    }

    /// Write the overview document on the main branch, committing only if it
    /// changed.
    fn commit_summary(&self) -> anyhow::Result<bool> {
        let rel = self.config.summary_file.as_str();
        let path = self.repo.root().join(rel);
        let content = hints::render_summary();

        let current = std::fs::read_to_string(&path).ok();
        if current.as_deref() != Some(content.as_str()) {
            challenges::write_file(&path, &content)?;
        }
        self.repo.add_paths(&[rel])?;
        if !self.repo.has_staged_changes()? {
            tracing::debug!(file = rel, "overview unchanged");
            return Ok(false);
        }
        self.repo.commit(&CommitSpec::new(SUMMARY_COMMIT_MESSAGE))?;
        Ok(true)
    }
}
