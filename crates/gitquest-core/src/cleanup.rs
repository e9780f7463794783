//! Removal of everything the builder creates.
//!
//! Every list is fixed up front; nothing is discovered by pattern matching.
//! Missing branches, tags, stashes and files are skipped silently.

use serde::Serialize;

use crate::challenges::{
    APP_FILE, ARCHIVE_NOTES, CHECK_SCRIPT, CLUE_FILE, CONFIG_FILE, Challenge, DECODER_PATCH,
    DETACHED_NOTES, ENV_FILE, LOGIN_NOTES, MAINTENANCE_NOTES, SEARCH_NOTES, TOKEN_FILE,
    TOKEN_PATCH,
};
use crate::config::QuestConfig;
use crate::git::{CommitSpec, GitRepo};
use crate::preflight::{self, CheckMode};

/// Message of the commit recording removed scaffolding.
pub const CLEANUP_COMMIT_MESSAGE: &str = "Remove git challenge scaffolding";

/// Tracked files removed besides the summary and hint documents.
pub const CLEANUP_FILES: [&str; 13] = [
    APP_FILE,
    CONFIG_FILE,
    ENV_FILE,
    TOKEN_FILE,
    DECODER_PATCH,
    TOKEN_PATCH,
    CHECK_SCRIPT,
    CLUE_FILE,
    DETACHED_NOTES,
    MAINTENANCE_NOTES,
    LOGIN_NOTES,
    SEARCH_NOTES,
    ARCHIVE_NOTES,
];

/// What cleanup removed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    pub deleted_branches: Vec<String>,
    pub deleted_tags: Vec<String>,
    pub dropped_stashes: usize,
    pub removed_files: Vec<String>,
    /// Id of the removal commit, when anything was tracked
    pub commit: Option<String>,
}

impl CleanupReport {
    pub fn is_empty(&self) -> bool {
        self.deleted_branches.is_empty()
            && self.deleted_tags.is_empty()
            && self.dropped_stashes == 0
            && self.removed_files.is_empty()
    }
}

pub fn cleanup_branches() -> Vec<&'static str> {
    Challenge::ALL
        .into_iter()
        .flat_map(Challenge::branches)
        .collect()
}

pub fn cleanup_tags() -> Vec<&'static str> {
    Challenge::ALL
        .into_iter()
        .flat_map(|challenge| challenge.tags().iter().copied())
        .collect()
}

pub fn cleanup_stash_messages() -> Vec<String> {
    Challenge::ALL
        .into_iter()
        .filter_map(Challenge::stash_message)
        .collect()
}

/// Every file path cleanup removes for `config`.
pub fn cleanup_files(config: &QuestConfig) -> Vec<String> {
    let mut files = vec![config.summary_file.clone(), config.hint_file.clone()];
    files.extend(CLEANUP_FILES.iter().map(|path| path.to_string()));
    files
}

/// Remove every challenge branch, tag, stash entry and file.
pub fn run_cleanup(repo: &GitRepo, config: &QuestConfig) -> anyhow::Result<CleanupReport> {
    preflight::run_checks(repo, config, CheckMode::Cleanup)?;
    tracing::info!(repo = %repo.root().display(), "cleaning up challenges");

    if repo.current_branch()?.as_deref() != Some(config.main_branch.as_str()) {
        repo.checkout(&config.main_branch)?;
    }

    let mut report = CleanupReport::default();

    for branch in cleanup_branches() {
        if repo.branch_exists(branch)? {
            repo.delete_branch(branch)?;
            report.deleted_branches.push(branch.to_string());
        }
    }

    for tag in cleanup_tags() {
        if repo.tag_exists(tag)? {
            repo.delete_tag(tag)?;
            report.deleted_tags.push(tag.to_string());
        }
    }

    for message in cleanup_stash_messages() {
        report.dropped_stashes += repo.drop_stashes_with_message(&message)?;
    }

    for path in cleanup_files(config) {
        if repo.is_tracked(&path)? {
            report.removed_files.push(path.clone());
        }
        repo.remove_path(&path)?;
    }

    if repo.has_staged_changes()? {
        report.commit = Some(repo.commit(&CommitSpec::new(CLEANUP_COMMIT_MESSAGE))?);
    }

    tracing::info!(
        branches = report.deleted_branches.len(),
        tags = report.deleted_tags.len(),
        stashes = report.dropped_stashes,
        files = report.removed_files.len(),
        "cleanup finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_list_covers_every_challenge_branch() {
        let branches = cleanup_branches();
        assert_eq!(branches.len(), 16);
        assert!(branches.contains(&"challenge-09-upstream"));
        assert!(branches.contains(&"ch08-archive-2019"));
    }

    #[test]
    fn tag_list_is_fixed() {
        assert_eq!(
            cleanup_tags(),
            vec![
                "ch02-v0.9",
                "ch02-v1.0",
                "ch02-v1.1-rc",
                "ch03-good",
                "ch10-release",
                "ch12-vault"
            ]
        );
    }

    #[test]
    fn stash_messages_come_from_challenges_4_and_12() {
        let messages = cleanup_stash_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(Some(messages[0].clone()), Challenge::Stash.stash_message());
        assert_eq!(Some(messages[1].clone()), Challenge::Combo.stash_message());
    }

    #[test]
    fn file_list_covers_every_planted_file() {
        let files = cleanup_files(&QuestConfig::default());
        assert_eq!(files[0], "CHALLENGES.md");
        assert_eq!(files[1], "HINT.md");
        for challenge in Challenge::ALL {
            for planted in challenge.planted_files() {
                assert!(files.iter().any(|f| f.as_str() == *planted), "{planted} not cleaned up");
            }
        }
        assert!(!files.iter().any(|f| f == ".gitignore"));
    }

    #[test]
    fn empty_report() {
        assert!(CleanupReport::default().is_empty());
    }
}
