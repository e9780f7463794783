#![allow(dead_code)]

pub mod git;

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;

use git2::{ObjectType, Repository, TreeWalkMode, TreeWalkResult};

use gitquest_core::builder::ScenarioBuilder;
use gitquest_core::config::QuestConfig;

pub use git::{git, git_command, git_succeeds};

/// Initialize a repository on `main` with one commit.
pub fn init_repo(root: &Path) {
    git(root, &["init", "--quiet"]);
    git(root, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(root, &["config", "user.email", "test@example.com"]);
    git(root, &["config", "user.name", "Test User"]);
    git(root, &["config", "commit.gpgsign", "false"]);
    git(root, &["config", "tag.gpgsign", "false"]);
    std::fs::write(root.join("README.md"), "# playground\n").unwrap();
    git(root, &["add", "README.md"]);
    git(root, &["commit", "--quiet", "-m", "Initial commit"]);
}

pub fn patch_available() -> bool {
    Command::new("patch")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Configuration for tests that never reach challenge 5.
///
/// Only challenge 5 runs the patch program; preflight just needs something
/// answering `--version`.
pub fn config_without_patch() -> QuestConfig {
    QuestConfig {
        patch_program: if patch_available() { "patch" } else { "git" }.to_string(),
        ..QuestConfig::default()
    }
}

pub fn builder(root: &Path) -> ScenarioBuilder {
    ScenarioBuilder::new(root, config_without_patch())
}

pub fn branches(root: &Path) -> BTreeSet<String> {
    git(root, &["for-each-ref", "--format=%(refname:short)", "refs/heads"])
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn tags(root: &Path) -> BTreeSet<String> {
    git(root, &["for-each-ref", "--format=%(refname:short)", "refs/tags"])
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn stash_subjects(root: &Path) -> Vec<String> {
    git(root, &["stash", "list", "--format=%gs"])
        .lines()
        .map(str::to_string)
        .collect()
}

/// Content of `path` at `rev`, if present.
pub fn file_at(repo: &Repository, rev: &str, path: &str) -> Option<String> {
    let object = repo.revparse_single(&format!("{rev}:{path}")).ok()?;
    let blob = object.peel_to_blob().ok()?;
    Some(String::from_utf8_lossy(blob.content()).into_owned())
}

/// Every file (path, content) in the tree of `rev`.
pub fn tree_files(repo: &Repository, rev: &str) -> Vec<(String, String)> {
    let tree = repo
        .revparse_single(rev)
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .tree()
        .unwrap();
    let mut files = Vec::new();
    tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
        if entry.kind() == Some(ObjectType::Blob) {
            let blob = repo.find_blob(entry.id()).unwrap();
            files.push((
                format!("{}{}", dir, entry.name().unwrap_or_default()),
                String::from_utf8_lossy(blob.content()).into_owned(),
            ));
        }
        TreeWalkResult::Ok
    })
    .unwrap();
    files
}

/// Full messages of every commit reachable from any ref or reflog entry.
pub fn all_commit_messages(root: &Path) -> Vec<String> {
    git(root, &["log", "--all", "--reflog", "--format=%B%x00"])
        .split('\0')
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .collect()
}
