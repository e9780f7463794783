//! Shared plumbing for challenge routines: file edits, commits, hints.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;

use super::Challenge;
use super::hints::{self, HintFacts};
use crate::config::QuestConfig;
use crate::git::{CommitSpec, GitRepo};
use crate::guard::BranchGuard;

/// Application stub that accumulates small functions across commits.
pub const APP_FILE: &str = "src/app.py";
/// Configuration stub that accumulates keys across commits.
pub const CONFIG_FILE: &str = "config.yml";

const APP_HEADER: &str = "\"\"\"Sample application used by the git challenges.\"\"\"\n";
const CONFIG_HEADER: &str = "# Application settings\n";

/// Working state handed to each challenge routine.
///
/// Commits stage only the paths this routine wrote, so unrelated files in
/// the user's working tree never end up on a challenge branch.
pub struct Stage<'a, 'p> {
    repo: &'a GitRepo,
    config: &'a QuestConfig,
    guard: &'a mut BranchGuard<'p>,
    written: RefCell<BTreeSet<String>>,
}

impl<'a, 'p> Stage<'a, 'p> {
    pub fn new(repo: &'a GitRepo, config: &'a QuestConfig, guard: &'a mut BranchGuard<'p>) -> Self {
        Self {
            repo,
            config,
            guard,
            written: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn repo(&self) -> &GitRepo {
        self.repo
    }

    pub fn config(&self) -> &QuestConfig {
        self.config
    }

    /// Create `branch` from the main branch and switch to it.
    pub fn start(&mut self, branch: &str) -> anyhow::Result<()> {
        self.guard.create_from_main(self.repo, branch)
    }

    /// Create `branch` at the current commit and switch to it.
    pub fn fork(&mut self, branch: &str) -> anyhow::Result<()> {
        self.guard.create_here(self.repo, branch)
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.repo.root().join(rel)
    }

    pub fn read(&self, rel: &str) -> anyhow::Result<String> {
        let path = self.path(rel);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> anyhow::Result<()> {
        write_file(&self.path(rel), content)?;
        self.written.borrow_mut().insert(rel.to_string());
        Ok(())
    }

    /// Paths written so far that the next commit will stage.
    pub fn written(&self) -> Vec<String> {
        self.written.borrow().iter().cloned().collect()
    }

    pub fn append(&self, rel: &str, content: &str) -> anyhow::Result<()> {
        let existing = if self.path(rel).exists() {
            self.read(rel)?
        } else {
            String::new()
        };
        self.write(rel, &format!("{existing}{content}"))
    }

    /// Replace the first occurrence of `from`; missing text is an error.
    pub fn replace(&self, rel: &str, from: &str, to: &str) -> anyhow::Result<()> {
        let content = self.read(rel)?;
        if !content.contains(from) {
            anyhow::bail!("{} does not contain {:?}", rel, from);
        }
        self.write(rel, &content.replacen(from, to, 1))
    }

    /// Append a one-statement function to the application stub.
    pub fn add_function(&self, name: &str, body: &str) -> anyhow::Result<()> {
        self.add_definition(&format!("{name}()"), body)
    }

    /// Like [`Stage::add_function`] with an explicit parameter list.
    pub fn add_definition(&self, signature: &str, body: &str) -> anyhow::Result<()> {
        if !self.path(APP_FILE).exists() {
            self.write(APP_FILE, APP_HEADER)?;
        }
        self.append(APP_FILE, &format!("\n\ndef {signature}:\n    {body}\n"))
    }

    /// Set `key: value` in the configuration stub, replacing an existing key.
    pub fn set_config(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let content = if self.path(CONFIG_FILE).exists() {
            self.read(CONFIG_FILE)?
        } else {
            CONFIG_HEADER.to_string()
        };
        let prefix = format!("{key}:");
        let mut found = false;
        let mut lines: Vec<String> = content
            .lines()
            .map(|line| {
                if !found && line.starts_with(&prefix) {
                    found = true;
                    format!("{key}: {value}")
                } else {
                    line.to_string()
                }
            })
            .collect();
        if !found {
            lines.push(format!("{key}: {value}"));
        }
        self.write(CONFIG_FILE, &(lines.join("\n") + "\n"))
    }

    /// Stage the written paths and commit with the configured identity.
    pub fn commit(&self, message: &str) -> anyhow::Result<String> {
        self.commit_spec(&CommitSpec::new(message))
    }

    /// Paths that left the working tree (a branch switch, `git rm`) are
    /// skipped; removals are staged by whoever removed them.
    pub fn commit_spec(&self, spec: &CommitSpec) -> anyhow::Result<String> {
        let present: Vec<String> = self
            .written()
            .into_iter()
            .filter(|rel| self.path(rel).exists())
            .collect();
        let paths: Vec<&str> = present.iter().map(String::as_str).collect();
        self.repo.add_paths(&paths)?;
        self.repo.commit(spec)
    }

    /// Stash tracked modifications under `message`.
    ///
    /// Entries left behind by an earlier build with the same message are
    /// dropped first.
    pub fn shelve(&self, message: &str) -> anyhow::Result<()> {
        let dropped = self.repo.drop_stashes_with_message(message)?;
        if dropped > 0 {
            tracing::warn!(dropped, "replacing stash entries from a previous build");
        }
        self.repo.stash_push(message)?;
        if !self
            .repo
            .stash_list()?
            .first()
            .is_some_and(|entry| entry.has_message(message))
        {
            anyhow::bail!("Nothing to stash for {:?}", message);
        }
        Ok(())
    }

    /// Write and commit the hint document, then return to the main branch.
    pub fn finish(&self, challenge: Challenge, facts: &HintFacts) -> anyhow::Result<()> {
        self.write(&self.config.hint_file, &hints::render(challenge, facts))?;
        self.commit(&format!("Add hint for challenge {}", challenge.id()))?;
        self.repo.checkout(&self.config.main_branch)
    }
}

/// Write `content` to `path`, creating parent directories.
pub(crate) fn write_file(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::AssumeNo;
    use tempfile::TempDir;

    fn with_stage(test: impl FnOnce(&Stage<'_, '_>, &std::path::Path)) {
        let temp = TempDir::new().unwrap();
        let repo = GitRepo::new(temp.path(), "git");
        let config = QuestConfig::default();
        let mut prompt = AssumeNo;
        let mut guard = BranchGuard::new("main", &mut prompt);
        let stage = Stage::new(&repo, &config, &mut guard);
        test(&stage, temp.path());
    }

    #[test]
    fn add_function_creates_header_once() {
        with_stage(|stage, root| {
            stage.add_function("greet", "return \"hello\"").unwrap();
            stage.add_function("bye", "return \"bye\"").unwrap();

            let content = std::fs::read_to_string(root.join(APP_FILE)).unwrap();
            assert_eq!(
                content,
                format!(
                    "{APP_HEADER}\n\ndef greet():\n    return \"hello\"\n\n\ndef bye():\n    return \"bye\"\n"
                )
            );
        });
    }

    #[test]
    fn set_config_replaces_existing_key() {
        with_stage(|stage, root| {
            stage.set_config("timeout", "30").unwrap();
            stage.set_config("retries", "3").unwrap();
            stage.set_config("timeout", "60").unwrap();

            let content = std::fs::read_to_string(root.join(CONFIG_FILE)).unwrap();
            assert_eq!(content, "# Application settings\ntimeout: 60\nretries: 3\n");
        });
    }

    #[test]
    fn replace_requires_match() {
        with_stage(|stage, _| {
            stage.write("a.txt", "one two one\n").unwrap();
            stage.replace("a.txt", "one", "1").unwrap();
            assert_eq!(stage.read("a.txt").unwrap(), "1 two one\n");
            assert!(stage.replace("a.txt", "three", "3").is_err());
        });
    }

    #[test]
    fn write_creates_parent_directories() {
        with_stage(|stage, root| {
            stage.write("deep/nested/file.txt", "x").unwrap();
            assert!(root.join("deep/nested/file.txt").is_file());
        });
    }

    #[test]
    fn edits_are_recorded_once() {
        with_stage(|stage, _| {
            stage.set_config("timeout", "30").unwrap();
            stage.add_function("greet", "return 1").unwrap();
            stage.set_config("retries", "3").unwrap();
            assert_eq!(stage.written(), vec![CONFIG_FILE.to_string(), APP_FILE.to_string()]);
        });
    }

    #[test]
    fn commit_leaves_unrelated_files_alone() {
        let temp = TempDir::new().unwrap();
        let repo = GitRepo::new(temp.path(), "git");
        repo.run(&["init", "--quiet"]).unwrap();
        repo.run(&["config", "user.email", "test@example.com"]).unwrap();
        repo.run(&["config", "user.name", "Test User"]).unwrap();
        repo.run(&["config", "commit.gpgsign", "false"]).unwrap();
        std::fs::write(temp.path().join("notes.txt"), "mine\n").unwrap();

        let config = QuestConfig::default();
        let mut prompt = AssumeNo;
        let mut guard = BranchGuard::new("main", &mut prompt);
        let stage = Stage::new(&repo, &config, &mut guard);
        stage.write("a.txt", "a\n").unwrap();
        stage.commit("add a").unwrap();

        assert_eq!(repo.run(&["ls-files"]).unwrap(), "a.txt");
        assert!(!repo.is_tracked("notes.txt").unwrap());
        assert!(temp.path().join("notes.txt").is_file());
    }
}
