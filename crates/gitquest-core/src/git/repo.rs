//! Thin wrapper running the git program against one working tree.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Context;

use super::CommitSpec;
use crate::error::QuestError;

/// Variables that would redirect git away from `root`.
const GIT_ENV_OVERRIDES: [&str; 4] = ["GIT_DIR", "GIT_WORK_TREE", "GIT_INDEX_FILE", "GIT_COMMON_DIR"];

/// One entry of `git stash list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    /// Selector such as `stash@{0}`
    pub selector: String,
    /// Reflog subject, e.g. `On main: message`
    pub subject: String,
}

impl StashEntry {
    /// Whether this entry was pushed with `stash push -m <message>`.
    pub fn has_message(&self, message: &str) -> bool {
        self.subject == message
            || self
                .subject
                .strip_suffix(message)
                .is_some_and(|prefix| prefix.ends_with(": "))
    }
}

/// Runs git commands in a fixed working tree.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
    program: String,
}

impl GitRepo {
    pub fn new(root: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            program: program.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run git and return its stdout with trailing whitespace removed.
    ///
    /// A non-zero exit becomes `QuestError::CommandFailed`.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, String)]) -> anyhow::Result<String> {
        let output = self.output(args, env)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(QuestError::command_failed(&self.program, args, stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Run git and report only whether it succeeded.
    fn succeeds(&self, args: &[&str]) -> anyhow::Result<bool> {
        Ok(self.output(args, &[])?.status.success())
    }

    fn output(&self, args: &[&str], env: &[(&str, String)]) -> anyhow::Result<Output> {
        tracing::debug!(program = %self.program, ?args, "running git");
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.root);
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output()
            .with_context(|| format!("Failed to run {} {:?}", self.program, args))
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Whether `root` lies inside a working tree (not a bare repo).
    pub fn is_work_tree(&self) -> anyhow::Result<bool> {
        let output = self.output(&["rev-parse", "--is-inside-work-tree"], &[])?;
        Ok(output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    pub fn ref_exists(&self, refname: &str) -> anyhow::Result<bool> {
        self.succeeds(&["rev-parse", "--verify", "--quiet", refname])
    }

    pub fn branch_exists(&self, name: &str) -> anyhow::Result<bool> {
        self.ref_exists(&format!("refs/heads/{name}"))
    }

    pub fn tag_exists(&self, name: &str) -> anyhow::Result<bool> {
        self.ref_exists(&format!("refs/tags/{name}"))
    }

    /// The checked-out branch, or `None` on a detached HEAD.
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let output = self.output(&["symbolic-ref", "--quiet", "--short", "HEAD"], &[])?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }

    pub fn rev_parse(&self, rev: &str) -> anyhow::Result<String> {
        self.run(&["rev-parse", "--verify", rev])
    }

    pub fn short_id(&self, rev: &str) -> anyhow::Result<String> {
        self.run(&["rev-parse", "--short", "--verify", rev])
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        self.list_refs("refs/heads")
    }

    pub fn list_tags(&self) -> anyhow::Result<Vec<String>> {
        self.list_refs("refs/tags")
    }

    fn list_refs(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let stdout = self.run(&["for-each-ref", "--format=%(refname:short)", prefix])?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    pub fn stash_list(&self) -> anyhow::Result<Vec<StashEntry>> {
        let stdout = self.run(&["stash", "list", "--format=%gd%x09%gs"])?;
        Ok(stdout
            .lines()
            .filter_map(|line| line.split_once('\t'))
            .map(|(selector, subject)| StashEntry {
                selector: selector.to_string(),
                subject: subject.to_string(),
            })
            .collect())
    }

    /// Whether the index differs from HEAD.
    pub fn has_staged_changes(&self) -> anyhow::Result<bool> {
        let stdout = self.run(&["diff", "--cached", "--name-only"])?;
        Ok(!stdout.is_empty())
    }

    // ---------------------------------------------------------------------
    // Branches
    // ---------------------------------------------------------------------

    pub fn checkout(&self, branch: &str) -> anyhow::Result<()> {
        self.run(&["checkout", "--quiet", branch]).map(drop)
    }

    pub fn checkout_new_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.run(&["checkout", "--quiet", "-b", branch]).map(drop)
    }

    /// Detach HEAD at the current commit.
    pub fn checkout_detached(&self) -> anyhow::Result<()> {
        self.run(&["checkout", "--quiet", "--detach"]).map(drop)
    }

    pub fn delete_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.run(&["branch", "-D", branch]).map(drop)
    }

    // ---------------------------------------------------------------------
    // Staging and commits
    // ---------------------------------------------------------------------

    /// Stage exactly `paths`; nothing else in the working tree is touched.
    pub fn add_paths(&self, paths: &[&str]) -> anyhow::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.run(&args).map(drop)
    }

    /// Whether git tracks `path` in the index.
    pub fn is_tracked(&self, path: &str) -> anyhow::Result<bool> {
        self.succeeds(&["ls-files", "--error-unmatch", "--", path])
    }

    /// Remove a tracked path from the index and the working tree.
    ///
    /// Paths git does not know about are ignored.
    pub fn remove_path(&self, path: &str) -> anyhow::Result<()> {
        self.run(&["rm", "-r", "-f", "-q", "--ignore-unmatch", "--", path])
            .map(drop)
    }

    /// Commit the index and return the new commit id.
    pub fn commit(&self, spec: &CommitSpec) -> anyhow::Result<String> {
        self.run_with_env(&["commit", "--quiet", "-m", spec.message.as_str()], &spec.env())?;
        self.rev_parse("HEAD")
    }

    /// Replace the message (and staged content) of the last commit.
    pub fn amend(&self, message: &str) -> anyhow::Result<String> {
        self.run(&["commit", "--quiet", "--amend", "-m", message])?;
        self.rev_parse("HEAD")
    }

    pub fn reset_hard(&self, rev: &str) -> anyhow::Result<()> {
        self.run(&["reset", "--quiet", "--hard", rev]).map(drop)
    }

    // ---------------------------------------------------------------------
    // Tags and stashes
    // ---------------------------------------------------------------------

    /// Create (or move) a lightweight tag at `target` or HEAD.
    pub fn tag_lightweight(&self, name: &str, target: Option<&str>) -> anyhow::Result<()> {
        let mut args = vec!["tag", "--force", name];
        args.extend(target);
        self.run(&args).map(drop)
    }

    /// Create (or move) an annotated tag at `target` or HEAD.
    pub fn tag_annotated(
        &self,
        name: &str,
        message: &str,
        target: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut args = vec!["tag", "--force", "-a", name, "-m", message];
        args.extend(target);
        self.run(&args).map(drop)
    }

    pub fn delete_tag(&self, name: &str) -> anyhow::Result<()> {
        self.run(&["tag", "-d", name]).map(drop)
    }

    /// Shelve tracked modifications under `message`.
    pub fn stash_push(&self, message: &str) -> anyhow::Result<()> {
        self.run(&["stash", "push", "--quiet", "-m", message])
            .map(drop)
    }

    pub fn stash_drop(&self, selector: &str) -> anyhow::Result<()> {
        self.run(&["stash", "drop", "--quiet", selector]).map(drop)
    }

    /// Drop every stash entry pushed with `message` and return how many.
    pub fn drop_stashes_with_message(&self, message: &str) -> anyhow::Result<usize> {
        let matching: Vec<StashEntry> = self
            .stash_list()?
            .into_iter()
            .filter(|entry| entry.has_message(message))
            .collect();
        // Highest index first so earlier selectors stay valid.
        for entry in matching.iter().rev() {
            self.stash_drop(&entry.selector)?;
        }
        Ok(matching.len())
    }
}
