//! Branch collision handling.
//!
//! Before a challenge creates a branch the guard checks whether it already
//! exists. Existing branches are only replaced after an [`OverwritePrompt`]
//! says yes; a "no" aborts the whole run.

use crate::error::QuestError;
use crate::git::GitRepo;

/// Decides whether an existing branch may be deleted and recreated.
pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, branch: &str) -> anyhow::Result<bool>;
}

/// Always replaces existing branches (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl OverwritePrompt for AssumeYes {
    fn confirm_overwrite(&mut self, _branch: &str) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Never replaces existing branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl OverwritePrompt for AssumeNo {
    fn confirm_overwrite(&mut self, _branch: &str) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// Creates branches from the main branch, consulting the prompt on collisions.
pub struct BranchGuard<'p> {
    main_branch: String,
    prompt: &'p mut dyn OverwritePrompt,
    replaced: Vec<String>,
}

impl<'p> BranchGuard<'p> {
    pub fn new(main_branch: impl Into<String>, prompt: &'p mut dyn OverwritePrompt) -> Self {
        Self {
            main_branch: main_branch.into(),
            prompt,
            replaced: Vec::new(),
        }
    }

    /// Branches deleted and recreated so far.
    pub fn replaced(&self) -> &[String] {
        &self.replaced
    }

    /// Make sure `branch` does not exist, asking before deleting it.
    pub fn clear(&mut self, repo: &GitRepo, branch: &str) -> anyhow::Result<()> {
        if !repo.branch_exists(branch)? {
            return Ok(());
        }
        if !self.prompt.confirm_overwrite(branch)? {
            return Err(QuestError::BranchExists(branch.to_string()).into());
        }
        tracing::warn!(branch, "replacing existing branch");
        if repo.current_branch()?.as_deref() == Some(branch) {
            repo.checkout(&self.main_branch)?;
        }
        repo.delete_branch(branch)?;
        self.replaced.push(branch.to_string());
        Ok(())
    }

    /// Create `branch` at the current HEAD and check it out.
    pub fn create_here(&mut self, repo: &GitRepo, branch: &str) -> anyhow::Result<()> {
        let head = repo.rev_parse("HEAD")?;
        self.clear(repo, branch)?;
        repo.run(&["checkout", "--quiet", "-b", branch, head.as_str()])
            .map(drop)
    }

    /// Create `branch` from the tip of the main branch and check it out.
    pub fn create_from_main(&mut self, repo: &GitRepo, branch: &str) -> anyhow::Result<()> {
        repo.checkout(&self.main_branch)?;
        self.clear(repo, branch)?;
        repo.checkout_new_branch(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommitSpec;
    use tempfile::TempDir;

    struct Recording {
        answer: bool,
        asked: Vec<String>,
    }

    impl OverwritePrompt for Recording {
        fn confirm_overwrite(&mut self, branch: &str) -> anyhow::Result<bool> {
            self.asked.push(branch.to_string());
            Ok(self.answer)
        }
    }

    fn init_repo(path: &std::path::Path) -> GitRepo {
        let git = GitRepo::new(path, "git");
        git.run(&["init", "--quiet"]).unwrap();
        git.run(&["checkout", "--quiet", "-b", "main"]).unwrap();
        git.run(&["config", "user.email", "test@example.com"]).unwrap();
        git.run(&["config", "user.name", "Test User"]).unwrap();
        git.run(&["config", "commit.gpgsign", "false"]).unwrap();
        std::fs::write(path.join("README.md"), "# test\n").unwrap();
        git.add_paths(&["README.md"]).unwrap();
        git.commit(&CommitSpec::new("init")).unwrap();
        git
    }

    #[test]
    fn fresh_branch_does_not_prompt() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        let mut prompt = Recording {
            answer: false,
            asked: Vec::new(),
        };

        {
            let mut guard = BranchGuard::new("main", &mut prompt);
            guard.create_from_main(&repo, "challenge-x").unwrap();
            assert!(guard.replaced().is_empty());
        }

        assert!(prompt.asked.is_empty());
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("challenge-x"));
    }

    #[test]
    fn declining_aborts_with_branch_exists() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        repo.run(&["branch", "challenge-x"]).unwrap();
        let mut prompt = Recording {
            answer: false,
            asked: Vec::new(),
        };

        let err = BranchGuard::new("main", &mut prompt)
            .create_from_main(&repo, "challenge-x")
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<QuestError>(),
            Some(QuestError::BranchExists(name)) if name == "challenge-x"
        ));
        assert_eq!(prompt.asked, vec!["challenge-x".to_string()]);
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("main"));
    }

    #[test]
    fn accepting_recreates_from_main() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        repo.checkout_new_branch("challenge-x").unwrap();
        std::fs::write(temp.path().join("old.txt"), "old\n").unwrap();
        repo.add_paths(&["old.txt"]).unwrap();
        repo.commit(&CommitSpec::new("old work")).unwrap();

        let mut guard_prompt = AssumeYes;
        let mut guard = BranchGuard::new("main", &mut guard_prompt);
        guard.create_from_main(&repo, "challenge-x").unwrap();

        assert_eq!(guard.replaced(), ["challenge-x".to_string()]);
        assert_eq!(
            repo.rev_parse("challenge-x").unwrap(),
            repo.rev_parse("main").unwrap()
        );
        assert!(!temp.path().join("old.txt").exists());
    }

    #[test]
    fn create_here_forks_from_current_branch() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        repo.checkout_new_branch("parent").unwrap();
        std::fs::write(temp.path().join("p.txt"), "p\n").unwrap();
        repo.add_paths(&["p.txt"]).unwrap();
        let parent_tip = repo.commit(&CommitSpec::new("parent work")).unwrap();
        repo.run(&["branch", "side"]).unwrap();
        repo.run(&["branch", "-f", "side", "main"]).unwrap();

        let mut prompt = AssumeYes;
        let mut guard = BranchGuard::new("main", &mut prompt);
        guard.create_here(&repo, "side").unwrap();

        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("side"));
        assert_eq!(repo.rev_parse("side").unwrap(), parent_tip);
    }

    #[test]
    fn assume_no_never_replaces() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        repo.run(&["branch", "challenge-x"]).unwrap();

        let mut prompt = AssumeNo;
        let result = BranchGuard::new("main", &mut prompt).clear(&repo, "challenge-x");
        assert!(result.is_err());
        assert!(repo.branch_exists("challenge-x").unwrap());
    }
}
