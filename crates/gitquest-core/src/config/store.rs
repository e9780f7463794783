//! Config store resolving which `.gitquest.toml` applies to a repository.

use std::path::{Path, PathBuf};

use super::{QuestConfig, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    candidates: Vec<PathBuf>,
    required: bool,
}

impl ConfigStore {
    /// Standard lookup: the project file, then the global file.
    pub fn for_repo(repo_root: &Path) -> Self {
        let mut candidates = vec![paths::project_config_path(repo_root)];
        candidates.extend(paths::global_config_path());
        Self {
            candidates,
            required: false,
        }
    }

    /// Use exactly one file, which must exist.
    pub fn explicit(path: PathBuf) -> Self {
        Self {
            candidates: vec![path],
            required: true,
        }
    }

    /// Load the first existing candidate, or defaults when none exists.
    ///
    /// An explicit store fails if its single file is missing.
    pub fn load(&self) -> anyhow::Result<QuestConfig> {
        if self.required
            && let Some(missing) = self.candidates.iter().find(|path| !path.is_file())
        {
            anyhow::bail!("Config file not found: {}", missing.display());
        }

        for candidate in &self.candidates {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "loading config");
                return parser::parse_quest_toml(candidate);
            }
        }
        Ok(QuestConfig::new())
    }
}
