//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// File name looked up at the repository root.
pub const PROJECT_CONFIG_FILE: &str = ".gitquest.toml";

pub fn project_config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(PROJECT_CONFIG_FILE)
}

/// `<config_dir>/gitquest/config.toml`, when the platform has a config dir.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitquest").join("config.toml"))
}
