//! Failure classes for building and cleaning up challenges.
//!
//! Every failure is fatal. Functions return `anyhow::Result` and wrap one of
//! these variants so frontends can print them and tests can downcast them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("required program `{program}` is not available: {reason}")]
    ToolMissing { program: String, reason: String },

    #[error("{} is not inside a git working tree", .0.display())]
    NotAWorkTree(PathBuf),

    #[error("branch `{0}` does not exist")]
    MissingBranch(String),

    #[error(
        "insufficient disk space: {available_bytes} bytes available, {required_bytes} required"
    )]
    InsufficientDiskSpace {
        available_bytes: u64,
        required_bytes: u64,
    },

    #[error("branch `{0}` already exists and was not replaced")]
    BranchExists(String),

    #[error("unknown challenge identifier `{0}` (expected a number from 1 to 12)")]
    UnknownChallenge(String),

    #[error("no challenges selected")]
    EmptySelection,

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

impl QuestError {
    /// Build a `CommandFailed` from a program name and its arguments.
    pub fn command_failed(program: &str, args: &[&str], stderr: impl Into<String>) -> Self {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        Self::CommandFailed {
            command,
            stderr: stderr.into(),
        }
    }
}
