//! GitQuest Core Library
//!
//! Builds scripted git challenge scenarios inside an existing working tree
//! and removes them again. Every repository change goes through the git
//! program; the library only sequences invocations.

pub mod builder;
pub mod challenges;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod git;
pub mod guard;
pub mod preflight;

/// Re-exports of commonly used types
pub mod prelude {
    // Driver
    pub use crate::builder::{BuildReport, ScenarioBuilder};
    pub use crate::cleanup::CleanupReport;

    // Challenges
    pub use crate::challenges::{Challenge, ChallengeOutcome, ChallengeSelection, FlagLocation};

    // Configuration
    pub use crate::config::{ConfigStore, QuestConfig};

    // Errors
    pub use crate::error::QuestError;

    // Branch collisions
    pub use crate::guard::{AssumeNo, AssumeYes, OverwritePrompt};

    // Preflight
    pub use crate::preflight::{CheckMode, PreflightReport};
}
