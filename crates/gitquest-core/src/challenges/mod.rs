//! The twelve challenge scenarios.
//!
//! Each challenge is a variant of [`Challenge`]. Metadata and the build
//! routine are looked up through a single `match` per property, so adding a
//! challenge means adding one variant and one routine.

mod combo;
mod conflict;
mod forensics;
mod history;
pub mod hints;
mod patching;
mod recovery;
mod selection;
mod stage;

use serde::Serialize;

pub use combo::CLUE_FILE;
pub use hints::HintFacts;
pub use history::{ARCHIVE_NOTES, CHECK_SCRIPT, ENV_FILE, LOGIN_NOTES, SEARCH_NOTES};
pub use patching::{DECODER_PATCH, TOKEN_FILE, TOKEN_PATCH, decode_patched_token};
pub use recovery::{DETACHED_NOTES, MAINTENANCE_NOTES};
pub use selection::ChallengeSelection;
pub use stage::{APP_FILE, CONFIG_FILE, Stage};
pub(crate) use stage::write_file;

/// One scripted scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Challenge {
    Detached,
    Tags,
    Bisect,
    Stash,
    Patch,
    Reflog,
    Secrets,
    Branches,
    Rebase,
    Timestamps,
    Authors,
    Combo,
}

/// Where a challenge hides its flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlagLocation {
    /// The message of a commit created by the routine
    CommitMessage,
    /// The annotation of a tag
    TagMessage { tag: &'static str },
    /// The message of a stash entry
    StashMessage,
    /// The content of a file that was committed and later removed
    DeletedFile { path: &'static str },
    /// Base64 inside an unapplied patch for `target`
    EncodedPatch {
        patch: &'static str,
        target: &'static str,
    },
}

/// What a routine produced.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeOutcome {
    pub id: u8,
    pub challenge: Challenge,
    pub title: &'static str,
    pub branches: Vec<&'static str>,
    pub tags: Vec<&'static str>,
    pub hint: String,
}

impl Challenge {
    pub const ALL: [Challenge; 12] = [
        Challenge::Detached,
        Challenge::Tags,
        Challenge::Bisect,
        Challenge::Stash,
        Challenge::Patch,
        Challenge::Reflog,
        Challenge::Secrets,
        Challenge::Branches,
        Challenge::Rebase,
        Challenge::Timestamps,
        Challenge::Authors,
        Challenge::Combo,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }

    pub fn id(self) -> u8 {
        match self {
            Challenge::Detached => 1,
            Challenge::Tags => 2,
            Challenge::Bisect => 3,
            Challenge::Stash => 4,
            Challenge::Patch => 5,
            Challenge::Reflog => 6,
            Challenge::Secrets => 7,
            Challenge::Branches => 8,
            Challenge::Rebase => 9,
            Challenge::Timestamps => 10,
            Challenge::Authors => 11,
            Challenge::Combo => 12,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Challenge::Detached => "Lost in Detached HEAD",
            Challenge::Tags => "Tales from the Tags",
            Challenge::Bisect => "Hunt the Regression",
            Challenge::Stash => "Shelved and Forgotten",
            Challenge::Patch => "Patch Work",
            Challenge::Reflog => "Gone but Not Forgotten",
            Challenge::Secrets => "Leaky History",
            Challenge::Branches => "Branch Explorer",
            Challenge::Rebase => "Conflict Zone",
            Challenge::Timestamps => "Time Traveler",
            Challenge::Authors => "Impostor",
            Challenge::Combo => "Grand Finale",
        }
    }

    pub fn skill(self) -> &'static str {
        match self {
            Challenge::Detached => "Recover a commit made on a detached HEAD",
            Challenge::Tags => "Read annotated tag messages",
            Challenge::Bisect => "Locate a regression with git bisect",
            Challenge::Stash => "Inspect and recover stash entries",
            Challenge::Patch => "Apply a patch file and decode its payload",
            Challenge::Reflog => "Recover discarded commits with the reflog",
            Challenge::Secrets => "Scan history for deleted secrets",
            Challenge::Branches => "Enumerate and inspect every branch",
            Challenge::Rebase => "Resolve a rebase conflict",
            Challenge::Timestamps => "Spot anomalous commit timestamps",
            Challenge::Authors => "Audit commit author identities",
            Challenge::Combo => "Chain stash, reflog and tag inspection",
        }
    }

    /// The branch holding the hint document.
    pub fn branch(self) -> &'static str {
        match self {
            Challenge::Detached => "challenge-01-detached",
            Challenge::Tags => "challenge-02-tags",
            Challenge::Bisect => "challenge-03-bisect",
            Challenge::Stash => "challenge-04-stash",
            Challenge::Patch => "challenge-05-patch",
            Challenge::Reflog => "challenge-06-reflog",
            Challenge::Secrets => "challenge-07-secrets",
            Challenge::Branches => "challenge-08-branches",
            Challenge::Rebase => "challenge-09-rebase",
            Challenge::Timestamps => "challenge-10-timestamps",
            Challenge::Authors => "challenge-11-authors",
            Challenge::Combo => "challenge-12-combo",
        }
    }

    /// Additional branches the routine creates.
    pub fn extra_branches(self) -> &'static [&'static str] {
        match self {
            Challenge::Branches => &[
                history::LOGIN_BRANCH,
                history::SEARCH_BRANCH,
                history::ARCHIVE_BRANCH,
            ],
            Challenge::Rebase => &[conflict::UPSTREAM_BRANCH],
            _ => &[],
        }
    }

    /// Every branch the routine creates, main challenge branch first.
    pub fn branches(self) -> Vec<&'static str> {
        let mut branches = vec![self.branch()];
        branches.extend_from_slice(self.extra_branches());
        branches
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Challenge::Tags => &[
                history::TAG_V0_9,
                history::TAG_V1_0,
                history::TAG_V1_1_RC,
            ],
            Challenge::Bisect => &[history::GOOD_TAG],
            Challenge::Timestamps => &[forensics::RELEASE_TAG],
            Challenge::Combo => &[combo::VAULT_TAG],
            _ => &[],
        }
    }

    /// Message of the stash entry the routine pushes, if any.
    pub fn stash_message(self) -> Option<String> {
        match self {
            Challenge::Stash => Some(recovery::stash_message()),
            Challenge::Combo => Some(combo::STASH_MESSAGE.to_string()),
            _ => None,
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Challenge::Detached => "FLAG{detached_head_rescued}",
            Challenge::Tags => "FLAG{annotated_tags_tell_tales}",
            Challenge::Bisect => "FLAG{bisect_found_the_bug}",
            Challenge::Stash => "FLAG{stash_never_forgets}",
            Challenge::Patch => "FLAG{patched_and_decoded}",
            Challenge::Reflog => "FLAG{reflog_remembers_everything}",
            Challenge::Secrets => "FLAG{secrets_live_in_history}",
            Challenge::Branches => "FLAG{hidden_branch_discovered}",
            Challenge::Rebase => "FLAG{conflict_resolved_cleanly}",
            Challenge::Timestamps => "FLAG{time_travel_detected}",
            Challenge::Authors => "FLAG{impostor_unmasked}",
            Challenge::Combo => "FLAG{master_of_git_archaeology}",
        }
    }

    pub fn flag_location(self) -> FlagLocation {
        match self {
            Challenge::Tags => FlagLocation::TagMessage {
                tag: history::TAG_V1_0,
            },
            Challenge::Combo => FlagLocation::TagMessage {
                tag: combo::VAULT_TAG,
            },
            Challenge::Stash => FlagLocation::StashMessage,
            Challenge::Secrets => FlagLocation::DeletedFile {
                path: history::ENV_FILE,
            },
            Challenge::Patch => FlagLocation::EncodedPatch {
                patch: TOKEN_PATCH,
                target: TOKEN_FILE,
            },
            Challenge::Detached
            | Challenge::Bisect
            | Challenge::Reflog
            | Challenge::Branches
            | Challenge::Rebase
            | Challenge::Timestamps
            | Challenge::Authors => FlagLocation::CommitMessage,
        }
    }

    /// Files the routine plants, relative to the repository root.
    ///
    /// The shared stubs, the hint file and `.gitignore` are not included.
    pub fn planted_files(self) -> &'static [&'static str] {
        match self {
            Challenge::Detached => &[recovery::DETACHED_NOTES],
            Challenge::Bisect => &[history::CHECK_SCRIPT],
            Challenge::Patch => &[TOKEN_FILE, DECODER_PATCH, TOKEN_PATCH],
            Challenge::Reflog => &[recovery::MAINTENANCE_NOTES],
            Challenge::Secrets => &[history::ENV_FILE],
            Challenge::Branches => &[
                history::LOGIN_NOTES,
                history::SEARCH_NOTES,
                history::ARCHIVE_NOTES,
            ],
            Challenge::Combo => &[combo::CLUE_FILE],
            Challenge::Tags
            | Challenge::Stash
            | Challenge::Rebase
            | Challenge::Timestamps
            | Challenge::Authors => &[],
        }
    }

    /// Run the routine against `stage`, ending back on the main branch.
    pub fn build(self, stage: &mut Stage<'_, '_>) -> anyhow::Result<ChallengeOutcome> {
        tracing::info!(id = self.id(), branch = self.branch(), "building challenge");
        let facts = match self {
            Challenge::Detached => recovery::build_detached(stage)?,
            Challenge::Tags => history::build_tags(stage)?,
            Challenge::Bisect => history::build_bisect(stage)?,
            Challenge::Stash => recovery::build_stash(stage)?,
            Challenge::Patch => patching::build_patch(stage)?,
            Challenge::Reflog => recovery::build_reflog(stage)?,
            Challenge::Secrets => history::build_secrets(stage)?,
            Challenge::Branches => history::build_branches(stage)?,
            Challenge::Rebase => conflict::build_rebase(stage)?,
            Challenge::Timestamps => forensics::build_timestamps(stage)?,
            Challenge::Authors => forensics::build_authors(stage)?,
            Challenge::Combo => combo::build_combo(stage)?,
        };
        stage.finish(self, &facts)?;
        tracing::info!(id = self.id(), "challenge ready");

        Ok(ChallengeOutcome {
            id: self.id(),
            challenge: self,
            title: self.title(),
            branches: self.branches(),
            tags: self.tags().to_vec(),
            hint: hints::render(self, &facts),
        })
    }
}

impl std::fmt::Display for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02} {}", self.id(), self.title())
    }
}
