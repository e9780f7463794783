//! Git operations used to build and remove challenges.
//!
//! Every mutation goes through the external `git` program:
//! - branch, tag and stash management
//! - staging and committing with explicit identities and dates
//! - read-only introspection (existence checks, branch listing)

mod commit;
mod repo;

pub use commit::{CommitDate, CommitSpec, Identity};
pub use repo::{GitRepo, StashEntry};
