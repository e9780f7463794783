//! Metadata forensics: commit dates (10) and author identities (11).
//!
//! The chronology of challenge 10 is deliberately wrong. A commit dated in
//! 1999 and one dated in 2099 sit between ordinary 2023 commits.

use super::hints::HintFacts;
use super::{Challenge, Stage};
use crate::git::{CommitDate, CommitSpec, Identity};

pub(super) const RELEASE_TAG: &str = "ch10-release";

pub(super) fn build_timestamps(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Timestamps.branch())?;

    let future_message = format!(
        "Schedule maintenance window {}",
        Challenge::Timestamps.flag()
    );
    let timeline = [
        ("generate_report", "2023-03-01T09:00:00+00:00", "Add report generator"),
        ("schedule_report", "2023-03-02T10:30:00+00:00", "Add report scheduler"),
        ("legacy_report", "1999-12-31T23:59:00+00:00", "Import legacy report format"),
        ("maintenance_window", "2099-12-31T23:59:59+00:00", future_message.as_str()),
        ("polish_report", "2023-03-03T14:00:00+00:00", "Polish report output"),
    ];
    for (function, date, message) in timeline {
        stage.add_function(function, "return None")?;
        stage.commit_spec(&CommitSpec::new(message).with_date(CommitDate::parse(date)?))?;
    }

    stage
        .repo()
        .tag_annotated(RELEASE_TAG, "Reports release", None)?;

    Ok(HintFacts::default())
}

fn alice() -> Identity {
    Identity::new("Alice Developer", "alice@example.com")
}

fn bob() -> Identity {
    Identity::new("Bob Reviewer", "bob@example.com")
}

/// Same display name as Alice, with a digit one in the domain.
fn impostor() -> Identity {
    Identity::new("Alice Developer", "alice@examp1e.com")
}

pub(super) fn build_authors(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Authors.branch())?;

    let impostor_message = format!(
        "Update deployment credentials {}",
        Challenge::Authors.flag()
    );
    let commits = [
        ("user_model", alice(), "Add user model"),
        ("validate_user", alice(), "Add user validation"),
        ("validate_email", bob(), "Review fixes for validation"),
        ("deploy_credentials", impostor(), impostor_message.as_str()),
        ("export_users", alice(), "Add user export"),
    ];
    for (function, author, message) in commits {
        stage.add_function(function, "return None")?;
        stage.commit_spec(&CommitSpec::new(message).with_author(author))?;
    }

    Ok(HintFacts::default())
}
