//! Challenges about work that no branch points at: detached HEAD (1),
//! stash (4) and reflog (6).

use super::hints::HintFacts;
use super::{Challenge, Stage};

/// Planted on the detached commit.
pub const DETACHED_NOTES: &str = "notes/detached.txt";
/// Planted on the commit that is reset away.
pub const MAINTENANCE_NOTES: &str = "maintenance.txt";

const ORPHAN_PREFIX_LEN: usize = 4;

pub(super) fn stash_message() -> String {
    format!("WIP on settings: {}", Challenge::Stash.flag())
}

pub(super) fn build_detached(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    let branch = Challenge::Detached.branch();
    stage.start(branch)?;

    stage.add_function("greet", "return \"hello\"")?;
    stage.commit("Add greeting helper")?;
    stage.set_config("feature_flags", "basic")?;
    stage.commit("Enable basic feature flags")?;

    stage.repo().checkout_detached()?;
    stage.write(
        DETACHED_NOTES,
        "Trying out an experimental greeting.\nRemember to put this on a branch.\n",
    )?;
    let orphan = stage.commit(&format!(
        "Experimental work on detached HEAD - {}",
        Challenge::Detached.flag()
    ))?;
    stage.repo().checkout(branch)?;
    tracing::debug!(%orphan, "left commit behind on detached HEAD");

    Ok(HintFacts {
        orphan_prefix: Some(orphan.chars().take(ORPHAN_PREFIX_LEN).collect()),
    })
}

pub(super) fn build_stash(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Stash.branch())?;

    stage.set_config("api_endpoint", "https://api.example.com")?;
    stage.add_function("load_settings", "return open(\"config.yml\").read()")?;
    stage.commit("Add settings loader")?;

    stage.set_config("api_endpoint", "https://staging.example.com")?;
    stage.set_config("api_timeout", "15")?;
    stage.shelve(&stash_message())?;

    Ok(HintFacts::default())
}

pub(super) fn build_reflog(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Reflog.branch())?;

    stage.add_function("audit_log", "return []")?;
    stage.commit("Add audit logging")?;

    stage.write(
        MAINTENANCE_NOTES,
        "Audit logs are rotated weekly.\nOld entries are archived, never deleted.\n",
    )?;
    stage.commit(&format!("Add maintenance notes {}", Challenge::Reflog.flag()))?;
    stage.repo().reset_hard("HEAD~1")?;

    stage.add_function("audit_rotate", "return None")?;
    stage.commit("Add audt rotation")?;
    stage.repo().amend("Add audit rotation")?;

    Ok(HintFacts::default())
}
