//! Challenge 9: two branches that disagree about one line.

use super::hints::HintFacts;
use super::{Challenge, Stage};

pub(super) const UPSTREAM_BRANCH: &str = "challenge-09-upstream";

const CONFLICT_KEY: &str = "timeout";

pub(super) fn build_rebase(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    let branch = Challenge::Rebase.branch();
    stage.start(branch)?;

    stage.set_config(CONFLICT_KEY, "30")?;
    stage.set_config("retries", "3")?;
    stage.add_function("connect", "return None")?;
    stage.commit("Add network settings")?;

    stage.fork(UPSTREAM_BRANCH)?;
    stage.set_config(CONFLICT_KEY, "60")?;
    stage.commit(&format!(
        "Raise timeout for slow networks {}",
        Challenge::Rebase.flag()
    ))?;

    stage.repo().checkout(branch)?;
    stage.set_config(CONFLICT_KEY, "10")?;
    stage.commit("Lower timeout for faster failures")?;

    Ok(HintFacts::default())
}
