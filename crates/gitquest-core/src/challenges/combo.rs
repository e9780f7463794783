//! Challenge 12: stash, reflog and tag inspection chained together.

use super::hints::HintFacts;
use super::{Challenge, Stage};

pub(super) const VAULT_TAG: &str = "ch12-vault";
pub const CLUE_FILE: &str = "clue.txt";
pub(super) const STASH_MESSAGE: &str = "vault: the clue was reset away, try the reflog";

pub(super) fn build_combo(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Combo.branch())?;

    stage.set_config("vault_hint", "none")?;
    stage.add_function("open_vault", "return False")?;
    stage.commit("Add vault module")?;

    stage.write(
        CLUE_FILE,
        &format!("The vault key is kept under the tag {VAULT_TAG}.\n"),
    )?;
    let clue = stage.commit("Leave a clue for the vault")?;
    stage.repo().reset_hard("HEAD~1")?;

    stage.set_config("vault_hint", "check the stash")?;
    stage.shelve(STASH_MESSAGE)?;

    stage.repo().tag_annotated(
        VAULT_TAG,
        &format!("Vault sealed\n\n{}", Challenge::Combo.flag()),
        Some(clue.as_str()),
    )?;

    Ok(HintFacts::default())
}
