//! Challenge 5: a patch series where the second patch carries the flag
//! as base64.

use std::process::Command;

use anyhow::Context;
use base64::{Engine, engine::general_purpose};

use super::hints::HintFacts;
use super::{Challenge, Stage};
use crate::error::QuestError;

/// Module the patches apply to.
pub const TOKEN_FILE: &str = "src/token.py";
/// Applied while building.
pub const DECODER_PATCH: &str = "patches/0001-add-decoder.patch";
/// Left for the player to apply.
pub const TOKEN_PATCH: &str = "patches/0002-restore-token.patch";

const TOKEN_MODULE: &str = "\"\"\"Token helpers.\"\"\"\n\
\n\
TOKEN = \"\"\n\
\n\
\n\
def load_token():\n\
\x20   return TOKEN\n";

const DECODER_PATCH_BODY: &str = "--- a/src/token.py\n\
+++ b/src/token.py\n\
@@ -5,3 +5,9 @@\n\
\x20\n\
\x20def load_token():\n\
\x20    return TOKEN\n\
+\n\
+\n\
+def decode_token():\n\
+    import base64\n\
+\n\
+    return base64.b64decode(TOKEN).decode(\"utf-8\")\n";

const TOKEN_PREFIX: &str = "TOKEN = \"";

/// The unapplied patch that sets `TOKEN` to the encoded flag.
pub fn restore_token_patch() -> String {
    let encoded = general_purpose::STANDARD.encode(Challenge::Patch.flag());
    format!(
        "--- a/src/token.py\n\
         +++ b/src/token.py\n\
         @@ -1,5 +1,5 @@\n\
         \x20\"\"\"Token helpers.\"\"\"\n\
         \x20\n\
         -TOKEN = \"\"\n\
         +TOKEN = \"{encoded}\"\n\
         \x20\n\
         \x20\n"
    )
}

/// Pull the `TOKEN = "..."` value out of a token module and decode it.
pub fn decode_patched_token(module: &str) -> anyhow::Result<String> {
    let value = module
        .lines()
        .find_map(|line| line.strip_prefix(TOKEN_PREFIX)?.strip_suffix('"'))
        .ok_or_else(|| anyhow::anyhow!("No TOKEN assignment found"))?;
    let bytes = general_purpose::STANDARD
        .decode(value)
        .context("TOKEN is not valid base64")?;
    String::from_utf8(bytes).context("TOKEN does not decode to UTF-8")
}

pub(super) fn build_patch(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Patch.branch())?;

    stage.write(TOKEN_FILE, TOKEN_MODULE)?;
    stage.commit("Add token module")?;

    stage.write(DECODER_PATCH, DECODER_PATCH_BODY)?;
    apply_patch(stage, DECODER_PATCH)?;
    stage.commit("Apply decoder patch")?;

    stage.write(TOKEN_PATCH, &restore_token_patch())?;
    stage.commit("Add patch restoring the production token")?;

    Ok(HintFacts::default())
}

/// Run the configured patch program on `patch_file` from the repository root.
fn apply_patch(stage: &Stage<'_, '_>, patch_file: &str) -> anyhow::Result<()> {
    let program = stage.config().patch_program.as_str();
    let args = ["-p1", "-i", patch_file];
    tracing::debug!(program, ?args, "applying patch");

    let output = Command::new(program)
        .args(args)
        .current_dir(stage.repo().root())
        .output()
        .map_err(|e| QuestError::ToolMissing {
            program: program.to_string(),
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        let mut detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if detail.is_empty() {
            detail = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        return Err(QuestError::command_failed(program, &args, detail).into());
    }
    Ok(())
}
