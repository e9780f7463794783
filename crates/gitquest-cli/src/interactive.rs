//! Terminal confirmation for branch collisions.
//!
//! Uses dialoguer for the prompt. Without a terminal the answer is "no",
//! which aborts the build instead of silently replacing work.

use std::io::{self, Write};

use anyhow::Result;
use console::{Term, style};
use dialoguer::{Confirm, theme::ColorfulTheme};

use gitquest_core::guard::OverwritePrompt;

/// Asks on stderr before deleting and recreating an existing branch.
pub struct TerminalPrompt<W: Write = io::Stderr> {
    /// Output writer (for testing)
    writer: W,
    /// Whether a user can answer
    interactive: bool,
    /// Theme for dialoguer prompts
    theme: ColorfulTheme,
}

impl TerminalPrompt<io::Stderr> {
    pub fn new() -> Self {
        Self {
            writer: io::stderr(),
            interactive: Term::stderr().is_term(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt<io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPrompt<W> {
    /// Create a non-interactive prompt with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            interactive: false,
            theme: ColorfulTheme::default(),
        }
    }
}

impl<W: Write> OverwritePrompt for TerminalPrompt<W> {
    fn confirm_overwrite(&mut self, branch: &str) -> Result<bool> {
        writeln!(
            self.writer,
            "{} branch {} already exists",
            style("!").yellow().bold(),
            style(branch).cyan()
        )?;

        if !self.interactive {
            writeln!(
                self.writer,
                "  not running in a terminal; pass --yes to replace it"
            )?;
            return Ok(false);
        }

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Delete and recreate `{branch}`?"))
            .default(false)
            .interact_on(&Term::stderr())?;

        Ok(confirmed)
    }
}
