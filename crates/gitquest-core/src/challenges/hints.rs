//! Hint documents (one per challenge branch) and the overview document.

use super::Challenge;

/// Values captured while building that a hint may mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintFacts {
    /// Leading hex digits of the commit orphaned by challenge 1
    pub orphan_prefix: Option<String>,
}

/// Render the hint document for `challenge`.
pub fn render(challenge: Challenge, facts: &HintFacts) -> String {
    format!(
        "# Challenge {:02}: {}\n\nSkill: {}\n\n{}\n\nFlags look like `FLAG{{...}}`. Submit the whole string, braces included.\n",
        challenge.id(),
        challenge.title(),
        challenge.skill(),
        body(challenge, facts).trim_end(),
    )
}

fn body(challenge: Challenge, facts: &HintFacts) -> String {
    match challenge {
        Challenge::Detached => {
            let prefix = facts.orphan_prefix.as_deref().unwrap_or("????");
            format!(
                "Someone checked out a commit directly, did some work, and committed it\n\
                 without ever creating a branch. Then they switched back here.\n\n\
                 The lost commit's id starts with `{prefix}`. Git can show any object\n\
                 you can name, even if no branch points at it."
            )
        }
        Challenge::Tags => "This branch was released a few times. Some tags are just names;\n\
             others carry a message of their own. `git tag -n` is a good start."
            .to_string(),
        Challenge::Bisect => "`calculate_total` used to work. Somewhere in this branch it started\n\
             adding one to every order. The last known-good commit is tagged\n\
             `ch03-good`, and `sh tests/check_total.sh` tells good from bad.\n\n\
             Find the first bad commit without reading every diff."
            .to_string(),
        Challenge::Stash => "A developer was halfway through changing the settings when they\n\
             got pulled into a meeting. Their work is not on any branch, but it\n\
             was not thrown away either."
            .to_string(),
        Challenge::Patch => "Two patches live in `patches/`. The first one has already been\n\
             applied. Apply the second to `src/token.py` and find out what the\n\
             token really says."
            .to_string(),
        Challenge::Reflog => "The history of this branch was rewritten: a commit was thrown away\n\
             with a hard reset and another one was amended. Git keeps a private\n\
             diary of where your references have pointed."
            .to_string(),
        Challenge::Secrets => "An environment file was committed by mistake and removed right\n\
             after. Removing a file does not remove it from history."
            .to_string(),
        Challenge::Branches => "This is not the only branch from this challenge. Enumerate them all\n\
             and inspect the ones that look abandoned."
            .to_string(),
        Challenge::Rebase => "Two teams changed the same timeout on different branches. Rebase\n\
             `challenge-09-rebase` onto `challenge-09-upstream`, resolve the\n\
             conflict in `config.yml`, and read what upstream had to say."
            .to_string(),
        Challenge::Timestamps => "The commits on this branch were all written in March 2023.\n\
             At least, that is what most of them claim. Compare author dates\n\
             carefully; one of them comes from somewhere unexpected."
            .to_string(),
        Challenge::Authors => "Several people worked on this branch. One of them is not who they\n\
             say they are. Look closely at every author name and email."
            .to_string(),
        Challenge::Combo => "This one takes several steps. Start with what was shelved, follow\n\
             the clue it leaves, and you will end up reading a message that\n\
             nobody was meant to find."
            .to_string(),
    }
}

/// Render the overview document committed on the main branch.
pub fn render_summary() -> String {
    let mut out = String::from(
        "# Git Challenges\n\n\
         Each challenge lives on its own branch and teaches one recovery or\n\
         inspection skill. Check out a branch and read its hint file to begin.\n\n\
         | # | Challenge | Skill | Branch |\n\
         |---|-----------|-------|--------|\n",
    );
    for challenge in Challenge::ALL {
        out.push_str(&format!(
            "| {} | {} | {} | `{}` |\n",
            challenge.id(),
            challenge.title(),
            challenge.skill(),
            challenge.branch()
        ));
    }
    out.push_str("\nRun `gitquest --cleanup` to remove every challenge.\n");
    out
}
