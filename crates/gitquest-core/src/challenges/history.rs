//! Challenges read straight out of history: tags (2), bisect (3),
//! secrets (7) and branches (8).

use super::hints::HintFacts;
use super::{APP_FILE, Challenge, Stage};

pub(super) const TAG_V0_9: &str = "ch02-v0.9";
pub(super) const TAG_V1_0: &str = "ch02-v1.0";
pub(super) const TAG_V1_1_RC: &str = "ch02-v1.1-rc";

pub(super) const GOOD_TAG: &str = "ch03-good";
pub const CHECK_SCRIPT: &str = "tests/check_total.sh";

pub const ENV_FILE: &str = ".env";
pub(super) const GITIGNORE: &str = ".gitignore";

pub(super) const LOGIN_BRANCH: &str = "ch08-feature-login";
pub(super) const SEARCH_BRANCH: &str = "ch08-feature-search";
pub(super) const ARCHIVE_BRANCH: &str = "ch08-archive-2019";
pub const LOGIN_NOTES: &str = "branches/feature-login.txt";
pub const SEARCH_NOTES: &str = "branches/feature-search.txt";
pub const ARCHIVE_NOTES: &str = "branches/archive-2019.txt";

const CHECK_SCRIPT_BODY: &str = "#!/bin/sh\n\
# Exits 0 while calculate_total is correct.\n\
grep -q \"return sum(prices)$\" src/app.py\n";

const GOOD_TOTAL: &str = "return sum(prices)\n";
const BAD_TOTAL: &str = "return sum(prices) + 1\n";

/// Helpers committed after the known-good commit, in order.
const PRICING_HELPERS: [(&str, &str, &str); 8] = [
    ("format_price(value)", "return f\"${value:.2f}\"", "Add price formatter"),
    ("apply_discount(value, percent)", "return value * (100 - percent) / 100", "Add discount helper"),
    ("apply_tax(value, rate)", "return value * (1 + rate)", "Add tax helper"),
    ("round_price(value)", "return round(value, 2)", "Add rounding helper"),
    ("price_range(prices)", "return (min(prices), max(prices))", "Refactor pricing helpers"),
    ("average_price(prices)", "return calculate_total(prices) / len(prices)", "Add average price"),
    ("is_free(value)", "return value == 0", "Add free item check"),
    ("currency_code()", "return \"USD\"", "Add currency code"),
];

/// Index into [`PRICING_HELPERS`] of the commit that breaks the total.
const REGRESSION_INDEX: usize = 4;

pub(super) fn build_tags(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Tags.branch())?;
    let repo = stage.repo();

    stage.set_config("version", "0.9")?;
    stage.add_function("version", "return \"0.9\"")?;
    stage.commit("Prepare 0.9 release")?;
    repo.tag_lightweight(TAG_V0_9, None)?;

    stage.set_config("version", "1.0")?;
    stage.replace(APP_FILE, "return \"0.9\"", "return \"1.0\"")?;
    stage.commit("Release 1.0")?;
    repo.tag_annotated(
        TAG_V1_0,
        &format!("Release 1.0\n\n{}", Challenge::Tags.flag()),
        None,
    )?;

    stage.set_config("version", "1.1-rc1")?;
    stage.replace(APP_FILE, "return \"1.0\"", "return \"1.1-rc1\"")?;
    stage.commit("Start 1.1 release candidate")?;
    repo.tag_annotated(TAG_V1_1_RC, "Release candidate 1.1", None)?;

    Ok(HintFacts::default())
}

pub(super) fn build_bisect(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Bisect.branch())?;

    stage.add_definition("calculate_total(prices)", GOOD_TOTAL.trim_end())?;
    stage.write(CHECK_SCRIPT, CHECK_SCRIPT_BODY)?;
    stage.commit("Add order total calculation")?;
    stage.repo().tag_lightweight(GOOD_TAG, None)?;

    for (index, (signature, body, message)) in PRICING_HELPERS.iter().enumerate() {
        stage.add_definition(signature, body)?;
        if index == REGRESSION_INDEX {
            stage.replace(APP_FILE, GOOD_TOTAL, BAD_TOTAL)?;
            stage.commit(&format!("{} {}", message, Challenge::Bisect.flag()))?;
        } else {
            stage.commit(message)?;
        }
    }

    Ok(HintFacts::default())
}

pub(super) fn build_secrets(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    stage.start(Challenge::Secrets.branch())?;

    stage.set_config("database_url", "postgres://localhost/app")?;
    stage.commit("Add database settings")?;

    stage.write(
        ENV_FILE,
        &format!("API_KEY={}\nDEBUG=true\n", Challenge::Secrets.flag()),
    )?;
    stage.commit("Add local environment")?;

    stage.repo().remove_path(ENV_FILE)?;
    stage.append(GITIGNORE, ".env\n")?;
    stage.commit("Remove env file and ignore it")?;

    Ok(HintFacts::default())
}

pub(super) fn build_branches(stage: &mut Stage<'_, '_>) -> anyhow::Result<HintFacts> {
    let branch = Challenge::Branches.branch();
    stage.start(branch)?;

    stage.add_function("search_index", "return {}")?;
    stage.commit("Add search index")?;

    let archive_message = format!("Archive legacy importer {}", Challenge::Branches.flag());
    let side_branches = [
        (
            LOGIN_BRANCH,
            LOGIN_NOTES,
            "Login form with remember-me checkbox.\n",
            "Start login feature",
        ),
        (
            SEARCH_BRANCH,
            SEARCH_NOTES,
            "Full-text search over product names.\n",
            "Start search feature",
        ),
        (
            ARCHIVE_BRANCH,
            ARCHIVE_NOTES,
            "Legacy CSV importer, retired in 2019.\n",
            archive_message.as_str(),
        ),
    ];
    for (side, notes, content, message) in side_branches {
        stage.repo().checkout(branch)?;
        stage.fork(side)?;
        stage.write(notes, content)?;
        stage.commit(message)?;
    }
    stage.repo().checkout(branch)?;

    Ok(HintFacts::default())
}
