mod support;

use git2::Repository;
use tempfile::TempDir;

use gitquest_core::builder::ScenarioBuilder;
use gitquest_core::challenges::{
    Challenge, ChallengeSelection, DECODER_PATCH, TOKEN_FILE, TOKEN_PATCH,
};
use gitquest_core::cleanup::{CLEANUP_COMMIT_MESSAGE, cleanup_files};
use gitquest_core::config::QuestConfig;
use gitquest_core::guard::AssumeNo;

use support::{
    branches, builder, file_at, git, init_repo, patch_available, stash_subjects, tags,
};

#[test]
fn cleanup_after_build_removes_everything() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let builder = builder(temp.path());
    builder
        .build(
            &ChallengeSelection::parse("1,2,3,4,6,7,8,9,10,11,12").unwrap(),
            &mut AssumeNo,
        )
        .unwrap();
    git(temp.path(), &["checkout", "--quiet", "challenge-02-tags"]);

    let report = builder.cleanup().unwrap();

    assert_eq!(report.deleted_branches.len(), 15);
    assert_eq!(report.deleted_tags.len(), 6);
    assert_eq!(report.dropped_stashes, 2);
    assert_eq!(report.removed_files, vec!["CHALLENGES.md".to_string()]);
    assert!(report.commit.is_some());

    assert_eq!(
        branches(temp.path()).into_iter().collect::<Vec<_>>(),
        vec!["main".to_string()]
    );
    assert!(tags(temp.path()).is_empty());
    assert!(stash_subjects(temp.path()).is_empty());

    let repo = Repository::open(temp.path()).unwrap();
    for path in cleanup_files(&QuestConfig::default()) {
        assert!(file_at(&repo, "main", &path).is_none(), "{path} survived");
    }
    assert_eq!(file_at(&repo, "main", "README.md").unwrap(), "# playground\n");
    assert_eq!(
        git(temp.path(), &["log", "-1", "--format=%s"]).trim(),
        CLEANUP_COMMIT_MESSAGE
    );
    assert_eq!(git(temp.path(), &["symbolic-ref", "--short", "HEAD"]).trim(), "main");
    assert!(git(temp.path(), &["status", "--porcelain"]).is_empty());
}

#[test]
fn cleanup_on_pristine_repo_changes_nothing() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let head = git(temp.path(), &["rev-parse", "HEAD"]);

    let report = builder(temp.path()).cleanup().unwrap();

    assert!(report.is_empty());
    assert!(report.commit.is_none());
    assert_eq!(git(temp.path(), &["rev-parse", "HEAD"]), head);
}

#[test]
fn cleanup_twice_is_idempotent() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let builder = builder(temp.path());
    builder
        .build(&ChallengeSelection::parse("2,12").unwrap(), &mut AssumeNo)
        .unwrap();

    let first = builder.cleanup().unwrap();
    assert!(!first.is_empty());
    let head = git(temp.path(), &["rev-parse", "HEAD"]);

    let second = builder.cleanup().unwrap();
    assert!(second.is_empty());
    assert_eq!(git(temp.path(), &["rev-parse", "HEAD"]), head);
}

#[test]
fn cleanup_keeps_unrelated_branches_and_tags() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    git(temp.path(), &["branch", "feature/keep-me"]);
    git(temp.path(), &["tag", "v1.0.0"]);

    builder(temp.path())
        .build(&ChallengeSelection::parse("2").unwrap(), &mut AssumeNo)
        .unwrap();
    builder(temp.path()).cleanup().unwrap();

    assert!(branches(temp.path()).contains("feature/keep-me"));
    assert!(tags(temp.path()).contains("v1.0.0"));
}

#[test]
fn cleanup_after_full_build_leaves_main_clean() {
    if !patch_available() {
        eprintln!("skipping: `patch` is not installed");
        return;
    }
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let builder = ScenarioBuilder::new(temp.path(), QuestConfig::default());
    builder
        .build(&ChallengeSelection::all(), &mut AssumeNo)
        .unwrap();
    git(temp.path(), &["checkout", "--quiet", Challenge::Patch.branch()]);
    assert!(temp.path().join(TOKEN_FILE).is_file());

    let report = builder.cleanup().unwrap();

    let expected_branches: usize = Challenge::ALL.iter().map(|c| c.branches().len()).sum();
    assert_eq!(report.deleted_branches.len(), expected_branches);
    assert_eq!(report.deleted_tags.len(), 6);
    assert_eq!(report.dropped_stashes, 2);
    assert_eq!(
        branches(temp.path()).into_iter().collect::<Vec<_>>(),
        vec!["main".to_string()]
    );
    for path in [TOKEN_FILE, DECODER_PATCH, TOKEN_PATCH] {
        assert!(!temp.path().join(path).exists(), "{path} survived");
    }
    assert!(git(temp.path(), &["status", "--porcelain", "--ignored"]).is_empty());
}
