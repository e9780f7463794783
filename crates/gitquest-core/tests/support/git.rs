use std::path::Path;
use std::process::Command;

const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

pub fn git_command() -> Command {
    let mut cmd = Command::new("git");
    for key in GIT_ENV_OVERRIDES {
        cmd.env_remove(key);
    }
    cmd
}

/// Run git in `root`, panicking on failure, and return stdout.
pub fn git(root: &Path, args: &[&str]) -> String {
    let output = git_command()
        .args(args)
        .current_dir(root)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Run git in `root` and report whether it exited successfully.
pub fn git_succeeds(root: &Path, args: &[&str]) -> bool {
    git_command()
        .args(args)
        .current_dir(root)
        .output()
        .unwrap()
        .status
        .success()
}
