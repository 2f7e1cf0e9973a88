//! Integration tests for top-level CLI behavior.

#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};

use buildlinks::journal::Journal;

fn run_buildlinks(home: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_buildlinks");
    Command::new(bin)
        .args(args)
        .current_dir(home)
        .env("BUILDLINKS_HOME", home)
        .env_remove("BUILDLINKS_BUILDS_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run buildlinks binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn start_complete_status_delete() {
    let home = tempfile::tempdir().unwrap();

    let output = run_buildlinks(home.path(), &["start", "folder/p"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output).trim(), "1");

    let output = run_buildlinks(home.path(), &["complete", "folder/p", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("#1 success"));

    let root = home.path().join("jobs/folder/jobs/p");
    let log = std::fs::read_to_string(root.join("lastStable/log")).unwrap();
    assert!(log.contains("Build #1\n"));

    let output = run_buildlinks(home.path(), &["status", "folder/p"]);
    let text = stdout(&output);
    assert!(output.status.success());
    let row = text.lines().find(|l| l.starts_with("lastSuccessfulBuild")).unwrap();
    assert_eq!(row.split_whitespace().collect::<Vec<_>>(), vec!["lastSuccessfulBuild", "1", "1"]);

    let output = run_buildlinks(home.path(), &["delete", "folder/p", "1"]);
    assert!(output.status.success());
    assert!(!root.join("lastStable").exists());
}

#[test]
fn refresh_reports_up_to_date_links() {
    let home = tempfile::tempdir().unwrap();
    run_buildlinks(home.path(), &["start", "p"]);
    run_buildlinks(home.path(), &["complete", "p", "1", "--result", "unstable"]);

    let output = run_buildlinks(home.path(), &["refresh", "p"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0 relinked, 6 up to date, 0 failed."));
}

#[test]
fn refresh_of_unknown_job_is_a_no_op() {
    let home = tempfile::tempdir().unwrap();
    let output = run_buildlinks(home.path(), &["refresh", "ghost"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("nothing to refresh"));
}

#[test]
fn journal_is_written() {
    let home = tempfile::tempdir().unwrap();
    run_buildlinks(home.path(), &["start", "p"]);
    let journal = home.path().join("complete.journal.yaml");

    let output = run_buildlinks(
        home.path(),
        &["complete", "p", "1", "--journal", journal.to_str().unwrap()],
    );
    assert!(output.status.success());
    let journal: Journal = serde_yaml::from_str(&std::fs::read_to_string(&journal).unwrap()).unwrap();
    assert_eq!(journal.name, "complete");

    // Six permalinks, none on disk yet: each is removed (absent) then created.
    let writes: Vec<&str> = journal.mutations().map(|e| e.op.as_str()).collect();
    assert_eq!(writes.len(), 12);
    assert_eq!(writes.iter().filter(|op| **op == "create_symlink").count(), 6);
    assert!(journal.entries.iter().any(|e| e.op == "read_link"));
}

#[test]
fn completing_twice_fails() {
    let home = tempfile::tempdir().unwrap();
    run_buildlinks(home.path(), &["start", "p"]);
    assert!(run_buildlinks(home.path(), &["complete", "p", "1"]).status.success());

    let output = run_buildlinks(home.path(), &["complete", "p", "1", "--result", "failure"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already completed"));
}

#[test]
fn relocated_builds_dir_from_config_file() {
    let home = tempfile::tempdir().unwrap();
    let external = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("buildlinks.yaml"),
        format!("builds_dir: \"{}/${{ITEM_FULL_NAME}}\"\n", external.path().display()),
    )
    .unwrap();

    run_buildlinks(home.path(), &["start", "p"]);
    run_buildlinks(home.path(), &["complete", "p", "1"]);

    let legacy = home.path().join("jobs/p/lastStable");
    assert_eq!(std::fs::read_link(&legacy).unwrap(), external.path().join("p/lastStableBuild"));
    assert!(legacy.join("log").exists());
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let home = tempfile::tempdir().unwrap();
    let output = run_buildlinks(home.path(), &["nonsense"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized subcommand"));
}
