//! CLI end-to-end tests that invoke the compiled `ca-watcher` binary.
//!
//! These tests use `env!("CARGO_BIN_EXE_ca-watcher")` to locate the binary and
//! `std::process::Command` to run it against temporary directories. Every
//! invocation clears the watcher's environment variables so the host
//! environment cannot leak in.

use std::fs;
use std::process::{Command, Output};

use ca_test_utils::dirs::TestDirs;

const WATCHER_ENV: [&str; 4] = [
    "TRUSTEDCASRCDIR",
    "TRUSTEDCADESTDIR",
    "CA_WATCHER_INTERVAL_SECS",
    "CA_WATCHER_CONFIG",
];

fn watcher_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ca-watcher"));
    for var in WATCHER_ENV {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn run_once(dirs: &TestDirs, extra: &[&str]) -> Output {
    watcher_cmd()
        .arg("--source-dir")
        .arg(dirs.source())
        .arg("--dest-dir")
        .arg(dirs.dest())
        .arg("--once")
        .args(extra)
        .output()
        .expect("failed to execute ca-watcher binary")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn test_help_exits_zero() {
    let out = watcher_cmd()
        .arg("--help")
        .output()
        .expect("failed to run ca-watcher --help");

    assert!(out.status.success(), "ca-watcher --help should exit 0");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("--source-dir") && stdout.contains("TRUSTEDCASRCDIR"),
        "help output should document the source directory, got:\n{}",
        stdout
    );
}

#[test]
fn test_version_flag() {
    let out = watcher_cmd()
        .arg("--version")
        .output()
        .expect("failed to run ca-watcher --version");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {}", stdout);
}

#[test]
fn test_once_copies_source_files() {
    let dirs = TestDirs::new();
    dirs.write_source("ca1.crt", "one");
    dirs.write_source("ca2.crt", "two");

    let out = run_once(&dirs, &[]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let names = dirs.dest_names();
    assert_eq!(names.len(), 2, "dest: {:?}", names);
    assert!(names[0].ends_with("ca1.crt"));
    assert!(names[1].ends_with("ca2.crt"));
    assert_eq!(dirs.read_dest(&names[0]), "one");

    let tag = &names[0][..14];
    assert!(tag.bytes().all(|b| b.is_ascii_digit()));
    dirs.assert_dest_all_tagged(tag);
}

#[test]
fn test_second_run_is_skipped_when_unchanged() {
    let dirs = TestDirs::new();
    dirs.write_source("ca1.crt", "one");

    assert!(run_once(&dirs, &[]).status.success());
    let first = dirs.dest_names();

    let out = run_once(&dirs, &["--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["outcome"]["status"], "skipped");
    assert_eq!(dirs.dest_names(), first);
}

#[test]
fn test_changed_source_replaces_previous_generation() {
    let dirs = TestDirs::new();
    dirs.write_source("ca1.crt", "one");
    assert!(run_once(&dirs, &[]).status.success());
    let first = dirs.dest_names();

    dirs.write_source("ca1.crt", "rotated");
    let out = run_once(&dirs, &["--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["outcome"]["status"], "completed");
    assert_eq!(report["outcome"]["prune"]["removed"][0], first[0].as_str());

    let names = dirs.dest_names();
    assert_eq!(names.len(), 1);
    assert!(names[0] > first[0], "{} should sort after {}", names[0], first[0]);
    assert_eq!(dirs.read_dest(&names[0]), "rotated");
}

#[test]
fn test_json_requires_once() {
    let out = watcher_cmd()
        .args(["--source-dir", "/a", "--dest-dir", "/b", "--json"])
        .output()
        .unwrap();

    assert!(!out.status.success());
}

#[test]
fn test_missing_source_dir_is_an_error() {
    let dirs = TestDirs::new();

    let out = watcher_cmd()
        .arg("--dest-dir")
        .arg(dirs.dest())
        .arg("--once")
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(stderr(&out).contains("TRUSTEDCASRCDIR"), "stderr: {}", stderr(&out));
}

#[test]
fn test_same_directories_are_rejected() {
    let dirs = TestDirs::new();

    let out = watcher_cmd()
        .arg("--source-dir")
        .arg(dirs.source())
        .arg("--dest-dir")
        .arg(dirs.source())
        .arg("--once")
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(stderr(&out).contains("error"), "stderr: {}", stderr(&out));
}

#[test]
fn test_environment_supplies_directories() {
    let dirs = TestDirs::new();
    dirs.write_source("root.pem", "pem");

    let out = watcher_cmd()
        .env("TRUSTEDCASRCDIR", dirs.source())
        .env("TRUSTEDCADESTDIR", dirs.dest())
        .arg("--once")
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(dirs.dest_names().len(), 1);
}

#[test]
fn test_config_file_supplies_directories() {
    let dirs = TestDirs::new();
    dirs.write_source("root.pem", "pem");
    let config = dirs.root().join("watcher.toml");
    fs::write(
        &config,
        format!(
            "[watcher]\nsource_dir = {:?}\ndest_dir = {:?}\n",
            dirs.source().display().to_string(),
            dirs.dest().display().to_string()
        ),
    )
    .unwrap();

    let out = watcher_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--once")
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let names = dirs.dest_names();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("root.pem"), "dest: {:?}", names);
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dirs = TestDirs::new();
    let config = dirs.root().join("watcher.toml");
    fs::write(&config, "[watcher]\nunknown = 1\n").unwrap();

    let out = watcher_cmd().arg("--config").arg(&config).arg("--once").output().unwrap();

    assert!(!out.status.success());
    assert!(stderr(&out).contains("watcher.toml"), "stderr: {}", stderr(&out));
}
