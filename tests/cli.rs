// ABOUTME: Integration tests for the podremote binary.
// ABOUTME: Covers argument validation and setup failures; no engine is contacted.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// The binary with an empty config directory and no endpoint variables.
fn podremote(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("podremote"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("PODREMOTE_URL")
        .env_remove("PODREMOTE_SOCKET")
        .env_remove("PODREMOTE_RUNTIME")
        .env_remove("CONTAINER_HOST")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_the_verbs() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("pod"))
        .stdout(predicate::str::contains("logs"));
}

#[test]
fn targets_and_all_together_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .args(["kill", "--all", "web"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "You may give container(s) or use --all, but not both",
        ));
}

#[test]
fn missing_targets_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .arg("kill")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("You must give container(s) or use --all"));
}

#[test]
fn detach_with_rm_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .args(["run", "-d", "--rm", "alpine"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Incompatible options: --detach and --rm"));
}

#[test]
fn invalid_flag_values_exit_with_usage_status() {
    let home = tempfile::tempdir().unwrap();
    for argv in [
        &["kill", "--signal", "SIGNOPE", "web"][..],
        &["attach", "--detach-keys", "ctrl-1", "web"],
        &["stop", "--timeout", "0", "web"],
        &["commit", "--change", "FROM=alpine", "web"],
        &["run", "--memory", "12q", "alpine"],
    ] {
        podremote(&home).args(argv).assert().code(2);
    }
}

#[test]
fn bad_signal_message_names_the_value() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .args(["kill", "-s", "SIGNOPE", "web"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"SIGNOPE\" is not a valid signal"));
}

#[test]
fn missing_explicit_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.yml");
    podremote(&home)
        .arg("--config")
        .arg(&missing)
        .arg("info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn malformed_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("bad.yml");
    fs::write(&path, "timeout: soon\n").unwrap();

    podremote(&home)
        .arg("--config")
        .arg(&path)
        .arg("info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn ssh_url_is_rejected_before_connecting() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .args(["--url", "ssh://core@build", "info"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("runtime detection failed"));
}

#[test]
fn unreachable_socket_reports_the_endpoint() {
    let home = tempfile::tempdir().unwrap();
    let socket = home.path().join("absent.sock");
    podremote(&home)
        .arg("--socket")
        .arg(&socket)
        .arg("info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.sock"));
}

#[test]
fn json_mode_reports_setup_errors_as_json() {
    let home = tempfile::tempdir().unwrap();
    podremote(&home)
        .args(["--format", "json", "--url", "ssh://core@build", "info"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("{"));
}
