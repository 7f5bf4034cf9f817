//! Integration tests for the `qbitctl` binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! config handling, and error paths — all without a live daemon. The only
//! network touch is a connection-refused probe against a closed local port.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `qbitctl` binary with env isolation.
///
/// Clears all `QBIT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn qbitctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("qbitctl");
    cmd.env("HOME", "/tmp/qbitctl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/qbitctl-cli-test-nonexistent")
        .env_remove("QBIT_HOST")
        .env_remove("QBIT_PORT")
        .env_remove("QBIT_HTTPS")
        .env_remove("QBIT_USERNAME")
        .env_remove("QBIT_PASSWORD")
        .env_remove("QBIT_OUTPUT")
        .env_remove("QBIT_INSECURE")
        .env_remove("QBIT_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = qbitctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    qbitctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("magnet")
            .and(predicate::str::contains("add"))
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("pause-all")),
    );
}

#[test]
fn test_version_flag() {
    qbitctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qbitctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    qbitctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_rejects_unknown_shell() {
    qbitctl_cmd()
        .args(["completions", "dos"])
        .assert()
        .failure();
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_prints_a_path() {
    qbitctl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qbitctl"));
}

#[test]
fn test_config_show_defaults_to_toml() {
    qbitctl_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[connection]")
                .and(predicate::str::contains("port = 8080"))
                .and(predicate::str::contains("timeout_secs = 30")),
        );
}

#[test]
fn test_config_show_json() {
    qbitctl_cmd()
        .args(["config", "show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hostname\""));
}

// ── Unconfigured / validation errors ────────────────────────────────

#[test]
fn test_daemon_command_without_config_is_usage_error() {
    let output = qbitctl_cmd().arg("probe").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No daemon configured"),
        "expected config hint, got:\n{text}"
    );
}

#[test]
fn test_add_requires_a_magnet_argument() {
    let output = qbitctl_cmd().arg("add").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_add_rejects_non_magnet_uri() {
    let output = qbitctl_cmd()
        .args([
            "--host",
            "localhost",
            "add",
            "https://example.com/file.torrent",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("Not a usable magnet link"),
        "expected magnet validation error, got:\n{text}"
    );
}

#[test]
fn test_add_rejects_magnet_without_hash() {
    let output = qbitctl_cmd()
        .args(["--host", "localhost", "add", "magnet:?dn=nameless"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

// ── Connection errors ───────────────────────────────────────────────

#[test]
fn test_probe_connection_refused_maps_to_connection_exit_code() {
    // Port 1 on loopback: nothing listens there.
    let output = qbitctl_cmd()
        .args(["--host", "127.0.0.1", "--port", "1", "--timeout", "5", "probe"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7), "expected connection exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("Could not reach the daemon"),
        "expected connection diagnostic, got:\n{text}"
    );
}

// ── Non-interactive safety ──────────────────────────────────────────

#[test]
fn test_pause_all_without_yes_refuses_when_not_a_terminal() {
    let output = qbitctl_cmd()
        .args(["--host", "127.0.0.1", "--port", "1", "pause-all"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("requires confirmation"),
        "expected confirmation hint, got:\n{text}"
    );
}

#[test]
fn test_pause_all_with_yes_reaches_the_daemon() {
    // -y skips the confirmation prompt; the closed port then fails the
    // call with the connection exit code, proving the request was sent.
    let output = qbitctl_cmd()
        .args([
            "--host", "127.0.0.1", "--port", "1", "--timeout", "5", "-y", "pause-all",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7), "expected connection exit code");
}
