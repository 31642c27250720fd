//! Integration tests for the `smbulk` CLI binary.
//!
//! Argument parsing, help output, completions and the field catalog need
//! no server. Interactive runs are driven through piped stdin against a
//! wiremock Security Manager.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `smbulk` binary with env isolation.
///
/// Clears all `SMBULK_*` env vars and points the config file at `config`
/// so tests never touch the user's real configuration.
fn smbulk_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("smbulk");
    cmd.env("SMBULK_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("SMBULK_PROFILE")
        .env_remove("SMBULK_HOST")
        .env_remove("SMBULK_USERNAME")
        .env_remove("SMBULK_VERIFY_TLS")
        .env_remove("SMBULK_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn api(suffix: &str) -> String {
    format!("/securitymanager/api/{suffix}")
}

/// Mount a server with one device pack holding one device.
async fn single_device_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("authentication/validate")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "authStatus": "AUTHORIZED" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("plugin/list/DEVICE_PACK.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "results": [{ "id": 42, "vendor": "Check Point", "deviceName": "R80" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("domain/1/device/filter")))
        .and(query_param("pageSize", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 1 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("domain/1/device/filter")))
        .and(query_param("pageSize", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "results": [{ "id": 1, "name": "fw-1", "extendedSettingsJson": {} }]
        })))
        .mount(&server)
        .await;

    server
}

/// Run the binary on a blocking thread so the mock server keeps serving.
async fn run_piped(config: &Path, args: Vec<String>, stdin: &str) -> std::process::Output {
    let config = config.to_path_buf();
    let stdin = stdin.to_owned();
    tokio::task::spawn_blocking(move || {
        smbulk_cmd(&config)
            .args(args)
            .write_stdin(stdin)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn host_args(server: &MockServer) -> Vec<String> {
    vec![
        "--host".into(),
        server.uri(),
        "--username".into(),
        "admin".into(),
    ]
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Security Manager")
                .and(predicate::str::contains("fields"))
                .and(predicate::str::contains("config"))
                .and(predicate::str::contains("--verify-tls")),
        );
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("smbulk"));
}

#[test]
fn test_invalid_subcommand_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .arg("foobar")
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef smbulk"));
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Field catalog ───────────────────────────────────────────────────

#[test]
fn test_fields_plain_lists_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let output = smbulk_cmd(&dir.path().join("config.toml"))
        .args(["fields", "--output", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<_> = stdout.lines().collect();
    assert_eq!(names.len(), 55);
    assert_eq!(names[0], "access_key");
    assert_eq!(names[20], "limitRegions");
    assert_eq!(names[54], "versionSshFallback");
}

#[test]
fn test_fields_json_carries_kinds_and_hints() {
    let dir = tempfile::tempdir().unwrap();
    let output = smbulk_cmd(&dir.path().join("config.toml"))
        .args(["fields", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(fields.len(), 55);
    assert_eq!(fields[20]["number"], 21);
    assert_eq!(fields[20]["kind"], "string_array");
    assert_eq!(fields[32]["name"], "retrievalMethod");
    assert_eq!(fields[32]["hint"]["options"], json!(["FromDevice", "FromServer"]));
}

#[test]
fn test_fields_table() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .arg("fields")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("serverCertSecurity")
                .and(predicate::str::contains("VERIFY_HOSTNAME"))
                .and(predicate::str::contains("true/false")),
        );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    smbulk_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_show_prints_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[profiles.default]\nhost = \"fm.example.com\"\nusername = \"analyst\"\n",
    )
    .unwrap();

    smbulk_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("fm.example.com")
                .and(predicate::str::contains("analyst"))
                .and(predicate::str::contains("password").not()),
        );
}

#[test]
fn test_unknown_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .args(["--profile", "missing"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_zero_timeout_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    smbulk_cmd(&dir.path().join("config.toml"))
        .args(["--timeout", "0", "run"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));
}

// ── Interactive runs ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_piped_run_updates_device() {
    let server = single_device_server().await;
    Mock::given(method("PUT"))
        .and(path(api("domain/1/device/1")))
        .and(query_param("manualRetrieval", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = run_piped(
        &dir.path().join("config.toml"),
        host_args(&server),
        "s3cret\n1\n42\n44\ntrue\ny\n",
    )
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout:\n{stdout}");
    assert!(stdout.contains("Authenticated successfully."));
    assert!(stdout.contains("Check Point - R80 (ID: 42)"));
    assert!(stdout.contains("skipRoute: true"));
    assert!(stdout.contains("There are a total of 1 devices that will be updated."));
    assert!(stdout.contains("Successfully updated settings for fw-1 (ID: 1) - Status code: 200"));
    assert!(stdout.contains("Updated 1 of 1 devices (0 failed, 0 skipped)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_piped_run_cancel_exits_zero() {
    let server = single_device_server().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = run_piped(
        &dir.path().join("config.toml"),
        host_args(&server),
        "s3cret\n1\n42\n44\ntrue\nn\n",
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Operation cancelled."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("authentication/validate")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = run_piped(&dir.path().join("config.toml"), host_args(&server), "wrong\n").await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(
        "Authentication failed. Please check your username and/or password and try again."
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_target_choice_exits_one() {
    let server = single_device_server().await;

    let dir = tempfile::tempdir().unwrap();
    let output = run_piped(
        &dir.path().join("config.toml"),
        host_args(&server),
        "s3cret\n9\n",
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid choice"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_server_exits_seven() {
    let dir = tempfile::tempdir().unwrap();
    let args = vec![
        "--host".into(),
        "http://127.0.0.1:9".into(),
        "--username".into(),
        "admin".into(),
    ];
    let output = run_piped(&dir.path().join("config.toml"), args, "s3cret\n").await;

    assert_eq!(output.status.code(), Some(7));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not connect"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stdin_closing_early_fails_cleanly() {
    let server = single_device_server().await;

    let dir = tempfile::tempdir().unwrap();
    let output = run_piped(
        &dir.path().join("config.toml"),
        host_args(&server),
        "s3cret\n1\n",
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Console input failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prompts_for_host_when_not_given() {
    let server = single_device_server().await;

    let dir = tempfile::tempdir().unwrap();
    let stdin = format!("{}\nadmin\ns3cret\n", server.uri());
    let output = run_piped(&dir.path().join("config.toml"), Vec::new(), &stdin).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FireMon app server IP or FQDN (default: localhost): "));
    assert!(stdout.contains("Authenticated successfully."));
    // Input runs out at the target menu.
    assert_eq!(output.status.code(), Some(1));
}
