use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(temp: &Path, server_url: &str) -> PathBuf {
    let path = temp.join("config.yaml");
    let contents = format!("server_url: {server_url}\napi_key: gk-test-key\n");
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn guardop() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("guardop"));
    cmd.env_remove("GUARDOP_CONFIG")
        .env_remove("GUARDOP_FORMAT")
        .env_remove("GUARDOP_NO_CACHE")
        .env_remove("GUARDOP_DEBUG");
    cmd
}

#[test]
fn version_prints_crate_version() -> Result<(), Box<dyn std::error::Error>> {
    guardop()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("guardop version"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://guardian.example.com");

    let assert = guardop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("https://guardian.example.com"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    Ok(())
}

#[test]
fn status_without_config_reports_unconfigured() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("nope.yaml");

    guardop()
        .arg("status")
        .arg("--config")
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("guardop init"));
    Ok(())
}

#[test]
fn guide_step_falls_back_when_server_is_unreachable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // Nothing listens here; the guide must still render its default steps
    let config_path = write_config(temp.path(), "http://127.0.0.1:9");

    guardop()
        .arg("guide")
        .arg("--step")
        .arg("1")
        .arg("--no-cache")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to SSH Guardian"));
    Ok(())
}

#[test]
fn report_fails_cleanly_when_server_is_unreachable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://127.0.0.1:9");

    guardop()
        .arg("report")
        .arg("--no-cache")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report unavailable"));
    Ok(())
}

#[test]
fn networked_commands_require_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("nope.yaml");

    guardop()
        .arg("firewall")
        .arg("list")
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("guardop init"));
    Ok(())
}

#[test]
fn cache_path_prints_a_location() -> Result<(), Box<dyn std::error::Error>> {
    guardop()
        .arg("cache")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("guardop"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn firewall_list_renders_rules_from_server() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _firewall = server
        .mock("GET", "/api/v1/firewall")
        .with_status(200)
        .with_body(
            r#"{
                "success": true,
                "data": {
                    "enabled": true,
                    "rules": [
                        {"ip_address": "203.0.113.9", "action": "block", "reason": "ssh brute force"}
                    ]
                }
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = guardop()
        .arg("firewall")
        .arg("list")
        .arg("--no-cache")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("ENFORCING"));
    assert!(stdout.contains("203.0.113.9"));
    assert!(stdout.contains("BLOCK"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn notify_counts_tallies_history() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _notifications = server
        .mock("GET", "/api/v1/notifications")
        .with_status(200)
        .with_body(
            r#"{
                "success": true,
                "data": [
                    {"subject": "Brute force from 203.0.113.9", "message": "", "isSecurityAlert": true},
                    {"subject": "IP blocked", "message": "", "channels": ["email"]},
                    {"subject": "Weekly digest", "message": ""}
                ]
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = guardop()
        .arg("notify")
        .arg("counts")
        .arg("--no-cache")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("security: 1"));
    assert!(stdout.contains("blocking: 1"));
    assert!(stdout.contains("other:    1"));
    assert!(stdout.contains("total:    3"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn backend_failure_envelope_is_surfaced_not_rendered() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _firewall = server
        .mock("GET", "/api/v1/firewall")
        .with_status(200)
        .with_body(r#"{"success": false, "error": "firewall daemon offline"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    guardop()
        .arg("firewall")
        .arg("list")
        .arg("--no-cache")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("firewall daemon offline"));
    Ok(())
}
