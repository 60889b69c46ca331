//! CLI Integration Tests
//!
//! Runs the flockbook binary directly with assert_cmd.

// Skipped in coverage builds
#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn flockbook() -> Command {
    Command::cargo_bin("flockbook").unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    flockbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("flockbook"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    flockbook()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flockbook"));
}

#[test]
fn test_generate_help_lists_flags() {
    flockbook()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--employees"))
        .stdout(predicate::str::contains("--passes"));
}

// ═══════════════════════════════════════════════════════════════════════════
// GENERATE / VERIFY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_generate_and_verify() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("statements.xlsx");

    flockbook()
        .args(["generate", "--seed", "42", "--employees", "8", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workbook written"));
    assert!(output.exists());

    flockbook()
        .arg("verify")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Business Analysis"))
        .stdout(predicate::str::contains("No dangling references"));
}

#[test]
fn test_verify_json() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("statements.xlsx");
    flockbook()
        .args(["generate", "--seed", "1", "--employees", "3", "-o"])
        .arg(&output)
        .assert()
        .success();

    let assert = flockbook()
        .args(["verify", "--json"])
        .arg(&output)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["dangling"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_generate_save_failure_hint() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing").join("statements.xlsx");

    flockbook()
        .args(["generate", "--seed", "1", "--employees", "3", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("open in another program"))
        .stderr(predicate::str::contains("statements.xlsx"));
}

#[test]
fn test_generate_rejects_zero_employees() {
    flockbook()
        .args(["generate", "--employees", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("employees must be at least 1"));
}

#[test]
fn test_generate_rejects_single_pass() {
    flockbook()
        .args(["generate", "--passes", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_passes must be at least 2"));
}

#[test]
fn test_verify_missing_file_fails() {
    flockbook()
        .args(["verify", "/nonexistent/statements.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));
}

// ═══════════════════════════════════════════════════════════════════════════
// AUDIT / INIT-CONFIG
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_audit_shows_statement_cycle() {
    flockbook()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Evaluation order"))
        .stdout(predicate::str::contains("Cash Flows"))
        .stdout(predicate::str::contains("Pending references per pass"));
}

#[test]
fn test_init_config_then_generate_with_it() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("flockbook.yaml");
    let output = dir.path().join("from-config.xlsx");

    flockbook()
        .arg("init-config")
        .arg(&config)
        .assert()
        .success();
    let yaml = std::fs::read_to_string(&config).unwrap();
    assert!(yaml.contains("company_name"));
    assert!(yaml.contains("max_passes: 20"));

    flockbook().arg("init-config").arg(&config).assert().failure();

    flockbook()
        .args(["generate", "--employees", "4", "-c"])
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}
