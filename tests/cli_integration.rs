//! End-to-end tests for the chatview binary

use assert_cmd::Command;
use predicates::prelude::*;

mod common;
use common::{temp_config_file, ClaudeDir};

/// Command with the environment cleared of overrides and a neutral config file
fn chatview(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("chatview").unwrap();
    cmd.env_remove("CLAUDE_CONFIG_DIR")
        .env_remove("CHATVIEW_CLAUDE_DIR")
        .env_remove("CHATVIEW_OUTPUT_DIR")
        .env_remove("CHATVIEW_PORT")
        .env_remove("CHATVIEW_HOST")
        .env_remove("CHATVIEW_LIMIT")
        .arg("--config")
        .arg(config_path);
    cmd
}

#[test]
fn test_list_prints_sessions() {
    let claude = ClaudeDir::new();
    claude.conversation("-w-api", "abcdef0123", "/w/api", 4);
    claude.conversation("-w-web", "9876543210", "/w/web", 2);
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--list")
        .arg("--claude-dir")
        .arg(claude.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("abcdef01"))
        .stdout(predicate::str::contains("/w/web"))
        .stdout(predicate::str::contains("Total: 2 sessions"));
}

#[test]
fn test_list_reports_total_beyond_limit() {
    let claude = ClaudeDir::new();
    for id in ["one", "two", "three"] {
        claude.conversation("-w", id, "/w", 2);
    }
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--list")
        .arg("--claude-dir")
        .arg(claude.path())
        .arg("-n")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 2 of 3 sessions"));
}

#[test]
fn test_generate_writes_site() {
    let claude = ClaudeDir::new();
    claude.conversation("-w", "s-one", "/w", 2);
    claude.conversation("-w", "s-two", "/w", 2);
    let out = tempfile::TempDir::new().unwrap();
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--claude-dir")
        .arg(claude.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 session files"));

    assert!(out.path().join("index.html").exists());
    assert!(out.path().join("s-one.html").exists());
    assert!(out.path().join("s-two.html").exists());
}

#[test]
fn test_missing_claude_dir_fails() {
    let claude = ClaudeDir::new();
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--list")
        .arg("--claude-dir")
        .arg(claude.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_unmatched_session_fails() {
    let claude = ClaudeDir::new();
    claude.conversation("-w", "abc", "/w", 2);
    let out = tempfile::TempDir::new().unwrap();
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--claude-dir")
        .arg(claude.path())
        .arg("-o")
        .arg(out.path())
        .arg("-s")
        .arg("zzz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No session found matching"));
}

#[test]
fn test_serve_conflicts_with_list() {
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--serve")
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_zero_limit_rejected() {
    let claude = ClaudeDir::new();
    let (_cfg_dir, cfg) = temp_config_file("limit: 50\n");

    chatview(&cfg)
        .arg("--list")
        .arg("--claude-dir")
        .arg(claude.path())
        .arg("-n")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be greater than 0"));
}

#[test]
fn test_invalid_config_file_rejected() {
    let claude = ClaudeDir::new();
    let (_cfg_dir, cfg) = temp_config_file("port: 0\n");

    chatview(&cfg)
        .arg("--list")
        .arg("--claude-dir")
        .arg(claude.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("port must be greater than 0"));
}
