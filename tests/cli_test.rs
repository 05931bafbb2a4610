//! CLI integration tests
//! Run with: cargo test --test cli_test

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bot() -> Command {
    let mut cmd = Command::cargo_bin("muntushop-bot").unwrap();
    cmd.env_remove("GREEN_ID_INSTANCE")
        .env_remove("GREEN_API_TOKEN_INSTANCE")
        .env_remove("GREEN_API_URL")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_version() {
    bot()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("muntushop-bot v"));
}

#[test]
fn test_init_config_has_no_credentials() {
    bot()
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("green-api:"))
        .stdout(predicate::str::contains("id-instance: null"))
        .stdout(predicate::str::contains("api-token-instance: null"));
}

#[test]
fn test_run_without_credentials_fails() {
    let dir = TempDir::new().unwrap();
    bot()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing required field"));
}

#[test]
fn test_console_session() {
    let dir = TempDir::new().unwrap();
    bot()
        .current_dir(dir.path())
        .args(["run", "--console"])
        .write_stdin("store\nMENU\nhey\nwhat?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[BOT] 🛍️ *Shopping Service*"))
        .stdout(predicate::str::contains("[BOT] 👋 Welcome to *MuntuShop*, Customer!"))
        .stdout(predicate::str::contains("[BOT] 👋 Hello! Type 'start' to see our services!"))
        .stdout(predicate::str::contains("[BOT] 🤔 I didn't understand that."))
        .stdout(predicate::str::contains("Bot stopped. Goodbye!"));
}

#[test]
fn test_combine_docs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("README.md"), "# MuntuShop\n\nMulti-service platform.\n").unwrap();
    std::fs::create_dir(dir.path().join("backend")).unwrap();
    std::fs::write(dir.path().join("backend/README.md"), "Backend notes").unwrap();

    bot()
        .current_dir(dir.path())
        .arg("combine-docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Created COMPLETE-DOCUMENTATION.md"))
        .stdout(predicate::str::contains("Files combined: 2"));

    let combined = std::fs::read_to_string(dir.path().join("COMPLETE-DOCUMENTATION.md")).unwrap();
    assert!(combined.starts_with("# 📚 MuntuShop Platform - Complete Documentation\n"));
    assert!(combined.contains("- [8. Database, API & Deployment](#8-database,-api--deployment)"));
    assert!(combined.contains("# 1. Project Overview\n\n*Source: `README.md`*\n\n---\n\nMulti-service platform."));
    assert!(combined.contains("# 27. Backend README"));
    assert!(!combined.contains("# 2. Build Summary\n"));
    assert!(combined.contains("*Combined from 2 markdown files*"));
}

#[test]
fn test_combine_docs_with_manifest() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.md"), "alpha").unwrap();
    std::fs::write(dir.path().join("docs.yaml"), "- title: A & B\n  path: a.md\n").unwrap();

    bot()
        .current_dir(dir.path())
        .args(["combine-docs", "--manifest", "docs.yaml", "--output", "out.md"])
        .assert()
        .success();

    let combined = std::fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(combined.contains("- [A & B](#a--b)"));
    assert!(combined.contains("alpha"));
}

#[test]
fn test_combine_docs_bad_manifest_fails() {
    let dir = TempDir::new().unwrap();
    bot()
        .current_dir(dir.path())
        .args(["combine-docs", "--manifest", "missing.yaml"])
        .assert()
        .failure();
}
