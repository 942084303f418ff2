//! Smoke tests for the testimania CLI
//!
//! These tests run the built binary end to end.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FIXTURES: &str = r#"{
    "acme": [
        {"content": "Great service", "client_name": "Ana", "rating": 5},
        {"content": "Quick delivery", "client_name": "Bo", "rating": 4},
        {"content": "<script>alert(1)</script>", "client_name": "Mallory"}
    ],
    "quiet": []
}"#;

/// Get a command for the testimania binary
fn testimania() -> Command {
    Command::cargo_bin("testimania").expect("testimania binary should exist")
}

fn fixtures(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("fixtures.json");
    fs::write(&path, FIXTURES).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    testimania()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    testimania()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("snippet"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_unknown_subcommand() {
    testimania().arg("frobnicate").assert().failure();
}

// ============================================================================
// Snippet
// ============================================================================

#[test]
fn test_snippet_to_stdout() {
    testimania()
        .args(["snippet", "--slug", "acme", "--layout", "carousel"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<div id=\"testimania-widget\"></div>",
        ))
        .stdout(predicate::str::contains("data-slug=\"acme\""))
        .stdout(predicate::str::contains("data-layout=\"carousel\""))
        .stdout(predicate::str::contains("defer></script>"));
}

#[test]
fn test_snippet_to_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("embed/snippet.html");
    testimania()
        .args(["snippet", "--slug", "acme", "-o"])
        .arg(&out)
        .assert()
        .success();
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("data-slug=\"acme\""));
}

#[test]
fn test_snippet_without_slug_fails() {
    testimania()
        .args(["snippet", "--layout", "grid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data-slug"));
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_render_page_from_fixtures() {
    let temp = TempDir::new().unwrap();
    testimania()
        .args(["render", "--slug", "acme", "--fixtures"])
        .arg(fixtures(&temp))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("Great service"))
        .stdout(predicate::str::contains("- Ana"))
        .stdout(predicate::str::contains("&lt;script&gt;"))
        .stdout(predicate::str::contains("<script>alert(1)</script>").not());
}

#[test]
fn test_render_fragment() {
    let temp = TempDir::new().unwrap();
    testimania()
        .args(["render", "--slug", "acme", "--fragment", "--max-items", "1"])
        .arg("--fixtures")
        .arg(fixtures(&temp))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div id=\"testimania-widget\""))
        .stdout(predicate::str::contains("Great service"))
        .stdout(predicate::str::contains("Quick delivery").not())
        .stdout(predicate::str::contains("<html").not());
}

#[test]
fn test_render_with_yaml_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("widget.yaml");
    fs::write(&config, "slug: acme\nlayout: grid\ntheme: dark\ngrid_columns: 2\n").unwrap();
    testimania()
        .args(["render", "--config"])
        .arg(&config)
        .arg("--fixtures")
        .arg(fixtures(&temp))
        .assert()
        .success()
        .stdout(predicate::str::contains("tm-layout-grid"))
        .stdout(predicate::str::contains("tm-theme-dark"))
        .stdout(predicate::str::contains("repeat(2, 1fr)"));
}

#[test]
fn test_render_missing_slug_fails() {
    let temp = TempDir::new().unwrap();
    testimania()
        .arg("render")
        .arg("--fixtures")
        .arg(fixtures(&temp))
        .assert()
        .failure()
        .stderr(predicate::str::contains("data-slug"));
}

#[test]
fn test_render_empty_collection() {
    let temp = TempDir::new().unwrap();
    testimania()
        .args(["render", "--slug", "quiet", "--fixtures"])
        .arg(fixtures(&temp))
        .assert()
        .success()
        .stdout(predicate::str::contains("No testimonials yet."));
}

#[test]
fn test_render_unreachable_api_renders_fallback() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    testimania()
        .args(["render", "--slug", "acme", "--timeout-ms", "500", "--api-base"])
        .arg(format!("http://127.0.0.1:{port}"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load testimonials."));
}

#[test]
fn test_render_to_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("site/preview.html");
    testimania()
        .args(["-q", "render", "--slug", "acme", "--title", "Acme reviews", "-o"])
        .arg(&out)
        .arg("--fixtures")
        .arg(fixtures(&temp))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("<title>Acme reviews</title>"));
    assert!(written.contains("Great service"));
}

#[test]
fn test_render_needs_a_source() {
    testimania()
        .args(["render", "--slug", "acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--fixtures or --api-base"));
}

// ============================================================================
// Serve
// ============================================================================

#[test]
fn test_serve_missing_fixtures_fails() {
    testimania()
        .args(["serve", "--fixtures", "/nonexistent/fixtures.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
