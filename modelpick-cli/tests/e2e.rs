//! End-to-end tests for the modelpick binary
//!
//! Gated behind the `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p modelpick-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run modelpick with config and preferences isolated under `dir`.
fn modelpick(dir: &Path, args: &[&str]) -> Output {
    let project = dir.join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(
        project.join("config.toml"),
        format!(
            "[selection]\nstorage_dir = {:?}\n",
            dir.join("prefs").display().to_string()
        ),
    )
    .unwrap();

    Command::new(env!("CARGO_BIN_EXE_modelpick"))
        .args(args)
        .env("MODELPICK_PROJECT_CONFIG_DIR", &project)
        .env("XDG_CONFIG_HOME", dir.join("xdg-config"))
        .env("XDG_DATA_HOME", dir.join("xdg-data"))
        .output()
        .expect("Failed to run modelpick")
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = modelpick(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pick an AI provider, API key and model"));
    assert!(stdout.contains("providers"));
    assert!(stdout.contains("--provider"));
}

#[test]
fn show_json_reports_defaults() {
    let dir = TempDir::new().unwrap();
    let output = modelpick(dir.path(), &["show", "--json", "--ephemeral"]);

    assert!(output.status.success());
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["provider"], "OpenAI");
    assert_eq!(snapshot["model_id"], "gpt-4o");
    assert_eq!(snapshot["persistence"], "ephemeral");
    assert_eq!(snapshot["api_key"], "");
}

#[test]
fn model_choice_survives_between_runs() {
    let dir = TempDir::new().unwrap();
    let set = modelpick(dir.path(), &["-p", "google", "model", "gemini-2.5-pro"]);
    assert!(set.status.success());

    let output = modelpick(dir.path(), &["-p", "Google", "show", "--json"]);
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["model_id"], "gemini-2.5-pro");
    assert_eq!(snapshot["custom_model"], false);
}

#[test]
fn unknown_provider_fails() {
    let dir = TempDir::new().unwrap();
    let output = modelpick(dir.path(), &["-p", "Nope", "show"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown provider 'Nope'"));
}

#[test]
fn config_path_shows_preferences_dir() {
    let dir = TempDir::new().unwrap();
    let output = modelpick(dir.path(), &["config", "path"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Project config:"));
    assert!(stdout.contains("prefs"));
}
