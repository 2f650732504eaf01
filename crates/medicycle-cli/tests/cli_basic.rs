//! Basic CLI E2E tests.
//!
//! Each test runs the compiled binary against its own temporary HOME so no
//! real user data is touched.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against `home` and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_medicycle"))
        .env("HOME", home)
        .env("MEDICYCLE_ENV", "dev")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "command {:?} failed: {}", args, stderr);
    stdout
}

fn create_profile(home: &Path) -> String {
    run_ok(
        home,
        &[
            "profile", "create", "--name", "Ann", "--age", "40", "--passkey", "secret",
        ],
    );
    let list = run_ok(home, &["profile", "list", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&list).unwrap();
    rows[0]["id"].as_str().unwrap().to_string()
}

#[test]
fn profile_create_and_list() {
    let home = TempDir::new().unwrap();
    let id = create_profile(home.path());
    assert!(id.starts_with("profile_"));

    let list = run_ok(home.path(), &["profile", "list"]);
    assert!(list.contains("Ann"));
}

#[test]
fn open_requires_passkey_until_verified() {
    let home = TempDir::new().unwrap();
    let id = create_profile(home.path());

    // Close clears the verification marker.
    run_ok(home.path(), &["profile", "close"]);

    let (_, stderr, code) = run_cli(home.path(), &["profile", "open", &id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("passkey required"));

    let (_, stderr, code) =
        run_cli(home.path(), &["profile", "open", &id, "--passkey", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Wrong passkey"));

    run_ok(home.path(), &["profile", "open", &id, "--passkey", "secret"]);

    // Re-entry is verified now; no passkey needed.
    run_ok(home.path(), &["profile", "close"]);
    // Close resets verification, so this needs the passkey again.
    let (_, _, code) = run_cli(home.path(), &["profile", "open", &id]);
    assert_ne!(code, 0);
}

#[test]
fn med_today_take_history_flow() {
    let home = TempDir::new().unwrap();
    create_profile(home.path());

    run_ok(
        home.path(),
        &[
            "med", "add", "--name", "Aspirin", "--dosage", "100mg", "--time", "08:00",
            "--food", "before", "--cycle", "daily",
        ],
    );

    let meds = run_ok(home.path(), &["med", "list", "--json"]);
    let meds: serde_json::Value = serde_json::from_str(&meds).unwrap();
    let med_id = meds[0]["id"].as_str().unwrap().to_string();

    let today = run_ok(home.path(), &["today", "list", "--json"]);
    let today: serde_json::Value = serde_json::from_str(&today).unwrap();
    assert_eq!(today.as_array().unwrap().len(), 1);
    assert_eq!(today[0]["taken"], false);

    run_ok(home.path(), &["today", "take", &med_id]);

    let today = run_ok(home.path(), &["today", "list", "--json"]);
    let today: serde_json::Value = serde_json::from_str(&today).unwrap();
    assert_eq!(today[0]["taken"], true);

    // Second take the same day is refused at the CLI level.
    let (_, stderr, code) = run_cli(home.path(), &["today", "take", &med_id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already marked taken"));

    let history = run_ok(home.path(), &["history", "list", "--json"]);
    let history: serde_json::Value = serde_json::from_str(&history).unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["medName"], "Aspirin");
    assert!(history[0]["timeTakenISO"].is_string());
}

#[test]
fn weekly_med_requires_week_days() {
    let home = TempDir::new().unwrap();
    create_profile(home.path());

    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "med", "add", "--name", "B12", "--dosage", "1", "--time", "09:00",
            "--cycle", "weekly",
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("--week-days"));
}

#[test]
fn export_import_round_trip() {
    let home = TempDir::new().unwrap();
    create_profile(home.path());

    let exported = run_ok(home.path(), &["data", "export"]);
    let file = home.path().join("backup.json");
    std::fs::write(&file, &exported).unwrap();

    // Refuses without --yes.
    let (_, stderr, code) = run_cli(
        home.path(),
        &["data", "import", file.to_str().unwrap()],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("--yes"));

    let out = run_ok(
        home.path(),
        &["data", "import", file.to_str().unwrap(), "--yes"],
    );
    assert!(out.contains("Imported 1 profile(s)"));

    // Import invalidates verification: opening now needs the passkey.
    let profiles = run_ok(home.path(), &["profile", "list", "--json"]);
    let profiles: serde_json::Value = serde_json::from_str(&profiles).unwrap();
    let id = profiles[0]["id"].as_str().unwrap();
    let (_, _, code) = run_cli(home.path(), &["profile", "open", id]);
    assert_ne!(code, 0);
}

#[test]
fn invalid_import_is_rejected() {
    let home = TempDir::new().unwrap();
    create_profile(home.path());

    let file = home.path().join("bad.json");
    std::fs::write(&file, r#"{"history": []}"#).unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["data", "import", file.to_str().unwrap(), "--yes"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("profiles"));

    // Existing data untouched.
    let list = run_ok(home.path(), &["profile", "list", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&list).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[test]
fn delete_cascades_history() {
    let home = TempDir::new().unwrap();
    let id = create_profile(home.path());

    run_ok(
        home.path(),
        &[
            "med", "add", "--name", "Aspirin", "--dosage", "100mg", "--time", "08:00",
            "--cycle", "daily",
        ],
    );
    let meds = run_ok(home.path(), &["med", "list", "--json"]);
    let meds: serde_json::Value = serde_json::from_str(&meds).unwrap();
    let med_id = meds[0]["id"].as_str().unwrap().to_string();
    run_ok(home.path(), &["today", "take", &med_id]);

    // Refuses without --yes.
    let (_, _, code) = run_cli(home.path(), &["profile", "delete", &id]);
    assert_ne!(code, 0);

    run_ok(home.path(), &["profile", "delete", &id, "--yes"]);

    let list = run_ok(home.path(), &["profile", "list", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&list).unwrap();
    assert!(rows.as_array().unwrap().is_empty());

    let exported = run_ok(home.path(), &["data", "export"]);
    let doc: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert!(doc["history"].as_array().unwrap().is_empty());
}

#[test]
fn commands_require_active_profile() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["med", "list"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no active profile"));
}

#[test]
fn remind_once_runs() {
    let home = TempDir::new().unwrap();
    create_profile(home.path());
    let out = run_ok(home.path(), &["remind", "once"]);
    assert!(out.contains("notification(s) emitted"));
}

#[test]
fn config_show_and_set() {
    let home = TempDir::new().unwrap();
    let out = run_ok(home.path(), &["config", "show"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["ui"]["theme"], "light");

    run_ok(home.path(), &["config", "theme", "dark"]);
    let out = run_ok(home.path(), &["config", "theme"]);
    assert_eq!(out.trim(), "dark");

    let (_, _, code) = run_cli(home.path(), &["config", "interval", "90"]);
    assert_ne!(code, 0);
    run_ok(home.path(), &["config", "interval", "30"]);
    let out = run_ok(home.path(), &["config", "interval"]);
    assert_eq!(out.trim(), "30");
}
