use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};

fn run_hclean(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hclean"))
        .args(args)
        .env("HOME", home)
        .env_remove("HCLEAN_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute hclean")
}

fn history(n: usize) -> Vec<Value> {
    (1..=n).map(|i| json!({ "display": format!("p{i}") })).collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn entries_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn default_run_cleans_home_config_with_backup() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join(".claude.json");
    fs::write(
        &config,
        json!({ "projects": { "/a": { "history": history(15) }, "/b": { "history": history(3) } } })
            .to_string(),
    )
    .unwrap();

    let output = run_hclean(home.path(), &[]);

    assert!(output.status.success(), "command failed: {output:?}");
    let out = stdout(&output);
    assert!(out.contains("keeping 10 entries per project"), "{out}");
    assert!(out.contains("Created backup: "), "{out}");
    assert!(out.contains("Project /a: removed 5 entries (15 → 10)"), "{out}");
    assert!(out.contains("Project /b: 3 entries (no cleanup needed)"), "{out}");
    assert!(out.contains("Total history entries removed: 5"), "{out}");

    let names = entries_in(home.path());
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names[1].starts_with(".claude.json.backup-"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["projects"]["/a"]["history"], json!(history(15)[5..]));
}

#[test]
fn max_entries_and_no_backup() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("custom.json");
    fs::write(
        &config,
        json!({ "projects": { "/a": { "history": history(6) } } }).to_string(),
    )
    .unwrap();
    let config_arg = config.to_string_lossy().into_owned();

    let output = run_hclean(
        home.path(),
        &["--config", &config_arg, "--max-entries", "2", "--no-backup"],
    );

    assert!(output.status.success(), "command failed: {output:?}");
    assert!(stdout(&output).contains("removed 4 entries (6 → 2)"));
    assert_eq!(entries_in(home.path()), vec!["custom.json".to_string()]);
}

#[test]
fn config_from_environment() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("env.json");
    fs::write(&config, r#"{"projects":{"/a":{"history":[1,2,3]}}}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_hclean"))
        .args(["--max-entries", "1", "--no-backup"])
        .env("HOME", home.path())
        .env("HCLEAN_CONFIG", &config)
        .output()
        .expect("failed to execute hclean");

    assert!(output.status.success(), "command failed: {output:?}");
    let saved: Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["projects"]["/a"]["history"], json!([3]));
}

#[test]
fn missing_config_exits_cleanly() {
    let home = tempfile::tempdir().unwrap();

    let output = run_hclean(home.path(), &[]);

    assert!(output.status.success(), "command failed: {output:?}");
    assert!(stdout(&output).contains("No config file found"));
    assert!(entries_in(home.path()).is_empty());
}

#[test]
fn nothing_to_clean() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join(".claude.json");
    let body = r#"{"projects":{"/a":{"history":[1]}}}"#;
    fs::write(&config, body).unwrap();

    let output = run_hclean(home.path(), &["--no-backup"]);

    assert!(output.status.success(), "command failed: {output:?}");
    assert!(stdout(&output).contains("No cleanup needed"));
    assert_eq!(fs::read_to_string(&config).unwrap(), body);
}

#[test]
fn check_only_reports_size_without_touching_file() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join(".claude.json");
    let body = json!({ "projects": { "/a": { "history": history(50) } } }).to_string();
    fs::write(&config, &body).unwrap();

    let output = run_hclean(home.path(), &["--check-only"]);

    assert!(output.status.success(), "command failed: {output:?}");
    let out = stdout(&output);
    assert!(out.contains("Current config file size: 0.00 MB"), "{out}");
    assert!(!out.contains("consider running cleanup"));
    assert_eq!(fs::read_to_string(&config).unwrap(), body);
    assert_eq!(entries_in(home.path()), vec![".claude.json".to_string()]);
}

#[test]
fn check_only_warns_on_large_file() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join(".claude.json");
    let padding = "x".repeat(2 * 1024 * 1024);
    fs::write(&config, json!({ "pad": padding }).to_string()).unwrap();

    let output = run_hclean(home.path(), &["--check-only"]);

    assert!(output.status.success(), "command failed: {output:?}");
    let out = stdout(&output);
    assert!(out.contains("Current config file size: 2.00 MB"), "{out}");
    assert!(out.contains("consider running cleanup"), "{out}");
}

#[test]
fn invalid_json_fails_with_read_code() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join(".claude.json");
    fs::write(&config, "{ not json").unwrap();

    let output = run_hclean(home.path(), &[]);

    assert_eq!(output.status.code(), Some(3), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error reading config"), "{stderr}");
    assert!(stderr.contains("backup kept at"), "{stderr}");
    assert_eq!(fs::read_to_string(&config).unwrap(), "{ not json");
}

#[test]
fn negative_max_entries_is_rejected() {
    let home = tempfile::tempdir().unwrap();

    let output = run_hclean(home.path(), &["--max-entries", "-1"]);

    assert_eq!(output.status.code(), Some(2), "{output:?}");
}

#[cfg(unix)]
#[test]
fn unwritable_target_fails_with_write_code() {
    use std::os::unix::fs::{PermissionsExt, symlink};

    let home = tempfile::tempdir().unwrap();
    let locked = home.path().join("dotfiles");
    fs::create_dir(&locked).unwrap();
    let real = locked.join("claude.json");
    let body = json!({ "projects": { "/a": { "history": history(12) } } }).to_string();
    fs::write(&real, &body).unwrap();
    symlink(&real, home.path().join(".claude.json")).unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    let marker = locked.join("marker");
    if fs::write(&marker, b"").is_ok() {
        // running as root, directory permissions are not enforced
        fs::remove_file(&marker).ok();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }
    let output = run_hclean(home.path(), &[]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(output.status.code(), Some(4), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error saving cleaned config"), "{stderr}");
    assert!(stderr.contains("the cleaned config was not saved"), "{stderr}");
    assert!(stderr.contains("backup kept at"), "{stderr}");
    assert_eq!(fs::read_to_string(&real).unwrap(), body);
}
