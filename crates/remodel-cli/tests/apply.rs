//! End-to-end tests for `remodel apply`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Value, json};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "remodel-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn remodel() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_remodel"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn apply_writes_remodeled_records() {
    let dir = unique_temp_dir("apply");
    let config = dir.join("config.json");
    let input = dir.join("input.json");
    let output = dir.join("output.json");
    write(
        &config,
        r#"{
            "default_source": "fallback",
            "copy": ["UID", "name", "secret"],
            "exclude": ["secret"],
            "rules": { "title": "name" },
            "constants": { "version": "2.0" }
        }"#,
    );
    write(
        &input,
        r#"[
            {"UID": "1", "name": "First", "secret": "x", "fallback": "hidden"},
            {"UID": "2", "name": "Second"}
        ]"#,
    );

    let status = remodel()
        .arg("apply")
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            {"UID": "1", "name": "First", "secret": "hidden", "title": "First", "version": "2.0"},
            {"UID": "2", "name": "Second", "secret": null, "title": "Second", "version": "2.0"}
        ])
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn apply_prints_to_stdout() {
    let dir = unique_temp_dir("stdout");
    let config = dir.join("config.json");
    let input = dir.join("input.json");
    write(&config, r#"{"copy": ["a"]}"#);
    write(&input, r#"{"a": 1, "b": 2}"#);

    let out = remodel()
        .arg("apply")
        .arg("-c")
        .arg(&config)
        .arg(&input)
        .arg("--compact")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), r#"{"a":1}"#);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn apply_rejects_unknown_config_fields() {
    let dir = unique_temp_dir("bad-config");
    let config = dir.join("config.json");
    let input = dir.join("input.json");
    write(&config, r#"{"passthrough": true}"#);
    write(&input, "{}");

    let out = remodel()
        .arg("apply")
        .arg("-c")
        .arg(&config)
        .arg(&input)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Failed to load config"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn demo_accepts_fixed_timestamp() {
    let out = remodel()
        .args(["demo", "--when", "2014-06-01T18:30:00Z"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let printed: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        printed["DTSTART"],
        json!("DTSTART;VALUE=DATE_TIME:2014-06-01T18:30:00.000Z")
    );
}

#[test]
fn log_file_receives_json_lines() {
    let dir = unique_temp_dir("log-file");
    let config = dir.join("config.json");
    let input = dir.join("input.json");
    let log = dir.join("remodel.log");
    write(&config, r#"{"copy": ["a"]}"#);
    write(&input, r#"[{"a": 1}, {"a": 2}]"#);

    let out = remodel()
        .arg("--log-file")
        .arg(&log)
        .args(["--log-format", "json", "-vv", "apply", "-c"])
        .arg(&config)
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "logs leaked to stderr");

    let contents = fs::read_to_string(&log).unwrap();
    let lines: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let passes = lines
        .iter()
        .filter(|line| line["fields"]["message"] == json!("remodeling record"))
        .count();
    assert_eq!(passes, 2, "{contents}");
    assert!(lines.iter().all(|line| line["level"] != json!("TRACE")));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn log_level_flag_silences_warnings() {
    let dir = unique_temp_dir("log-level");
    let config = dir.join("config.json");
    let input = dir.join("input.json");
    write(&config, r#"{"copy": ["a"]}"#);
    write(&input, r#"{"a": 1}"#);

    let out = remodel()
        .env("RUST_LOG", "trace")
        .args(["--log-level", "off", "apply", "-c"])
        .arg(&config)
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stderr.is_empty());

    fs::remove_dir_all(&dir).unwrap();
}
