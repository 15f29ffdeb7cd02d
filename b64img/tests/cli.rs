use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run(bin: &str, dir: &TempDir, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn encode(dir: &TempDir, args: &[&str]) -> Output {
    run(env!("CARGO_BIN_EXE_encode"), dir, args)
}

fn decode(dir: &TempDir, args: &[&str]) -> Output {
    run(env!("CARGO_BIN_EXE_decode"), dir, args)
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn encode_without_arguments_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = encode(&dir, &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn decode_without_arguments_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = decode(&dir, &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn encode_missing_image_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = encode(&dir, &["missing.jpg"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("missing.jpg"));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn encode_then_decode_sample() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("head.jpg"), b"\xFF\xD8\xFF\xE0ABCDEF").unwrap();

    let out = encode(&dir, &["head.jpg"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("16 chars"));
    let text = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(text, "/9j/4EFCQ0RFRg==");

    let out = decode(&dir, &["output.txt"]);
    assert!(out.status.success());
    let written = fs::read(dir.path().join("debug_image.jpg")).unwrap();
    assert_eq!(written, b"\xFF\xD8\xFF\xE0ABCDEF");

    let report = stdout(&out);
    assert!(report.contains("Saved image to: debug_image.jpg"));
    assert!(report.contains(&format!("Size: {} bytes", written.len())));
    assert!(report.contains("First 4 bytes: ffd8ffe0"));
    assert!(report.contains("Last 2 bytes: 4546"));
    assert!(report.contains("Warning: could not open image:"));
}

#[test]
fn decode_always_writes_fixed_name_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("some_dump.b64"), "QUJD\n").unwrap();

    let out = decode(&dir, &["some_dump.b64"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("debug_image.jpg")).unwrap(), b"ABC");
    assert!(!dir.path().join("some_dump.jpg").exists());
}

#[test]
fn decode_malformed_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), "not*base64").unwrap();

    let out = decode(&dir, &["bad.txt"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("malformed base64"));
    assert!(!dir.path().join("debug_image.jpg").exists());
}

#[test]
fn decode_json_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), "/9j/4EFCQ0RFRg").unwrap();

    let out = decode(&dir, &["in.txt", "-o", "restored.jpg", "--no-preview", "--json"]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["byte_len"], 10);
    assert_eq!(report["head_hex"], "ffd8ffe0");
    assert_eq!(report["preview"]["status"], "skipped");
    assert!(dir.path().join("restored.jpg").exists());
    assert!(!dir.path().join("debug_image.jpg").exists());
}

#[test]
fn decode_tolerates_excess_padding() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), "QUJD\n==\n").unwrap();

    let out = decode(&dir, &["in.txt", "--no-preview"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("debug_image.jpg")).unwrap(), b"ABC");
}
