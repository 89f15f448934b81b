use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

const BIN: &str = "coordpost";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_completion() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("completion").arg("bash").assert().success();
}

#[test]
fn test_run_bad_baud() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("run").arg("-b").arg("fast").assert().failure();
}

#[test]
fn test_run_missing_config() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg("/nonexistent/config.hcl")
        .arg("run")
        .assert()
        .failure();
}

#[test]
fn test_run_missing_device() {
    let dir = TempDir::new().unwrap();
    let fname = dir.path().join("config.hcl");
    fs::write(
        &fname,
        "version = 1\nserial {\n  port = \"/dev/nonexistent-coordpost\"\n}\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg(&fname)
        .arg("run")
        .arg("-u")
        .arg("http://127.0.0.1:9/")
        .assert()
        .failure();
}
