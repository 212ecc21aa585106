use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn version_flag_prints_the_build_banner() {
    let mut cmd = Command::cargo_bin("inquiry_core_cli").expect("binary exists");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("inquiry_core"));
}

#[test]
fn unreachable_backend_reports_a_catalog_error_and_fails() {
    let temp = TempDir::new().expect("create temp dir");
    let mut cmd = Command::cargo_bin("inquiry_core_cli").expect("binary exists");
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path())
        .env("INQUIRY_API_URL", "http://127.0.0.1:9")
        .env("INQUIRY_REQUEST_TIMEOUT_SECS", "2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("inquiry form catalog"));
}
