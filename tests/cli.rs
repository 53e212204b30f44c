use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

const SCENARIO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/scenario.json");
const IM7: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/im7_q16hdri.json");

const SCENARIO_TEXT: &str = "\
ImageMagick version      : 7.1.0
ImageMagick release data : 2023-01-01
ImageMagick quantum range: 65535
ImageMagick quantum depth: 16
ImageMagick package name : ImageMagick
ImageMagick license      : Apache-2.0
ImageMagick home URL     : https://imagemagick.org
ImageMagick features     : HDRI
ImageMagick delegates    : zlib
ImageMagick copyright    : Copyright 1999
";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("magick-info").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn snapshot_prints_ten_lines() {
    cmd()
        .args(["--snapshot", SCENARIO])
        .assert()
        .success()
        .stdout(SCENARIO_TEXT);
}

#[test]
fn repeated_runs_byte_identical() {
    let first = cmd().args(["--snapshot", IM7]).output().unwrap();
    let second = cmd().args(["--snapshot", IM7]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[cfg(not(feature = "magickcore"))]
#[test]
fn missing_provider_prints_nothing() {
    cmd()
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("provider unavailable"));
}

#[test]
fn unreadable_snapshot_fails_without_output() {
    cmd()
        .args(["--snapshot", "/nonexistent/magick-info.json"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("Failed to read snapshot"));
}

#[test]
fn verbose_logs_stay_off_stdout() {
    cmd()
        .args(["--snapshot", SCENARIO, "--verbose"])
        .assert()
        .success()
        .stdout(SCENARIO_TEXT)
        .stderr(contains("queried delegates"));
}

#[test]
fn required_delegates_present() {
    cmd()
        .args(["--snapshot", IM7])
        .args(["--require-delegate", "jpeg", "--require-delegate", "png"])
        .args(["--require-feature", "HDRI", "--expect-quantum-depth", "Q16"])
        .assert()
        .success()
        .stderr(contains("error").not());
}

#[test]
fn missing_delegate_exits_two_after_report() {
    // The packaged build was configured --without-zlib
    cmd()
        .args(["--snapshot", IM7, "--require-delegate", "zlib"])
        .assert()
        .code(2)
        .stdout(contains("ImageMagick copyright    :"))
        .stderr(contains("delegate zlib wasn't enabled"));
}

#[test]
fn delegate_case_must_match_exactly() {
    cmd()
        .args(["--snapshot", IM7, "--require-delegate", "PNG"])
        .assert()
        .code(2)
        .stderr(contains("delegate PNG wasn't enabled (listed as png)"));
}

#[cfg(not(feature = "magickcore"))]
#[test]
fn help_explains_how_to_link_magickcore() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--features magickcore"));
}

#[test]
fn min_version_too_new_exits_two() {
    cmd()
        .args(["--snapshot", IM7, "--min-version", "7.1.0"])
        .assert()
        .code(2)
        .stderr(contains("min_version"));
}

#[test]
fn invalid_quantum_depth_rejected_by_parser() {
    cmd()
        .args(["--snapshot", IM7, "--expect-quantum-depth", "12"])
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn json_report_replays_as_snapshot() {
    let output = cmd().args(["--snapshot", IM7, "--json"]).output().unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["package_name"], "ImageMagick");
    assert_eq!(report["profile"]["major"], 7);
    assert_eq!(report["libraries"][1], "MagickWand-7.Q16HDRI");
    assert_eq!(report["fingerprint"].as_str().unwrap().len(), 64);

    let dir = tempfile::tempdir().unwrap();
    let captured = dir.path().join("captured.json");
    fs::write(&captured, &output.stdout).unwrap();

    let original = cmd().args(["--snapshot", IM7]).output().unwrap();
    cmd()
        .arg("--snapshot")
        .arg(&captured)
        .assert()
        .success()
        .stdout(String::from_utf8(original.stdout).unwrap());
}

#[test]
fn json_includes_requirement_results_when_asked() {
    let output = cmd()
        .args(["--snapshot", IM7, "--json", "--require-delegate", "exr"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["requirements"]["satisfied"], false);
    assert_eq!(report["requirements"]["violations"][0]["rule"], "delegate");
    assert_eq!(report["requirements"]["violations"][0]["expected"], "exr");
}
