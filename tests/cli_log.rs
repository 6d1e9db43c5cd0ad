mod common;

use common::TestProject;
use predicates::prelude::*;

#[test]
fn log_empty() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation events"));
}

#[test]
fn log_shows_recorded_issues() {
    let project = TestProject::new();
    project.validate("Write", "etl/load.py", "eval(x)").success();

    project
        .cmd()
        .arg("log")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("etl/load.py")
                .and(predicate::str::contains("dynamic code evaluation")),
        );
}

#[test]
fn log_json_limit_keeps_most_recent() {
    let project = TestProject::new();
    for name in ["a.json", "b.json", "c.json"] {
        project.validate("Write", name, "{").success();
    }

    let output = project
        .cmd()
        .args(["--json", "log", "-n", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["count"], 2);
    assert_eq!(json["entries"][0]["file_path"], "b.json");
    assert_eq!(json["entries"][1]["file_path"], "c.json");
}

#[test]
fn log_file_filter() {
    let project = TestProject::new();
    project.validate("Write", "data/a.csv", "x").success();
    project.validate("Write", "conf/b.json", "{").success();

    let output = project
        .cmd()
        .args(["--json", "log", "--file", "conf/"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["file_filter"], "conf/");
    assert_eq!(json["entries"][0]["file_path"], "conf/b.json");
}

#[test]
fn log_skips_corrupt_lines() {
    let project = TestProject::new();
    project.validate("Write", "a.json", "{").success();
    let mut raw = std::fs::read_to_string(project.log_path()).unwrap();
    raw.push_str("{truncated\n");
    std::fs::write(project.log_path(), raw).unwrap();

    let output = project
        .cmd()
        .args(["--json", "log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total"], 1);
}

#[test]
fn completions_generate() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("datahook"));
}
