//! CLI smoke tests: the knowledge-base lifecycle and the three query
//! commands, run against a demo database in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;

fn dx(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("dx-solver").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn init_demo(dir: &std::path::Path) {
    dx(dir)
        .args(["kb", "init", "--db", "demo.db", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo data"));
}

#[test]
fn kb_init_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    dx(dir.path())
        .args(["kb", "stats", "--db", "demo.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diseases"));
}

#[test]
fn symptoms_lists_grouped_by_system() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    dx(dir.path())
        .args(["symptoms", "--db", "demo.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Respiratorio"))
        .stdout(predicate::str::contains("Tosse"));
}

#[test]
fn diagnose_ranks_demo_influenza() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    // Cough + fever + muscle aches
    dx(dir.path())
        .args(["diagnose", "--db", "demo.db", "--symptoms", "1,12,14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Influenza"))
        .stdout(predicate::str::contains("% match"));
}

#[test]
fn diagnose_json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    let output = dx(dir.path())
        .args([
            "diagnose",
            "--db",
            "demo.db",
            "--symptoms",
            "1,12",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ranked = parsed.as_array().unwrap();
    assert!(!ranked.is_empty());
    assert!(ranked[0].get("match_percentage").is_some());
}

#[test]
fn diagnose_with_no_matching_pair_reports_no_candidates() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    // Id 9999 exists in no association row
    dx(dir.path())
        .args(["diagnose", "--db", "demo.db", "--symptoms", "9999"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No disease matched"));
}

#[test]
fn risks_sorted_and_soft_on_unknown_disease() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    // Polmonite carries Alto-level risk factors in the demo seed
    dx(dir.path())
        .args(["risks", "2", "--db", "demo.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Alto]"));

    dx(dir.path())
        .args(["risks", "424242", "--db", "demo.db"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No risk factors recorded"));
}

#[test]
fn missing_database_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();

    dx(dir.path())
        .args(["symptoms", "--db", "absent.db"])
        .assert()
        .failure();
}

#[test]
fn kb_export_round_trips_through_import() {
    let dir = tempfile::tempdir().unwrap();
    init_demo(dir.path());

    dx(dir.path())
        .args(["kb", "export", "--db", "demo.db", "--output", "seed.json"])
        .assert()
        .success();

    dx(dir.path())
        .args(["kb", "import", "--db", "copy.db", "seed.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));

    dx(dir.path())
        .args(["diagnose", "--db", "copy.db", "--symptoms", "1,12,14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Influenza"));
}
