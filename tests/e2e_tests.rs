//! End-to-end tests for the docsift CLI.
//!
//! Each test:
//! 1. Creates temp input/output directories
//! 2. Copies fixture documents (or writes documents inline)
//! 3. Runs `docsift parse` / `docsift schemas`
//! 4. Asserts exit code + summary output + written artifacts

// Allow deprecated cargo_bin usage until assert_cmd updates API
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Manifest directory (project root).
fn manifest_dir() -> &'static str {
    env!("CARGO_MANIFEST_DIR")
}

fn docsift() -> Command {
    Command::cargo_bin("docsift").unwrap()
}

/// Copy the fixture documents into a temp input directory.
fn setup_docs() -> TempDir {
    let dir = tempfile::tempdir().expect("create tempdir");
    for name in ["team-charter.txt", "db-outage-postmortem.txt", "notes.txt"] {
        let fixture = format!("{}/fixtures/docs/{name}", manifest_dir());
        fs::copy(&fixture, dir.path().join(name)).expect("copy fixture");
    }
    dir
}

fn parse(input: &TempDir, output: &TempDir) -> Command {
    let mut cmd = docsift();
    cmd.arg("parse")
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path());
    cmd
}

// ─── docsift parse (auto) ───────────────────────────────────────────────────

#[test]
fn e2e_parse_auto_classifies_and_writes_artifacts() {
    let input = setup_docs();
    let output = tempfile::tempdir().unwrap();

    parse(&input, &output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"docs_parsed\":2"))
        .stdout(predicate::str::contains("\"skipped_unclassified\":1"));

    assert!(output.path().join("team-charter.txt.csv").exists());
    assert!(output.path().join("db-outage-postmortem.txt.csv").exists());
    assert!(!output.path().join("notes.txt.csv").exists());

    let mut reader =
        csv::Reader::from_path(output.path().join("team-charter.txt.csv")).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec![
            "Mission",
            "Scope",
            "Goals",
            "Non-Goals",
            "Team",
            "Status"
        ])
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Keep the payments platform reliable and fast.");
    assert_eq!(&rows[0][4], "Alice, Bob, Chen");
}

#[test]
fn e2e_parse_reruns_are_idempotent() {
    let input = setup_docs();
    let output = tempfile::tempdir().unwrap();

    parse(&input, &output).assert().success();
    let first =
        fs::read_to_string(output.path().join("db-outage-postmortem.txt.csv")).unwrap();

    parse(&input, &output).assert().success();
    let second =
        fs::read_to_string(output.path().join("db-outage-postmortem.txt.csv")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn e2e_parse_skips_binary_garbage_but_continues() {
    let input = setup_docs();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("garbled-postmortem.txt"),
        [0xff, 0xfe, 0x00, 0x42],
    )
    .unwrap();

    parse(&input, &output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"docs_parsed\":2"))
        .stdout(predicate::str::contains("\"skipped_non_utf8\":1"))
        .stderr(predicate::str::contains("garbled-postmortem.txt"));

    assert!(!output.path().join("garbled-postmortem.txt.csv").exists());
    assert!(output.path().join("db-outage-postmortem.txt.csv").exists());
}

// ─── docsift parse (forced kind) ────────────────────────────────────────────

#[test]
fn e2e_parse_forced_kind_parses_unmatched_names() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("notes.txt"),
        "Summary\nForced parse.\nImpact\nNone.",
    )
    .unwrap();

    parse(&input, &output)
        .arg("--kind")
        .arg("postmortem")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"postmortem_rows\":1"));

    let content = fs::read_to_string(output.path().join("notes.txt.csv")).unwrap();
    assert!(content.contains("Forced parse."));
}

// ─── configuration errors ───────────────────────────────────────────────────

#[test]
fn e2e_parse_unknown_kind_fails_before_processing() {
    let input = setup_docs();
    let output = tempfile::tempdir().unwrap();

    parse(&input, &output)
        .arg("--kind")
        .arg("retro")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown kind selector"));

    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn e2e_parse_missing_input_dir_fails() {
    docsift()
        .arg("parse")
        .arg("--input")
        .arg("/no/such/dir")
        .arg("--output")
        .arg("/tmp/out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn e2e_parse_empty_input_dir_fails() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    parse(&input, &output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no documents found"));
}

// ─── schema overrides ───────────────────────────────────────────────────────

#[test]
fn e2e_parse_with_schema_override() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let schemas = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("q3-charter.txt"),
        "Owner: Dana\nPurpose\nShip the migration.",
    )
    .unwrap();
    fs::write(
        schemas.path().join("charter.toml"),
        "[[field]]\nname = \"Purpose\"\n\n[[field]]\nname = \"Owner\"\npattern = \"Owner:\\\\s*([^\\\\n]+)\"\n",
    )
    .unwrap();

    parse(&input, &output)
        .arg("--schemas")
        .arg(schemas.path())
        .assert()
        .success();

    let content = fs::read_to_string(output.path().join("q3-charter.txt.csv")).unwrap();
    assert!(content.starts_with("Purpose,Owner"));
    assert!(content.contains("Ship the migration."));
    assert!(content.contains("Dana"));
}

// ─── docsift schemas ────────────────────────────────────────────────────────

#[test]
fn e2e_schemas_lists_builtin_fields() {
    docsift()
        .arg("schemas")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mission"))
        .stdout(predicate::str::contains("Lessons Learned"));
}
