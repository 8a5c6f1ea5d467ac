//! Integration tests for the `cjson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check, normalize and
//! stats subcommands through the actual binary, including stdin/stdout piping, file
//! I/O, both bridges, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const NESTED: &str = r#"{"b":null,"a":[null,{}]}"#;

fn cjson() -> Command {
    let mut cmd = Command::cargo_bin("cjson").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_object_from_stdin() {
    cjson()
        .arg("check")
        .write_stdin(NESTED)
        .assert()
        .success()
        .stdout("object\n");
}

#[test]
fn check_array_from_stdin() {
    cjson()
        .arg("check")
        .write_stdin("[null, []]")
        .assert()
        .success()
        .stdout("array\n");
}

#[test]
fn check_nested_scalar_fails_at_root() {
    cjson()
        .arg("check")
        .write_stdin(r#"{"a":[null,3]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode composite JSON"))
        .stderr(predicate::str::contains("type mismatch at $: expected JsonValue, found map"));
}

#[test]
fn trace_logging_shows_nested_failure() {
    cjson()
        .arg("check")
        .env("RUST_LOG", "composite_json=trace")
        .write_stdin(r#"{"a":[null,3]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("type mismatch at $.a[1]"))
        .stderr(predicate::str::contains("type mismatch at $: expected JsonValue, found map"));
}

#[test]
fn check_bare_number_fails() {
    cjson()
        .arg("check")
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("type mismatch at $"));
}

#[test]
fn check_invalid_json_fails() {
    cjson()
        .arg("check")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn check_via_dynamic_reports_shape_only() {
    cjson()
        .args(["check", "--via", "dynamic"])
        .write_stdin("[1]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to convert JSON tree"))
        .stderr(predicate::str::contains("not a composite JSON value (found array)"));
}

#[test]
fn check_missing_file_fails() {
    cjson()
        .args(["check", "-i", "/nonexistent/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// normalize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn normalize_sorts_keys_and_compacts() {
    cjson()
        .arg("normalize")
        .write_stdin("{ \"b\" : null ,\n \"a\" : [ null , { } ] }")
        .assert()
        .success()
        .stdout("{\"a\":[null,{}],\"b\":null}\n");
}

#[test]
fn normalize_pretty() {
    cjson()
        .args(["normalize", "--pretty"])
        .write_stdin(r#"{"a":[null]}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    null\n  ]\n}\n");
}

#[test]
fn normalize_via_dynamic_matches_serde() {
    let serde_out = cjson()
        .arg("normalize")
        .write_stdin(NESTED)
        .output()
        .expect("normalize should run");
    let dynamic_out = cjson()
        .args(["normalize", "--via", "dynamic"])
        .write_stdin(NESTED)
        .output()
        .expect("normalize should run");

    let serde_json: serde_json::Value = serde_json::from_slice(&serde_out.stdout).unwrap();
    let dynamic_json: serde_json::Value = serde_json::from_slice(&dynamic_out.stdout).unwrap();
    assert_eq!(serde_json, dynamic_json);
}

#[test]
fn normalize_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    std::fs::write(&input, NESTED).unwrap();

    cjson()
        .arg("normalize")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output).expect("output file must exist");
    assert_eq!(content, r#"{"a":[null,{}],"b":null}"#);
}

#[test]
fn normalize_output_is_idempotent() {
    let first = cjson()
        .arg("normalize")
        .write_stdin(NESTED)
        .output()
        .unwrap();
    let first = String::from_utf8(first.stdout).unwrap();

    cjson()
        .arg("normalize")
        .write_stdin(first.clone())
        .assert()
        .success()
        .stdout(first);
}

#[test]
fn normalize_rejects_scalar_leaves() {
    cjson()
        .arg("normalize")
        .write_stdin(r#"{"name":"Alice"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("type mismatch at $"));
}

// ─────────────────────────────────────────────────────────────────────────────
// stats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_counts_nodes() {
    cjson()
        .arg("stats")
        .write_stdin(NESTED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kind:       object"))
        .stdout(predicate::str::contains("Arrays:     1"))
        .stdout(predicate::str::contains("Objects:    2"))
        .stdout(predicate::str::contains("Nulls:      2"))
        .stdout(predicate::str::contains("Max depth:  3"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging and usage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_only() {
    cjson()
        .args(["normalize", "--verbose"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("rendered document"));
}

#[test]
fn no_subcommand_shows_usage() {
    cjson()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cjson()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("stats"));
}
