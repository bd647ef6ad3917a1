//! Integration tests for the lineage-diagram binary.

use std::fs;
use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

fn lineage_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("lineage-diagram"))
}

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

const ABC: &str = r#"{
    "nodes": [
        {"id": "A", "title": "A", "columns": ["x"]},
        {"id": "B", "title": "B", "columns": ["y"]},
        {"id": "C", "title": "C", "columns": ["x", "y"]}
    ],
    "links": [
        {"source": {"node": "A", "column": "x"}, "target": {"node": "C", "column": "x"}},
        {"source": {"node": "B", "column": "y"}, "target": {"node": "C", "column": "y"}}
    ]
}"#;

#[test]
fn test_stdin_to_stdout() {
    lineage_cmd()
        .write_stdin(ABC)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg"))
        .stdout(predicate::str::contains(r#"<g class="connectors">"#))
        .stdout(predicate::str::contains(r#"data-id="C""#));
}

#[test]
fn test_file_to_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("orders.svg");
    lineage_cmd()
        .arg(demo("orders.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("mart.revenue_by_region"));
    assert_eq!(svg.matches("<path").count(), 6);
}

#[test]
fn test_select_highlights() {
    lineage_cmd()
        .args(["--select", "C.y"])
        .write_stdin(ABC)
        .assert()
        .success()
        .stdout(predicate::str::contains("line-highlight"))
        .stdout(predicate::str::contains("#ffe0b2"));
}

#[test]
fn test_collapse_all_shows_plus() {
    lineage_cmd()
        .arg("--collapse-all")
        .write_stdin(ABC)
        .assert()
        .success()
        .stdout(predicate::str::contains(">+</text>"))
        .stdout(predicate::str::contains(">-</text>").not());
}

#[test]
fn test_curve_and_viewport() {
    lineage_cmd()
        .args(["--curve", "orthogonal", "--viewport", "200x100"])
        .write_stdin(ABC)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"viewBox="150 92 "#))
        .stdout(predicate::str::contains(r#"d="M"#))
        .stdout(predicate::str::contains(" L"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("diagram.toml");
    fs::write(&cfg, "curve = \"arc\"\n[spacing]\nhorizontal = 400.0\n").unwrap();
    lineage_cmd()
        .arg("--config")
        .arg(&cfg)
        .write_stdin(ABC)
        .assert()
        .success()
        .stdout(predicate::str::contains(" 0 0,1 "))
        .stdout(predicate::str::contains(r#"data-id="C""#));
}

#[test]
fn test_malformed_input_fails() {
    lineage_cmd()
        .write_stdin("{ not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot load graph document"));
}

#[test]
fn test_unknown_select_fails() {
    lineage_cmd()
        .args(["--select", "Q.x"])
        .write_stdin(ABC)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown node: Q"));
}

#[test]
fn test_bad_select_syntax_fails() {
    lineage_cmd()
        .args(["--select", "nodot"])
        .write_stdin(ABC)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NODE.COLUMN"));
}

#[test]
fn test_missing_input_file_fails() {
    lineage_cmd()
        .arg("does-not-exist.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}
