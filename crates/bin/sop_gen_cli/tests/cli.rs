//! End-to-end tests of the `sop-gen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use sop_gen::{Document, Markers};

const TARGET: &str = "\
const std = @import(\"std\");

pub fn sumOfProducts(comptime T: type, items: []const T, k: usize) T {
    const n = items.len;
    var s: T = 0;
    switch (k) {
        // START GEN
        stale
        // END GEN
        else => @panic(\"arity out of range\"),
    }
    return s;
}
";

fn sop_gen() -> Command {
    Command::cargo_bin("sop-gen").expect("sop-gen binary")
}

fn write_target(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sum_of_products.zig");
    fs::write(&path, TARGET).unwrap();
    path
}

#[test]
fn stdout_prints_the_body_only() {
    let out = sop_gen().arg("--stdout").output().unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), sop_gen::generate_body());
}

#[test]
fn splices_body_between_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_target(dir.path());
    sop_gen().arg(&path).arg("--no-fmt").assert().success();

    let content = fs::read_to_string(&path).unwrap();
    let doc = Document::split(TARGET, &Markers::default()).unwrap();
    assert_eq!(content, doc.assemble(Some(&sop_gen::generate_body())));
    assert!(!content.contains("stale"));
}

#[test]
fn second_run_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_target(dir.path());
    sop_gen().arg(&path).arg("--no-fmt").assert().success();
    let first = fs::read_to_string(&path).unwrap();
    sop_gen().arg(&path).arg("--no-fmt").assert().success();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn remove_leaves_header_and_footer() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_target(dir.path());
    sop_gen().arg(&path).arg("--no-fmt").assert().success();
    sop_gen()
        .args(&["--remove", "--no-fmt"])
        .arg(&path)
        .assert()
        .success();

    let doc = Document::split(TARGET, &Markers::default()).unwrap();
    let expected = format!("{}{}", doc.header, doc.footer);
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn legacy_remove_argument_uses_default_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_target(dir.path());
    sop_gen()
        .current_dir(dir.path())
        .args(&["-remove", "--no-fmt"])
        .assert()
        .success();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("// START GEN\n        // END GEN\n"));
}

#[test]
fn target_path_containing_remove_is_a_path() {
    let dir = tempfile::tempdir().unwrap();
    let decoy = write_target(dir.path());
    let nested = dir.path().join("pre-remove");
    fs::create_dir(&nested).unwrap();
    let wanted = write_target(&nested);
    sop_gen()
        .current_dir(dir.path())
        .arg("pre-remove/sum_of_products.zig")
        .arg("--no-fmt")
        .assert()
        .success();

    let doc = Document::split(TARGET, &Markers::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&wanted).unwrap(),
        doc.assemble(Some(&sop_gen::generate_body()))
    );
    assert_eq!(fs::read_to_string(&decoy).unwrap(), TARGET);
}

#[test]
fn stdout_rejects_remove() {
    sop_gen().args(&["--stdout", "--remove"]).assert().failure();
}

#[test]
fn missing_marker_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.zig");
    fs::write(&path, "const x = 1;\n").unwrap();
    sop_gen()
        .arg(&path)
        .arg("--no-fmt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("START GEN"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "const x = 1;\n");
}

#[test]
fn missing_target_fails() {
    let dir = tempfile::tempdir().unwrap();
    sop_gen()
        .arg(dir.path().join("absent.zig"))
        .arg("--no-fmt")
        .assert()
        .failure();
}

#[test]
fn check_reports_stale_then_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_target(dir.path());
    sop_gen().arg(&path).arg("--check").assert().code(1);
    assert_eq!(fs::read_to_string(&path).unwrap(), TARGET);
    sop_gen().arg(&path).arg("--no-fmt").assert().success();
    sop_gen().arg(&path).arg("--check").assert().success();
}

#[test]
fn init_creates_a_spliced_module() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.zig");
    sop_gen()
        .arg(&path)
        .args(&["--init", "--no-fmt"])
        .assert()
        .success();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("pub fn sumOfProducts"));
    assert!(content.contains("        64 => {\n"));
    sop_gen().arg(&path).arg("--init").assert().failure();
}

#[test]
fn custom_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.zig");
    fs::write(&path, "// <gen>\n// </gen>\n").unwrap();
    sop_gen()
        .arg(&path)
        .args(&["--start-marker", "<gen>", "--end-marker", "</gen>", "--no-fmt"])
        .assert()
        .success();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("// <gen>\n        2 => {\n"));
    assert!(content.ends_with("        },\n// </gen>\n"));
}

#[cfg(unix)]
#[test]
fn formatter_status_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_target(dir.path());
    sop_gen()
        .arg(&path)
        .args(&["--formatter", "true"])
        .assert()
        .success();
    sop_gen()
        .arg(&path)
        .args(&["--formatter", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("formatter `false`"));
}
