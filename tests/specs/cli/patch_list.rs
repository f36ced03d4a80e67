//! `tcr patch list` specs

use crate::prelude::*;

#[test]
fn lists_records_in_order() {
    let temp = Project::empty();
    let patch = PatchBytes::new()
        .created("/proj/a.txt", b"hi")
        .deleted("/proj/b.txt")
        .renamed("/proj/old.rs", "/proj/new.rs")
        .end();
    let path = temp.bytes("changes.patch", &patch);

    cli().args(&["patch", "list", path.to_str().unwrap()]).passes().stdout_eq(
        "created  /proj/a.txt (2 bytes)\n\
         deleted  /proj/b.txt\n\
         renamed  /proj/old.rs -> /proj/new.rs\n\
         \n\
         3 record(s)\n",
    );
}

#[test]
fn terminator_only_patch_is_empty() {
    let temp = Project::empty();
    let path = temp.bytes("empty.patch", &PatchBytes::new().end());

    cli().args(&["patch", "list", path.to_str().unwrap()]).passes().stdout_eq("Empty patch\n");
}

#[test]
fn json_output_names_each_record() {
    let temp = Project::empty();
    let path = temp.bytes("changes.patch", &PatchBytes::new().created("/proj/a.txt", b"hi").end());

    cli()
        .args(&["patch", "list", path.to_str().unwrap(), "--format", "json"])
        .passes()
        .stdout_has(r#""kind": "created""#)
        .stdout_has(r#""len": 2"#);
}

#[test]
fn unknown_prefix_fails() {
    let temp = Project::empty();
    let path = temp.bytes("bad.patch", &PatchBytes::new().raw(&[99, 0, 0]).end());

    cli()
        .args(&["patch", "list", path.to_str().unwrap()])
        .exits(1)
        .stderr_has("unknown record prefix 99 at offset 0");
}

#[test]
fn missing_patch_file_fails() {
    let temp = Project::empty();
    let path = temp.path().join("absent.patch");

    cli().args(&["patch", "list", path.to_str().unwrap()]).exits(1).stderr_has("error:");
}
