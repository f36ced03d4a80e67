//! `tcr patch apply` specs

use crate::prelude::*;

fn apply(temp: &Project, patch: &[u8], extra: &[&str]) -> Cli {
    let path = temp.bytes("in.patch", patch);
    let root = temp.path().join("work");
    std::fs::create_dir_all(&root).unwrap();
    let mut args =
        vec!["patch", "apply", path.to_str().unwrap(), "--root", root.to_str().unwrap()];
    args.extend_from_slice(extra);
    cli().args(&args)
}

#[test]
fn created_file_lands_under_root() {
    let temp = Project::empty();
    let patch = PatchBytes::new().created("/proj/a.txt", b"hi").end();

    apply(&temp, &patch, &["--remote-root", "/proj"])
        .passes()
        .stdout_has("added")
        .stdout_has("1 resource(s) applied");
    assert_eq!(temp.read("work/a.txt"), "hi");
}

#[test]
fn nested_directories_are_created() {
    let temp = Project::empty();
    let patch = PatchBytes::new().created("/proj/src/deep/mod.rs", b"// mod").end();

    apply(&temp, &patch, &["--remote-root", "/proj"]).passes();
    assert_eq!(temp.read("work/src/deep/mod.rs"), "// mod");
}

#[test]
fn remote_root_is_required() {
    let temp = Project::empty();
    let patch = PatchBytes::new().end();

    apply(&temp, &patch, &[]).exits(2).stderr_has("no remote root");
}

#[test]
fn remote_root_can_come_from_config() {
    let temp = Project::empty();
    let config = temp.file("config.toml", "remote_root = \"/proj\"\n");
    let patch = PatchBytes::new().created("/proj/a.txt", b"cfg").end();

    apply(&temp, &patch, &[]).env("TCR_CONFIG", config.to_str().unwrap()).passes();
    assert_eq!(temp.read("work/a.txt"), "cfg");
}

#[test]
fn deletes_are_only_recorded_by_default() {
    let temp = Project::empty();
    temp.file("work/keep.txt", "still here");
    let patch = PatchBytes::new().deleted("/proj/keep.txt").end();

    apply(&temp, &patch, &["--remote-root", "/proj"]).passes().stdout_has("(recorded)");
    assert!(temp.exists("work/keep.txt"));
}

#[test]
fn delete_flag_removes_files() {
    let temp = Project::empty();
    temp.file("work/gone.txt", "bye");
    let patch = PatchBytes::new().deleted("/proj/gone.txt").end();

    apply(&temp, &patch, &["--remote-root", "/proj", "--delete"])
        .passes()
        .stdout_lacks("(recorded)");
    assert!(!temp.exists("work/gone.txt"));
}

#[test]
fn corrupt_record_keeps_earlier_files() {
    let temp = Project::empty();
    let patch = PatchBytes::new().created("/proj/first.txt", b"1").raw(&[42]).end();

    apply(&temp, &patch, &["--remote-root", "/proj"])
        .exits(1)
        .stdout_has("first.txt")
        .stderr_has("aborted after 1 resource(s)")
        .stderr_has("unknown record prefix 42");
    assert_eq!(temp.read("work/first.txt"), "1");
}
