//! `tcr patch create` specs against a real git repository

use crate::prelude::*;

fn repo() -> Project {
    let temp = Project::empty();
    temp.git_init();
    temp.file("tracked.txt", "v1");
    temp.file("doomed.txt", "x");
    temp.git(&["add", "."]);
    temp.git(&["commit", "-q", "-m", "init"]);
    temp
}

#[test]
fn working_tree_changes_become_records() {
    let temp = repo();
    temp.file("tracked.txt", "v2");
    temp.file("fresh.txt", "new");
    temp.git(&["rm", "-q", "doomed.txt"]);
    let out = temp.path().join("out.patch");

    cli()
        .args(&["patch", "create", "--remote-root", "/proj", "-o", out.to_str().unwrap()])
        .pwd(temp.path())
        .passes()
        .stdout_has("Wrote")
        .stdout_has("3 record(s)");

    cli()
        .args(&["patch", "list", out.to_str().unwrap()])
        .passes()
        .stdout_has("modified /proj/tracked.txt (2 bytes)")
        .stdout_has("deleted  /proj/doomed.txt")
        .stdout_has("created  /proj/fresh.txt (3 bytes)");
}

#[test]
fn staged_mode_sends_index_content() {
    let temp = repo();
    temp.file("tracked.txt", "staged");
    temp.git(&["add", "tracked.txt"]);
    temp.file("tracked.txt", "working copy, longer");
    let out = temp.path().join("out.patch");

    cli()
        .args(&[
            "patch",
            "create",
            "--staged",
            "--remote-root",
            "/proj",
            "-o",
            out.to_str().unwrap(),
        ])
        .pwd(temp.path())
        .passes();

    cli()
        .args(&["patch", "list", out.to_str().unwrap()])
        .passes()
        .stdout_has("modified /proj/tracked.txt (6 bytes)");
}

#[test]
fn created_patch_applies_elsewhere() {
    let temp = repo();
    temp.file("docs/guide.md", "# guide");
    let out = temp.path().join("out.patch");
    let target = Project::empty();

    cli()
        .args(&["patch", "create", "--remote-root", "/proj", "-o", out.to_str().unwrap()])
        .pwd(temp.path())
        .passes();
    cli()
        .args(&[
            "patch",
            "apply",
            out.to_str().unwrap(),
            "--root",
            target.path().to_str().unwrap(),
            "--remote-root",
            "/proj",
        ])
        .passes();

    assert_eq!(target.read("docs/guide.md"), "# guide");
}

#[test]
fn outside_a_repository_fails() {
    let temp = Project::empty();
    let out = temp.path().join("out.patch");

    cli()
        .args(&["patch", "create", "--remote-root", "/proj", "-o", out.to_str().unwrap()])
        .pwd(temp.path())
        .exits(1)
        .stderr_has("error:");
}
