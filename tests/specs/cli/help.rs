//! CLI help output specs

use crate::prelude::*;

#[test]
fn tcr_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn tcr_help_lists_patch_command() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("patch");
}

#[test]
fn tcr_patch_help_shows_subcommands() {
    cli()
        .args(&["patch", "--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("apply")
        .stdout_has("list");
}

#[test]
fn tcr_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
