// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn no_color() {
    std::env::set_var("NO_COLOR", "1");
}

#[test]
#[serial]
fn entry_lines() {
    no_color();
    let cases = [
        (PatchEntry::Created { name: "/p/a".into(), len: 2 }, "created  /p/a (2 bytes)"),
        (PatchEntry::Modified { name: "/p/b".into(), len: 0 }, "modified /p/b (0 bytes)"),
        (PatchEntry::Deleted { name: "/p/c".into() }, "deleted  /p/c"),
        (
            PatchEntry::Renamed { prev: "/p/old".into(), new: "/p/new".into() },
            "renamed  /p/old -> /p/new",
        ),
    ];
    for (entry, expected) in cases {
        assert_eq!(format_entry(&entry), expected);
    }
}

#[test]
#[serial]
fn recorded_deletes_are_marked() {
    no_color();
    let resource = AppliedResource::deleted("/w/c");
    assert_eq!(format_resource(&resource, false), "deleted  /w/c (recorded)");
    assert_eq!(format_resource(&resource, true), "deleted  /w/c");
}

#[test]
#[serial]
fn added_resources_are_never_marked() {
    no_color();
    let resource = AppliedResource::added("/w/a");
    assert_eq!(format_resource(&resource, false), "added    /w/a");
}

#[test]
#[serial]
fn renamed_resource_shows_both_paths() {
    no_color();
    let resource = AppliedResource::renamed("/w/new", "/w/old");
    assert_eq!(format_resource(&resource, true), "renamed  /w/old -> /w/new");
}

#[test]
fn entry_view_serializes_without_empty_fields() {
    let entry = PatchEntry::Deleted { name: "/p/c".into() };
    let json = serde_json::to_value(EntryView::from(&entry)).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "deleted", "name": "/p/c" }));
}

#[test]
fn json_printers_succeed() {
    let entries = vec![PatchEntry::Created { name: "/p/a".into(), len: 1 }];
    assert!(print_entries(&entries, OutputFormat::Json).is_ok());
    assert!(print_applied(&[AppliedResource::added("/w/a")], false, OutputFormat::Json).is_ok());
}
