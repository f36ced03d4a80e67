// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;

#[test]
fn empty_change_payload_uses_fallbacks() {
    let clock = FakeClock::new(123_456);
    let change = ChangePayload::default().into_change(false, &clock);

    assert_eq!(change.status, ChangeStatus::Unknown);
    assert_eq!(change.change_count, 0);
    assert_eq!(change.vcs_date_ms, 123_456);
    assert_eq!(change.description, "");
    assert!(!change.is_personal);
    assert!(change.builds.is_empty());
}

#[test]
fn summary_json_with_missing_fields() {
    let clock = FakeClock::new(99);
    let json = r#"{
        "changes": [
            { "id": 10, "status": "CHECKED", "changeCount": 3, "vcsDate": 5000,
              "builds": [ { "id": "77", "status": "FAILURE" }, {} ] }
        ],
        "personalChanges": [ { "id": 10 } ]
    }"#;
    let payload: SummaryPayload = serde_json::from_str(json).unwrap();
    let summary = payload.into_summary(&clock);

    let committed = &summary.changes[0];
    assert_eq!(committed.id, 10);
    assert!(!committed.is_personal);
    assert_eq!(committed.status, ChangeStatus::Checked);
    assert_eq!(committed.change_count, 3);
    assert_eq!(committed.vcs_date_ms, 5000);
    assert_eq!(committed.builds[0].status, BuildStatus::Failure);
    assert_eq!(committed.builds[0].id, "77");
    assert_eq!(committed.builds[1].status, BuildStatus::Unknown);

    let personal = &summary.personal_changes[0];
    assert!(personal.is_personal);
    assert_eq!(personal.status, ChangeStatus::Unknown);
    assert_eq!(personal.vcs_date_ms, 99);
    assert!(summary.visible_projects.is_empty());
}

#[test]
fn explicit_personal_flag_wins_over_partition() {
    let clock = FakeClock::default();
    let payload = ChangePayload { is_personal: Some(false), ..Default::default() };
    assert!(!payload.into_change(true, &clock).is_personal);
}
