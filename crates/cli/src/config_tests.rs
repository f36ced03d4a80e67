// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn missing_file_is_default() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn reads_all_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
remote_root = "jetbrains.git://|git@example.com:team/app.git|"
write_policy = "strict"
rename_mode = "record"
apply_deletes = true
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(
        settings.remote_root.as_deref(),
        Some("jetbrains.git://|git@example.com:team/app.git|")
    );
    assert_eq!(settings.write_policy().unwrap(), Some(WritePolicy::Strict));
    assert_eq!(settings.rename_mode().unwrap(), Some(RenameMode::Record));
    assert!(settings.apply_deletes);
}

#[test]
fn unknown_key_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "remote_rot = \"/proj\"\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("remote_rot"));
}

#[yare::parameterized(
    bad_policy = { Some("loose"), None },
    bad_mode   = { None, Some("sideways") },
)]
fn invalid_enum_values_are_rejected(policy: Option<&str>, mode: Option<&str>) {
    let settings = Settings {
        write_policy: policy.map(str::to_string),
        rename_mode: mode.map(str::to_string),
        ..Default::default()
    };
    assert!(settings.write_policy().is_err() || settings.rename_mode().is_err());
}

#[test]
fn write_policy_error_names_the_value() {
    let settings = Settings { write_policy: Some("loose".into()), ..Default::default() };
    let err = settings.write_policy().unwrap_err();
    assert!(err.to_string().contains("unknown write policy: loose"));
}

#[test]
#[serial]
fn tcr_config_overrides_location() {
    std::env::set_var("TCR_CONFIG", "/tmp/elsewhere.toml");
    assert_eq!(config_path(), Some(PathBuf::from("/tmp/elsewhere.toml")));
    std::env::remove_var("TCR_CONFIG");
}
