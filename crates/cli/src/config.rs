// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User settings from `config.toml`.
//!
//! Location: `$TCR_CONFIG`, else `<config dir>/tcr/config.toml`. A missing
//! file means defaults; a malformed one is an error. Command-line flags
//! override every value here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tcr_engine::RenameMode;
use tcr_wire::WritePolicy;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Remote project-root token used when a command gets none
    pub remote_root: Option<String>,
    /// "lenient" or "strict"
    pub write_policy: Option<String>,
    /// "delete-create" or "record"
    pub rename_mode: Option<String>,
    /// Let `patch apply` delete and move files
    pub apply_deletes: bool,
}

impl Settings {
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        let settings: Self =
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn write_policy(&self) -> Result<Option<WritePolicy>> {
        self.write_policy
            .as_deref()
            .map(|s| s.parse::<WritePolicy>().map_err(anyhow::Error::msg))
            .transpose()
    }

    pub fn rename_mode(&self) -> Result<Option<RenameMode>> {
        self.rename_mode
            .as_deref()
            .map(|s| s.parse::<RenameMode>().map_err(anyhow::Error::msg))
            .transpose()
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TCR_CONFIG").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("tcr").join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
