// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use tcr_core::{AppliedResource, CvsFileStatus};
use tcr_engine::PreparedPatch;
use tcr_wire::PatchEntry;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Serializable view of a record header
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub kind: &'static str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<u64>,
}

impl<'a> From<&'a PatchEntry> for EntryView<'a> {
    fn from(entry: &'a PatchEntry) -> Self {
        match entry {
            PatchEntry::Created { name, len } => {
                EntryView { kind: "created", name, prev: None, len: Some(*len) }
            }
            PatchEntry::Modified { name, len } => {
                EntryView { kind: "modified", name, prev: None, len: Some(*len) }
            }
            PatchEntry::Deleted { name } => {
                EntryView { kind: "deleted", name, prev: None, len: None }
            }
            PatchEntry::Renamed { prev, new } => {
                EntryView { kind: "renamed", name: new, prev: Some(prev), len: None }
            }
        }
    }
}

/// One line per record: `<kind> <name> [(<len> bytes)]`
pub fn format_entry(entry: &PatchEntry) -> String {
    let view = EntryView::from(entry);
    match (view.prev, view.len) {
        (Some(prev), _) => format!(
            "{:<8} {} -> {}",
            view.kind,
            color::literal(prev),
            color::literal(view.name)
        ),
        (None, Some(len)) => format!(
            "{:<8} {} {}",
            view.kind,
            color::literal(view.name),
            color::context(&format!("({len} bytes)"))
        ),
        (None, None) => format!("{:<8} {}", view.kind, color::literal(view.name)),
    }
}

/// One line per applied resource; deletes and renames that were only
/// recorded are marked as such
pub fn format_resource(resource: &AppliedResource, deletes_applied: bool) -> String {
    let path = color::literal(&resource.path.display().to_string());
    let recorded =
        if deletes_applied { String::new() } else { format!(" {}", color::muted("(recorded)")) };
    match (&resource.status, &resource.prev_path) {
        (CvsFileStatus::Renamed, Some(prev)) => format!(
            "{:<8} {} -> {}{}",
            resource.status,
            color::literal(&prev.display().to_string()),
            path,
            recorded
        ),
        (CvsFileStatus::Deleted, _) => format!("{:<8} {}{}", resource.status, path, recorded),
        _ => format!("{:<8} {}", resource.status, path),
    }
}

pub fn print_entries(entries: &[PatchEntry], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let views: Vec<EntryView<'_>> = entries.iter().map(EntryView::from).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("Empty patch");
                return Ok(());
            }
            for entry in entries {
                println!("{}", format_entry(entry));
            }
            println!("\n{} record(s)", entries.len());
        }
    }
    Ok(())
}

pub fn print_applied(
    resources: &[AppliedResource],
    deletes_applied: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "deletes_applied": deletes_applied,
                "resources": resources,
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
        OutputFormat::Text => {
            for resource in resources {
                println!("{}", format_resource(resource, deletes_applied));
            }
            println!("\n{} resource(s) applied", resources.len());
        }
    }
    Ok(())
}

pub fn print_prepared(prepared: &PreparedPatch, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "path": prepared.path,
                "records": prepared.records,
                "skipped": prepared.skipped,
                "bytes": prepared.bytes,
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} {}",
                color::header("Wrote"),
                color::literal(&prepared.path.display().to_string()),
                color::context(&format!(
                    "({} record(s), {} bytes)",
                    prepared.records, prepared.bytes
                ))
            );
            for name in &prepared.skipped {
                println!("  skipped {}", color::muted(name));
            }
        }
    }
    Ok(())
}
