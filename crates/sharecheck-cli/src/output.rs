//! Formatted output helpers for CLI commands.

use sharecheck_common::types::MountEntry;

/// Joins the mount sources into one table cell, `-` when there are none.
#[must_use]
pub fn format_mounts(mounts: &[MountEntry]) -> String {
    let sources: Vec<&str> = mounts
        .iter()
        .map(|m| m.source.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if sources.is_empty() {
        return "-".to_string();
    }
    sources.join(", ")
}
