//! Domain primitive types used across the sharecheck workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A host directory shared into a virtual machine.
///
/// Only [`source`](Self::source) takes part in share checks; the other
/// fields are carried for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Host path exported into the VM.
    pub source: String,
    /// Path the source is mounted at inside the VM.
    #[serde(default)]
    pub target: String,
    /// Whether the VM sees the mount read-only.
    #[serde(default)]
    pub read_only: bool,
}

impl MountEntry {
    /// Creates a mount entry with only a source path.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for MountEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.target.is_empty() {
            return write!(f, "{}", self.source);
        }
        write!(f, "{}:{}", self.source, self.target)?;
        if self.read_only {
            write!(f, ":ro")?;
        }
        Ok(())
    }
}
