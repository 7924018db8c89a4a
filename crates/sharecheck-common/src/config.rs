//! Connection configuration consumed by the machine volume check.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SharecheckError};

/// Describes the container engine connection a command runs against.
///
/// The check never reads this from ambient state; callers build it once
/// (config file plus CLI overrides) and pass it down explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Whether the engine runs inside a managed virtual machine.
    pub machine_mode: bool,
    /// URI of the active connection, e.g. `ssh://core@127.0.0.1:52417/run/podman.sock`.
    pub uri: Option<String>,
    /// Root of the on-disk machine store.
    pub machine_dir: PathBuf,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            machine_mode: true,
            uri: None,
            machine_dir: crate::constants::default_machine_dir(),
        }
    }
}

impl ConnectionConfig {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| SharecheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded connection configuration");
        Ok(config)
    }

    /// Loads a configuration file, returning the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
