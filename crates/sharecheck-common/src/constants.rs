//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Fallback data directory when no home directory can be determined.
pub const SYSTEM_DATA_DIR: &str = "/var/lib/sharecheck";

/// Returns the data directory, preferring `$HOME/.sharecheck` and
/// falling back to `/var/lib/sharecheck`.
fn resolve_data_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(
            |_| PathBuf::from(SYSTEM_DATA_DIR),
            |home| PathBuf::from(home).join(".sharecheck"),
        )
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Returns the default configuration file path.
pub fn default_config_file() -> PathBuf {
    data_dir().join(CONFIG_FILE_NAME)
}

/// Returns the default machine store root.
pub fn default_machine_dir() -> PathBuf {
    data_dir().join(MACHINE_DIR_NAME)
}

/// File name of the connection configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Directory name of the machine store inside the data directory.
pub const MACHINE_DIR_NAME: &str = "machine";

/// File extension of machine configuration files.
pub const MACHINE_CONFIG_EXTENSION: &str = "json";

/// Documentation page explaining how to share host directories with a machine.
pub const MACHINE_VOLUMES_DOC_URL: &str =
    "https://docs.podman.io/en/latest/markdown/podman-machine-init.1.html#volume";

/// Lead-in sentence of the unshared bind mount warning.
pub const UNSHARED_WARNING_LEAD: &str =
    "The following bind mount sources are not shared with the machine and may not work";

/// Environment variable carrying the active connection URI.
pub const CONNECTION_ENV: &str = "CONTAINER_HOST";

/// Environment variable overriding the machine store root.
pub const MACHINE_DIR_ENV: &str = "SHARECHECK_MACHINE_DIR";
