//! On-disk machine configurations.
//!
//! The store is a directory with one subdirectory per backend, each holding
//! one JSON file per machine:
//!
//! ```text
//! <root>/qemu/podman-machine-default.json
//! <root>/applehv/dev.json
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sharecheck_common::constants::MACHINE_CONFIG_EXTENSION;
use sharecheck_common::error::{Result, SharecheckError};
use sharecheck_common::types::MountEntry;

use crate::provider::VmType;
use crate::uri::ConnectionUri;

/// SSH endpoint the engine connection is forwarded through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// Host port forwarded to the machine's SSH daemon.
    pub port: u16,
    /// Remote user name.
    #[serde(default)]
    pub user: String,
    /// Private key used to log in.
    #[serde(default)]
    pub identity_path: Option<PathBuf>,
}

/// A single machine as recorded in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Machine name.
    pub name: String,
    /// Backend the machine runs on, taken from the store directory.
    #[serde(skip_deserializing)]
    pub vm_type: VmType,
    /// SSH forwarding details.
    pub ssh: SshConfig,
    /// Host directories shared into the machine.
    #[serde(default)]
    pub mounts: Vec<MountEntry>,
}

/// Read-only view of a machine configuration directory.
#[derive(Debug, Clone)]
pub struct MachineStore {
    root: PathBuf,
}

impl MachineStore {
    /// Opens the store rooted at `root`. Nothing is read until queried.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the machines of `vm_type`.
    pub fn provider_dir(&self, vm_type: VmType) -> PathBuf {
        self.root.join(vm_type.as_str())
    }

    /// Loads every machine of one backend, sorted by file name.
    ///
    /// A missing directory yields no machines. Files that cannot be read or
    /// parsed are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend directory exists but cannot be listed.
    pub fn load_provider(&self, vm_type: VmType) -> Result<Vec<MachineConfig>> {
        let dir = self.provider_dir(vm_type);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| SharecheckError::Io {
            path: dir.clone(),
            source: e,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == MACHINE_CONFIG_EXTENSION)
            })
            .collect();
        files.sort();

        let machines = files
            .iter()
            .filter_map(|path| match load_machine(path, vm_type) {
                Ok(machine) => Some(machine),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping machine config");
                    None
                }
            })
            .collect();
        Ok(machines)
    }

    /// Loads every machine of every backend, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend directory exists but cannot be listed.
    pub fn list(&self) -> Result<Vec<MachineConfig>> {
        let mut machines = Vec::new();
        for vm_type in VmType::ALL {
            machines.extend(self.load_provider(vm_type)?);
        }
        machines.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(machines)
    }

    /// Finds the machine whose SSH port is `port`.
    ///
    /// Backends are searched in [`VmType::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns [`SharecheckError::NotFound`] if no machine matches, or an
    /// I/O error if a backend directory cannot be listed.
    pub fn find_by_port(&self, port: u16) -> Result<MachineConfig> {
        for vm_type in VmType::ALL {
            if let Some(machine) = self
                .load_provider(vm_type)?
                .into_iter()
                .find(|m| m.ssh.port == port)
            {
                tracing::debug!(name = %machine.name, %vm_type, port, "found machine for connection");
                return Ok(machine);
            }
        }
        Err(SharecheckError::NotFound {
            kind: "machine",
            id: format!("ssh port {port}"),
        })
    }

    /// Finds the machine behind a connection.
    ///
    /// # Errors
    ///
    /// Returns [`SharecheckError::NotFound`] if the URI carries no port or no
    /// machine listens on it.
    pub fn find_for_uri(&self, uri: &ConnectionUri) -> Result<MachineConfig> {
        tracing::debug!(
            scheme = uri.scheme(),
            host = uri.host().unwrap_or_default(),
            "looking up machine for connection"
        );
        let port = uri.port().ok_or_else(|| SharecheckError::NotFound {
            kind: "machine",
            id: format!("connection {uri} has no port"),
        })?;
        self.find_by_port(port)
    }
}

fn load_machine(path: &Path, vm_type: VmType) -> Result<MachineConfig> {
    let data = std::fs::read_to_string(path).map_err(|e| SharecheckError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut machine: MachineConfig = serde_json::from_str(&data)?;
    machine.vm_type = vm_type;
    Ok(machine)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_machine(root: &Path, vm_type: VmType, name: &str, port: u16, mounts: &[&str]) {
        let dir = root.join(vm_type.as_str());
        std::fs::create_dir_all(&dir).unwrap();
        let mounts: Vec<_> = mounts.iter().map(|s| serde_json::json!({ "source": s })).collect();
        let body = serde_json::json!({
            "name": name,
            "ssh": { "port": port, "user": "core" },
            "mounts": mounts,
        });
        std::fs::write(dir.join(format!("{name}.json")), body.to_string()).unwrap();
    }

    #[test]
    fn missing_root_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = MachineStore::new(tmp.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_merges_backends_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_machine(tmp.path(), VmType::Wsl, "zeta", 3000, &[]);
        write_machine(tmp.path(), VmType::Qemu, "alpha", 2000, &["/home"]);
        write_machine(tmp.path(), VmType::AppleHv, "mid", 2500, &["/Users"]);

        let machines = MachineStore::new(tmp.path()).list().unwrap();
        let names: Vec<_> = machines.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
        assert_eq!(machines[0].vm_type, VmType::Qemu);
        assert_eq!(machines[1].vm_type, VmType::AppleHv);
        assert_eq!(machines[2].vm_type, VmType::Wsl);
        assert_eq!(machines[0].mounts, vec![MountEntry::new("/home")]);
    }

    #[test]
    fn malformed_and_foreign_files_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_machine(tmp.path(), VmType::Qemu, "good", 2222, &[]);
        let dir = tmp.path().join("qemu");
        std::fs::write(dir.join("broken.json"), "{").unwrap();
        std::fs::write(dir.join("notes.txt"), "not a machine").unwrap();
        std::fs::create_dir_all(dir.join("sub.json")).unwrap();

        let machines = MachineStore::new(tmp.path()).load_provider(VmType::Qemu).unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].name, "good");
    }

    #[test]
    fn find_by_port_matches_ssh_port() {
        let tmp = tempfile::tempdir().unwrap();
        write_machine(tmp.path(), VmType::Qemu, "one", 2001, &[]);
        write_machine(tmp.path(), VmType::LibKrun, "two", 2002, &["/Users"]);
        let store = MachineStore::new(tmp.path());

        let found = store.find_by_port(2002).unwrap();
        assert_eq!(found.name, "two");
        assert_eq!(found.vm_type, VmType::LibKrun);
        assert!(matches!(
            store.find_by_port(9999),
            Err(SharecheckError::NotFound { kind: "machine", .. })
        ));
    }

    #[test]
    fn find_for_uri_requires_a_port() {
        let tmp = tempfile::tempdir().unwrap();
        write_machine(tmp.path(), VmType::Qemu, "one", 2001, &[]);
        let store = MachineStore::new(tmp.path());

        let with_port = ConnectionUri::parse("ssh://core@127.0.0.1:2001/run/podman.sock").unwrap();
        assert_eq!(store.find_for_uri(&with_port).unwrap().name, "one");

        let without = ConnectionUri::parse("unix:///run/podman.sock").unwrap();
        assert!(matches!(
            store.find_for_uri(&without),
            Err(SharecheckError::NotFound { .. })
        ));
    }
}
