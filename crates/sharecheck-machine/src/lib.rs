//! # sharecheck-machine
//!
//! Everything around the share check that knows about virtual machines:
//! - **Connection URIs**: [`uri::ConnectionUri`] parses the active
//!   connection and exposes the forwarded port.
//! - **Backends**: [`provider::VmType`] names the virtualization backend and
//!   carries its capabilities.
//! - **Discovery**: [`store::MachineStore`] reads machine configurations
//!   from disk and finds the one behind a connection.
//! - **Warning**: [`warning::warn_if_machine_volumes_unavailable`] ties it
//!   together and reports unshared bind mounts.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod provider;
pub mod store;
pub mod uri;
pub mod warning;

pub use provider::VmType;
pub use store::{MachineConfig, MachineStore};
pub use uri::ConnectionUri;
pub use warning::{format_warning, warn_if_machine_volumes_unavailable};
