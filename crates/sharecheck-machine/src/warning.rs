//! The unshared bind mount warning.

use sharecheck_common::config::ConnectionConfig;
use sharecheck_common::constants::{MACHINE_VOLUMES_DOC_URL, UNSHARED_WARNING_LEAD};
use sharecheck_core::{NativeFlavor, PathFlavor, UnsharedPathCollector};

use crate::store::MachineStore;
use crate::uri::ConnectionUri;

/// Formats the single warning line for `missing` paths.
pub fn format_warning(missing: &[String]) -> String {
    format!(
        "{UNSHARED_WARNING_LEAD}: {}. See {MACHINE_VOLUMES_DOC_URL} for details on configuring machine volumes.",
        missing.join(", ")
    )
}

/// Warns if any `--volume` bind source is not shared with the active machine.
///
/// Returns the emitted warning, or `None` when everything is shared or the
/// check does not apply. The check is advisory and never fails: lookups that
/// go wrong are logged at debug level and skip the check.
pub fn warn_if_machine_volumes_unavailable<S: AsRef<str>>(
    volume_specs: &[S],
    config: &ConnectionConfig,
    store: &MachineStore,
) -> Option<String> {
    let collector = UnsharedPathCollector::new(NativeFlavor::default());
    let missing = unshared_machine_paths(volume_specs, config, store, &collector)?;
    if missing.is_empty() {
        return None;
    }
    let message = format_warning(&missing);
    tracing::warn!("{message}");
    Some(message)
}

/// Runs the share check against the machine behind `config`.
///
/// Returns `None` when the check is bypassed: no specs, not in machine mode,
/// no usable connection URI, no matching machine, or a backend that shares
/// every host path by itself.
pub fn unshared_machine_paths<S: AsRef<str>, F: PathFlavor>(
    volume_specs: &[S],
    config: &ConnectionConfig,
    store: &MachineStore,
    collector: &UnsharedPathCollector<F>,
) -> Option<Vec<String>> {
    if volume_specs.is_empty() || !config.machine_mode {
        return None;
    }
    let raw = config.uri.as_deref().filter(|uri| !uri.is_empty())?;

    let uri = match ConnectionUri::parse(raw) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::debug!(error = %e, "skipping machine volume check, invalid connection URI");
            return None;
        }
    };

    let machine = match store.find_for_uri(&uri) {
        Ok(machine) => machine,
        Err(e) => {
            tracing::debug!(error = %e, "skipping machine volume check");
            return None;
        }
    };

    if machine.vm_type.auto_shares_all_paths() {
        tracing::debug!(
            machine = %machine.name,
            vm_type = %machine.vm_type,
            "backend shares all host paths, skipping machine volume check"
        );
        return None;
    }

    Some(collector.collect(volume_specs, &machine.mounts))
}
