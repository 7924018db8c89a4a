//! `sharecheck check` — Warn about volume sources the machine cannot see.

use clap::Args;
use sharecheck_common::config::ConnectionConfig;
use sharecheck_machine::{MachineStore, warn_if_machine_volumes_unavailable};

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Volume spec as given to `--volume` (`SRC:DEST[:OPTIONS]`). Repeatable.
    #[arg(short = 'v', long = "volume", value_name = "SPEC")]
    pub volumes: Vec<String>,
}

/// Executes the `check` command.
///
/// The check is advisory: unshared sources produce a warning on stderr and
/// the command still succeeds, as do lookups that fail along the way.
///
/// # Errors
///
/// Does not return an error; the result type matches the other commands.
pub fn execute(args: CheckArgs, config: &ConnectionConfig) -> anyhow::Result<()> {
    let store = MachineStore::new(&config.machine_dir);
    if warn_if_machine_volumes_unavailable(&args.volumes, config, &store).is_none() {
        tracing::debug!(volumes = args.volumes.len(), "no unshared bind mount sources reported");
    }
    Ok(())
}
