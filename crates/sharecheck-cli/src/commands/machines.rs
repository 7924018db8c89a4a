//! `sharecheck machines` — List machines and the host paths they share.

use anyhow::Context;
use clap::Args;
use sharecheck_common::config::ConnectionConfig;
use sharecheck_machine::MachineStore;

use crate::output::format_mounts;

/// Arguments for the `machines` command.
#[derive(Args, Debug)]
pub struct MachinesArgs {
    /// Print machine configurations as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `machines` command.
///
/// # Errors
///
/// Returns an error if a machine store directory cannot be listed.
#[allow(clippy::print_stdout)]
pub fn execute(args: MachinesArgs, config: &ConnectionConfig) -> anyhow::Result<()> {
    let store = MachineStore::new(&config.machine_dir);
    let machines = store
        .list()
        .with_context(|| format!("failed to read machine store {}", store.root().display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&machines)?);
        return Ok(());
    }

    if machines.is_empty() {
        println!("No machines found in {}.", store.root().display());
        return Ok(());
    }

    println!("{:<28} {:<10} {:<8} {}", "NAME", "VM TYPE", "PORT", "SHARED PATHS");
    for m in &machines {
        println!(
            "{:<28} {:<10} {:<8} {}",
            m.name,
            m.vm_type,
            m.ssh.port,
            format_mounts(&m.mounts)
        );
    }
    Ok(())
}
