//! CLI command definitions and dispatch.

pub mod check;
pub mod machines;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sharecheck_common::config::ConnectionConfig;
use sharecheck_common::constants::{CONNECTION_ENV, MACHINE_DIR_ENV, default_config_file};

/// sharecheck — find bind mounts a container machine cannot see.
#[derive(Parser, Debug)]
#[command(name = "sharecheck", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// URI of the active engine connection.
    #[arg(long, global = true, env = CONNECTION_ENV)]
    pub connection: Option<String>,

    /// Root of the machine configuration store.
    #[arg(long, global = true, env = MACHINE_DIR_ENV)]
    pub machine_dir: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat the engine as running natively (disables machine checks).
    #[arg(long, global = true)]
    pub no_machine: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Warn about volume sources that are not shared with the machine.
    Check(check::CheckArgs),
    /// List known machines and the host paths they share.
    Machines(machines::MachinesArgs),
}

impl Cli {
    /// Builds the connection configuration from the config file and flags.
    ///
    /// An explicit `--config` must load; a broken default file falls back
    /// to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file given with `--config` cannot be loaded.
    pub fn connection_config(&self) -> anyhow::Result<ConnectionConfig> {
        let mut config = if let Some(path) = &self.config {
            ConnectionConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        } else {
            let path = default_config_file();
            ConnectionConfig::load_or_default(&path).unwrap_or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable config");
                ConnectionConfig::default()
            })
        };

        if let Some(uri) = &self.connection {
            config.uri = Some(uri.clone());
        }
        if let Some(dir) = &self.machine_dir {
            config.machine_dir.clone_from(dir);
        }
        if self.no_machine {
            config.machine_mode = false;
        }
        Ok(config)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.connection_config()?;
    match cli.command {
        Command::Check(args) => check::execute(args, &config),
        Command::Machines(args) => machines::execute(args, &config),
    }
}
