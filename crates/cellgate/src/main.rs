mod cli;
mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cellgate_config::Config;

use crate::cli::{Cli, Command, ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Install the fmt subscriber.
///
/// `RUST_LOG` wins; otherwise `-v` picks the level, and without `-v` the
/// config's `log_level` applies.
fn init_tracing(verbosity: u8, configured: &str) {
    let filter = match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = config_file(&cli.global);

    // Completions and `config path` must work even with a broken config.
    let cfg = if needs_config(&cli.command) {
        cellgate_config::load_config_from(&path)?
    } else {
        Config::default()
    };

    init_tracing(cli.global.verbose, &cfg.log_level);
    tracing::debug!(path = %path.display(), devices = cfg.devices.len(), "config loaded");

    commands::dispatch(cli.command, &cfg, &path, &cli.global).await
}

fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(cellgate_config::config_path)
}

fn needs_config(command: &Command) -> bool {
    !matches!(
        command,
        Command::Completions(_)
            | Command::Config(ConfigArgs {
                command: ConfigCommand::Path
            })
    )
}
