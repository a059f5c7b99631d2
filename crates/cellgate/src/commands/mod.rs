//! Command dispatch.

pub mod config_cmd;
pub mod devices;
pub mod open;
pub mod status;

use std::path::Path;
use std::time::Duration;

use cellgate_config::Config;
use cellgate_core::GatePlatform;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(
    cmd: Command,
    cfg: &Config,
    path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    tracing::debug!(command = ?cmd, "dispatching command");

    match cmd {
        Command::Devices => devices::handle(cfg, global),
        Command::Status(args) => status::handle(&args, cfg, path, global),
        Command::Open(args) => open::handle(&args, cfg, path, global).await,
        Command::Config(args) => config_cmd::handle(&args, cfg, path, global),
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "cellgate", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Build the accessories for every configured gate.
///
/// `--timeout` overrides the configured request timeout.
pub(crate) fn platform(
    cfg: &Config,
    path: &Path,
    global: &GlobalOpts,
) -> Result<GatePlatform, CliError> {
    if cfg.devices.is_empty() {
        return Err(CliError::NoDevices {
            path: path.display().to_string(),
        });
    }

    let transport = match global.timeout {
        Some(0) => {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Some(secs) => cfg.transport().with_timeout(Duration::from_secs(secs)),
        None => cfg.transport(),
    };

    Ok(GatePlatform::connect(cfg.device_records(), &transport)?)
}
