//! `cellgate open`: write OPEN to the target state and wait for the
//! resulting actuation to finish.
//!
//! The exit status does not reflect whether the vendor accepted the
//! request; a failed actuation is reported through the error log only, the
//! same way a bridge host would see it.

use std::path::Path;

use cellgate_config::Config;
use cellgate_core::DoorState;
use tracing::info;

use crate::cli::{DeviceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    args: &DeviceArgs,
    cfg: &Config,
    path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let platform = super::platform(cfg, path, global)?;
    let entry = platform.find(&args.device)?;

    entry.request_target(DoorState::Open)?;
    info!(device = %entry.gate.name(), in_flight = entry.gate.in_flight(), "open requested");

    entry.gate.settle().await;

    output::print_output(
        &format!("Open request sent to {}", entry.gate.name()),
        global.quiet,
    );
    Ok(())
}
