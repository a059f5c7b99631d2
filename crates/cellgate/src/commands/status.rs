//! `cellgate status`: read the door service through its handlers.

use std::path::Path;

use serde::Serialize;

use cellgate_config::Config;
use cellgate_core::{Characteristic, DoorState, PlatformAccessory};

use crate::cli::{DeviceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct DoorStatus {
    device: String,
    accessory_uuid: String,
    current_door_state: DoorState,
    target_door_state: DoorState,
    obstruction_detected: bool,
}

fn detail(s: &DoorStatus) -> String {
    [
        format!("Device:       {}", s.device),
        format!("Accessory:    {}", s.accessory_uuid),
        format!("Current:      {}", s.current_door_state),
        format!("Target:       {}", s.target_door_state),
        format!("Obstruction:  {}", if s.obstruction_detected { "yes" } else { "no" }),
    ]
    .join("\n")
}

fn door_state(entry: &PlatformAccessory, characteristic: Characteristic) -> Result<DoorState, CliError> {
    entry
        .read_door(characteristic)?
        .as_door_state()
        .ok_or_else(|| CliError::UnexpectedValue {
            characteristic: characteristic.to_string(),
        })
}

pub fn handle(
    args: &DeviceArgs,
    cfg: &Config,
    path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let platform = super::platform(cfg, path, global)?;
    let entry = platform.find(&args.device)?;

    let obstruction = Characteristic::ObstructionDetected;
    let status = DoorStatus {
        device: entry.gate.name().to_owned(),
        accessory_uuid: entry.accessory.uuid().to_string(),
        current_door_state: door_state(entry, Characteristic::CurrentDoorState)?,
        target_door_state: door_state(entry, Characteristic::TargetDoorState)?,
        obstruction_detected: entry.read_door(obstruction)?.as_bool().ok_or_else(|| {
            CliError::UnexpectedValue {
                characteristic: obstruction.to_string(),
            }
        })?,
    };

    let out = output::render_single(&global.output, &status, detail, |s| {
        s.current_door_state.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
