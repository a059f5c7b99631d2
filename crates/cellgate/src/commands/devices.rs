//! `cellgate devices`: list configured gates.

use serde::Serialize;
use tabled::Tabled;

use cellgate_config::{Config, DeviceEntry};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Accessory")]
    accessory: String,
    #[tabled(rename = "Payload")]
    payload: String,
}

/// What gets printed for a gate. The payload is reduced to its field names.
#[derive(Serialize)]
struct DeviceSummary {
    id: String,
    name: String,
    module_type: String,
    serial_number: String,
    accessory_uuid: String,
    payload_fields: Vec<String>,
}

impl From<&DeviceEntry> for DeviceSummary {
    fn from(entry: &DeviceEntry) -> Self {
        let record = entry.to_record();
        Self {
            accessory_uuid: record.accessory_uuid().to_string(),
            payload_fields: record.config.field_names().map(String::from).collect(),
            id: record.id,
            name: record.name,
            module_type: record.module_type,
            serial_number: record.serial_number,
        }
    }
}

impl From<&DeviceSummary> for DeviceRow {
    fn from(d: &DeviceSummary) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            model: d.module_type.clone(),
            serial: d.serial_number.clone(),
            accessory: d.accessory_uuid.clone(),
            payload: d.payload_fields.join(", "),
        }
    }
}

pub fn handle(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let summaries: Vec<DeviceSummary> = cfg.devices.iter().map(DeviceSummary::from).collect();

    let out = output::render_list(
        &global.output,
        &summaries,
        |d| DeviceRow::from(d),
        |d| d.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
