//! Config subcommand handlers.

use std::path::Path;

use cellgate_config::{Config, DeviceEntry};
use cellgate_core::GateConfig;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Placeholder printed instead of gate payload values.
const REDACTED: &str = "****";

/// Copy of `cfg` with every gate payload value masked. Field names and
/// their order survive.
fn redacted(cfg: &Config) -> Config {
    let devices = cfg
        .devices
        .iter()
        .map(|d| DeviceEntry {
            config: GateConfig::new(
                d.config
                    .field_names()
                    .map(|f| (f.to_owned(), REDACTED.into()))
                    .collect(),
            ),
            ..d.clone()
        })
        .collect();

    Config {
        timeout: cfg.timeout,
        log_level: cfg.log_level.clone(),
        devices,
    }
}

/// Format the redacted config as TOML.
fn format_config_redacted(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(&redacted(cfg)).map_err(|e| CliError::Render(e.to_string()))
}

pub fn handle(
    args: &ConfigArgs,
    cfg: &Config,
    path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
        }
        ConfigCommand::Show => {
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => format_config_redacted(cfg)?,
                OutputFormat::Json | OutputFormat::JsonCompact => output::render_single(
                    &global.output,
                    &redacted(cfg),
                    |_| String::new(),
                    |_| String::new(),
                )?,
            };
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}
