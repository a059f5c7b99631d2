//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use cellgate_config::ConfigError;
use cellgate_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────

    #[error("Gate '{identifier}' not found")]
    #[diagnostic(
        code(cellgate::not_found),
        help("Run: cellgate devices to see configured gates")
    )]
    NotFound { identifier: String },

    #[error("No gates configured")]
    #[diagnostic(
        code(cellgate::no_devices),
        help("Add a [[devices]] table to {path}")
    )]
    NoDevices { path: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cellgate::validation))]
    Validation { field: String, reason: String },

    #[error("{characteristic} returned an unexpected value")]
    #[diagnostic(code(cellgate::host))]
    UnexpectedValue { characteristic: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(
        code(cellgate::config),
        help("Check the config file (cellgate config path) and CELLGATE_* variables")
    )]
    Config(#[from] ConfigError),

    // ── Core ─────────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(cellgate::core))]
    Core(CoreError),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(cellgate::render))]
    Render(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(cellgate::io))]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DeviceNotFound { identifier } => Self::NotFound { identifier },
            other => Self::Core(other),
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NoDevices { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::Validation { .. } => exit_code::USAGE,
            Self::UnexpectedValue { .. } | Self::Core(_) | Self::Render(_) | Self::Io(_) => {
                exit_code::GENERAL
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_not_found_maps_to_not_found() {
        let err = CliError::from(CoreError::DeviceNotFound {
            identifier: "back gate".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "Gate 'back gate' not found");
    }

    #[test]
    fn other_core_errors_are_general() {
        let err = CliError::from(CoreError::DuplicateDevice { id: "1".into() });
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
