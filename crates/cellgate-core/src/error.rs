// ── Core error types ──
//
// Errors surfaced by the platform and host layers. The door-state handlers
// themselves never fail; everything here happens before or around them.

use thiserror::Error;

use crate::host::HostError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Duplicate device id: {id}")]
    DuplicateDevice { id: String },

    // ── Host errors ──────────────────────────────────────────────────
    #[error(transparent)]
    Host(#[from] HostError),

    // ── API errors ───────────────────────────────────────────────────
    #[error("API error: {0}")]
    Api(#[from] cellgate_api::Error),
}
