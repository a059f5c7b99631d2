//! HomeKit "Garage Door Opener" adapter for Cellgate gates.
//!
//! This crate owns the domain model and the glue between a bridge host and
//! the Cellgate cloud:
//!
//! - **[`GateAccessory`]**: binds one [`DeviceRecord`] to a host accessory,
//!   registers the door-state characteristic handlers, and fires a
//!   momentary-actuation request on every OPEN write.
//!
//! - **[`host`]**: the capability interface a bridge host implements
//!   ([`Accessory`], [`Service`]) plus [`MemoryAccessory`], an in-process
//!   host used by the CLI and the tests.
//!
//! - **[`GatePlatform`]**: the discovery loop; turns a list of configured
//!   device records into ready accessories sharing one HTTP client.
//!
//! - **Domain model** ([`model`]): [`DeviceRecord`], the opaque
//!   [`GateConfig`] payload, and the HomeKit [`DoorState`] vocabulary.

pub mod accessory;
pub mod error;
pub mod host;
pub mod model;
pub mod platform;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessory::{GateAccessory, MANUFACTURER};
pub use error::CoreError;
pub use host::{
    Accessory, Characteristic, CharacteristicValue, HostError, MemoryAccessory, Service,
    ServiceKind,
};
pub use model::{DeviceRecord, DoorState, GateConfig};
pub use platform::{GatePlatform, PlatformAccessory};

// The HTTP client is part of the constructor surface.
pub use cellgate_api::{ActuationClient, TransportConfig};
