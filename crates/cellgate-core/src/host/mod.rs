//! Capability interface between the adapter and a bridge host.
//!
//! The host owns accessories, their services and characteristic dispatch.
//! The adapter only needs to obtain a service by kind, set static values on
//! it, and attach get/set handlers. [`MemoryAccessory`] is a complete
//! in-process implementation.

mod memory;

pub use memory::{MemoryAccessory, MemoryService};

use serde::Serialize;
use strum::Display;
use thiserror::Error;

use crate::model::DoorState;

/// Services an accessory can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ServiceKind {
    AccessoryInformation,
    GarageDoorOpener,
}

/// Characteristics this adapter touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Characteristic {
    Name,
    Manufacturer,
    Model,
    SerialNumber,
    CurrentDoorState,
    TargetDoorState,
    ObstructionDetected,
}

impl Characteristic {
    /// Whether a controller may write this characteristic.
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::TargetDoorState)
    }
}

/// A characteristic value as it travels between host and adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    Bool(bool),
    UInt8(u8),
    String(String),
}

impl CharacteristicValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::UInt8(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Decode a door-state code.
    pub fn as_door_state(&self) -> Option<DoorState> {
        self.as_u8().and_then(DoorState::from_code)
    }
}

impl From<bool> for CharacteristicValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u8> for CharacteristicValue {
    fn from(n: u8) -> Self {
        Self::UInt8(n)
    }
}

impl From<String> for CharacteristicValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for CharacteristicValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<DoorState> for CharacteristicValue {
    fn from(state: DoorState) -> Self {
        Self::UInt8(state.code())
    }
}

/// Read handler. Must return promptly; the host blocks a controller
/// request on it.
pub type GetHandler = Box<dyn Fn() -> CharacteristicValue + Send + Sync>;

/// Write handler. Completes from the host's point of view as soon as it
/// returns.
pub type SetHandler = Box<dyn Fn(CharacteristicValue) + Send + Sync>;

/// Errors raised by host-side dispatch.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("accessory has no {0} service")]
    NoSuchService(ServiceKind),

    #[error("{service} has no {characteristic} characteristic")]
    UnknownCharacteristic {
        service: ServiceKind,
        characteristic: Characteristic,
    },

    #[error("{0} is not writable")]
    NotWritable(Characteristic),
}

/// A service on a host accessory.
pub trait Service {
    /// Set a static value.
    fn set_characteristic(
        &mut self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> &mut Self;

    /// Attach a read handler, replacing any previous one.
    fn on_get(&mut self, characteristic: Characteristic, handler: GetHandler) -> &mut Self;

    /// Attach a write handler, replacing any previous one.
    fn on_set(&mut self, characteristic: Characteristic, handler: SetHandler) -> &mut Self;
}

/// A host accessory.
pub trait Accessory {
    type Service: Service;

    /// Look up an existing service.
    fn service(&self, kind: ServiceKind) -> Option<&Self::Service>;

    /// Obtain the service of this kind, creating it if absent.
    fn get_or_add_service(&mut self, kind: ServiceKind) -> &mut Self::Service;

    /// The accessory-information service every accessory carries.
    fn information(&mut self) -> &mut Self::Service {
        self.get_or_add_service(ServiceKind::AccessoryInformation)
    }
}
