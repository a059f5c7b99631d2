// ── Platform: configured devices -> accessories ──
//
// One pass over the configured device records. Each record gets an
// in-process accessory keyed by its derived UUID and a `GateAccessory`
// bound to it. All accessories share one HTTP client.

use std::collections::HashSet;

use cellgate_api::{ActuationClient, TransportConfig};
use tracing::{debug, info};

use crate::accessory::GateAccessory;
use crate::error::CoreError;
use crate::host::{Characteristic, CharacteristicValue, MemoryAccessory, ServiceKind};
use crate::model::{DeviceRecord, DoorState};

/// An accessory and the adapter bound to it.
#[derive(Debug)]
pub struct PlatformAccessory {
    pub accessory: MemoryAccessory,
    pub gate: GateAccessory,
}

impl PlatformAccessory {
    /// Read a garage-door characteristic through the host dispatch path.
    pub fn read_door(&self, characteristic: Characteristic) -> Result<CharacteristicValue, CoreError> {
        Ok(self
            .accessory
            .read(ServiceKind::GarageDoorOpener, characteristic)?)
    }

    /// Write `TargetDoorState` through the host dispatch path.
    pub fn request_target(&self, target: DoorState) -> Result<(), CoreError> {
        Ok(self.accessory.write(
            ServiceKind::GarageDoorOpener,
            Characteristic::TargetDoorState,
            target.into(),
        )?)
    }

    fn matches(&self, identifier: &str) -> bool {
        let record = self.gate.record();
        record.id == identifier
            || self.accessory.uuid().to_string() == identifier
            || record.name.eq_ignore_ascii_case(identifier)
    }
}

/// All accessories of one bridge.
#[derive(Debug)]
pub struct GatePlatform {
    accessories: Vec<PlatformAccessory>,
}

impl GatePlatform {
    /// Build accessories for `records`, sharing `client`.
    ///
    /// Fails if two records share an id, since they would map to the same
    /// accessory UUID.
    pub fn new(records: Vec<DeviceRecord>, client: &ActuationClient) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        let mut accessories = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id.clone()) {
                return Err(CoreError::DuplicateDevice { id: record.id });
            }

            let uuid = record.accessory_uuid();
            info!(device = %record.name, %uuid, "adding accessory");

            let mut accessory = MemoryAccessory::new(uuid, record.name.clone());
            let gate = GateAccessory::new(record, &mut accessory, client.clone());
            accessories.push(PlatformAccessory { accessory, gate });
        }

        debug!(count = accessories.len(), "platform ready");
        Ok(Self { accessories })
    }

    /// Build the HTTP client from `transport`, then the accessories.
    pub fn connect(
        records: Vec<DeviceRecord>,
        transport: &TransportConfig,
    ) -> Result<Self, CoreError> {
        let client = ActuationClient::new(transport)?;
        Self::new(records, &client)
    }

    pub fn accessories(&self) -> &[PlatformAccessory] {
        &self.accessories
    }

    pub fn len(&self) -> usize {
        self.accessories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessories.is_empty()
    }

    /// Find an accessory by device id, accessory UUID, or display name
    /// (case-insensitive).
    pub fn find(&self, identifier: &str) -> Result<&PlatformAccessory, CoreError> {
        self.accessories
            .iter()
            .find(|entry| entry.matches(identifier))
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: identifier.into(),
            })
    }

    /// Wait for every accessory's in-flight actuations.
    pub async fn settle(&self) {
        for entry in &self.accessories {
            entry.gate.settle().await;
        }
    }
}
