// ── Device record and gate payload ──

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Namespace for deriving accessory UUIDs from device ids.
pub const ACCESSORY_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_04b2_9a3e_5d7c_8e21_f0a4_b3c5_d6e7);

/// Opaque per-device payload for the vendor API.
///
/// The adapter never looks inside: whatever object was loaded is what gets
/// posted, field order included. `Debug` prints field names only since the
/// payload routinely carries account credentials.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateConfig(Map<String, Value>);

impl GateConfig {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Field names, in source order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for GateConfig {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// A gate as the bridge host knows it.
///
/// Field names on the wire follow the vendor's device listing, so a record
/// can be deserialized straight from the host's accessory context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceRecord {
    /// Unique identifier, stable across restarts.
    pub id: String,
    /// Display name shown in the Home app.
    pub name: String,
    pub module_type: String,
    #[serde(rename = "DeviceSerialNumber")]
    pub serial_number: String,
    pub config: GateConfig,
}

impl DeviceRecord {
    /// Deterministic accessory UUID for this device.
    pub fn accessory_uuid(&self) -> Uuid {
        Uuid::new_v5(&ACCESSORY_NAMESPACE, self.id.as_bytes())
    }
}
