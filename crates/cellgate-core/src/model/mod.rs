// ── Domain model ──

pub mod device;
pub mod door;

pub use device::{ACCESSORY_NAMESPACE, DeviceRecord, GateConfig};
pub use door::DoorState;
