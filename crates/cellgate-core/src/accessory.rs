//! The garage-door accessory adapter.
//!
//! Reports a closed, unobstructed door at all times and turns every OPEN
//! write into one momentary-actuation request. There is no feedback channel
//! from the gate, so nothing the cloud answers ever changes what the
//! characteristics report.

use std::sync::Arc;

use cellgate_api::ActuationClient;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::host::{Accessory, Characteristic, CharacteristicValue, Service, ServiceKind};
use crate::model::{DeviceRecord, DoorState, GateConfig};

/// Manufacturer reported on every accessory.
pub const MANUFACTURER: &str = "Cellgate";

/// Adapter for one gate.
///
/// Cheap to clone; clones share the device record, the HTTP client and the
/// set of in-flight actuations.
#[derive(Clone)]
pub struct GateAccessory {
    inner: Arc<GateInner>,
}

struct GateInner {
    record: DeviceRecord,
    client: ActuationClient,
    tasks: TaskTracker,
    /// Runtime current at construction, for writes dispatched from threads
    /// outside any runtime.
    runtime: Option<Handle>,
}

impl GateAccessory {
    /// Bind `record` to `accessory`.
    ///
    /// Fills in the accessory-information service, obtains the garage door
    /// service and attaches the door-state handlers to it. The handlers hold
    /// a clone of the returned adapter. If called inside a tokio runtime,
    /// actuations requested from non-runtime threads run on that runtime.
    pub fn new<A: Accessory>(
        record: DeviceRecord,
        accessory: &mut A,
        client: ActuationClient,
    ) -> Self {
        accessory
            .information()
            .set_characteristic(Characteristic::Manufacturer, MANUFACTURER.into())
            .set_characteristic(Characteristic::Model, record.module_type.as_str().into())
            .set_characteristic(
                Characteristic::SerialNumber,
                record.serial_number.as_str().into(),
            );

        let gate = Self {
            inner: Arc::new(GateInner {
                record,
                client,
                tasks: TaskTracker::new(),
                runtime: Handle::try_current().ok(),
            }),
        };

        let current = gate.clone();
        let target = gate.clone();
        let target_set = gate.clone();
        let obstruction = gate.clone();

        accessory
            .get_or_add_service(ServiceKind::GarageDoorOpener)
            .set_characteristic(Characteristic::Name, gate.name().into())
            .on_get(
                Characteristic::CurrentDoorState,
                Box::new(move || CharacteristicValue::from(current.current_door_state())),
            )
            .on_get(
                Characteristic::TargetDoorState,
                Box::new(move || CharacteristicValue::from(target.target_door_state())),
            )
            .on_set(
                Characteristic::TargetDoorState,
                Box::new(move |value: CharacteristicValue| target_set.handle_target_write(&value)),
            )
            .on_get(
                Characteristic::ObstructionDetected,
                Box::new(move || CharacteristicValue::from(obstruction.obstruction_detected())),
            );

        gate
    }

    pub fn record(&self) -> &DeviceRecord {
        &self.inner.record
    }

    pub fn name(&self) -> &str {
        &self.inner.record.name
    }

    /// The payload posted on every OPEN.
    pub fn config(&self) -> &GateConfig {
        &self.inner.record.config
    }

    pub fn accessory_uuid(&self) -> Uuid {
        self.inner.record.accessory_uuid()
    }

    // ── Characteristic handlers ──────────────────────────────────────

    /// Always `Closed`: the gate reports no position.
    #[allow(clippy::unused_self)]
    pub fn current_door_state(&self) -> DoorState {
        DoorState::Closed
    }

    /// Always `Closed`: the gate is momentary and closes on its own.
    #[allow(clippy::unused_self)]
    pub fn target_door_state(&self) -> DoorState {
        DoorState::Closed
    }

    /// Always `false`: there is no obstruction sensor.
    #[allow(clippy::unused_self)]
    pub fn obstruction_detected(&self) -> bool {
        false
    }

    /// Handle a requested target state.
    ///
    /// `Open` dispatches one actuation request and returns without waiting
    /// for it. Every other target is ignored; the vendor API has no close
    /// command.
    ///
    /// The request runs on the caller's runtime, else on the runtime the
    /// adapter was built in. With neither, the request is dropped and logged.
    pub fn set_target_door_state(&self, target: DoorState) {
        if target != DoorState::Open {
            debug!(device = %self.name(), %target, "ignoring target state");
            return;
        }

        let Some(runtime) = Handle::try_current()
            .ok()
            .or_else(|| self.inner.runtime.clone())
        else {
            error!(device = %self.name(), "no async runtime available, open request dropped");
            return;
        };

        debug!(device = %self.name(), "opening gate");

        let inner = Arc::clone(&self.inner);
        self.inner.tasks.spawn_on(
            async move {
                inner.actuate().await;
            },
            &runtime,
        );
    }

    fn handle_target_write(&self, value: &CharacteristicValue) {
        match value.as_door_state() {
            Some(target) => self.set_target_door_state(target),
            None => warn!(device = %self.name(), ?value, "unrecognized target door state"),
        }
    }

    // ── In-flight actuations ─────────────────────────────────────────

    /// Number of actuation requests dispatched but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.inner.tasks.len()
    }

    /// Wait for every actuation dispatched so far to finish.
    ///
    /// Never called by the handlers; a short-lived process uses it to avoid
    /// dropping requests on exit.
    pub async fn settle(&self) {
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        self.inner.tasks.reopen();
    }
}

impl GateInner {
    async fn actuate(&self) {
        match self.client.actuate(&self.record.config).await {
            Ok(receipt) => {
                debug!(
                    device = %self.record.name,
                    status = receipt.status,
                    body = %receipt.body,
                    "got actuation response"
                );
            }
            Err(e) => {
                error!(
                    device = %self.record.name,
                    transient = e.is_transient(),
                    "actuation request failed: {e}"
                );
            }
        }
    }
}

impl std::fmt::Debug for GateAccessory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateAccessory")
            .field("record", &self.inner.record)
            .field("endpoint", &self.inner.client.url().as_str())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::host::MemoryAccessory;

    fn gate() -> (MemoryAccessory, GateAccessory) {
        let record = DeviceRecord {
            id: "gate-1".into(),
            name: "Front Gate".into(),
            module_type: "EVO-WTM".into(),
            serial_number: "SN-001".into(),
            config: GateConfig::default(),
        };
        let client = ActuationClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:9/actuate").unwrap_or_else(|e| panic!("{e}")),
        );
        let mut accessory = MemoryAccessory::new(record.accessory_uuid(), record.name.clone());
        let gate = GateAccessory::new(record, &mut accessory, client);
        (accessory, gate)
    }

    fn read(acc: &MemoryAccessory, kind: ServiceKind, c: Characteristic) -> CharacteristicValue {
        acc.read(kind, c).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn declares_accessory_information() {
        let (acc, _gate) = gate();
        let info = ServiceKind::AccessoryInformation;

        for (characteristic, expected) in [
            (Characteristic::Manufacturer, "Cellgate"),
            (Characteristic::Model, "EVO-WTM"),
            (Characteristic::SerialNumber, "SN-001"),
        ] {
            assert_eq!(
                read(&acc, info, characteristic),
                CharacteristicValue::from(expected)
            );
        }
    }

    #[test]
    fn names_the_door_service() {
        let (acc, gate) = gate();
        assert_eq!(
            read(&acc, ServiceKind::GarageDoorOpener, Characteristic::Name),
            CharacteristicValue::from("Front Gate")
        );
        assert_eq!(gate.accessory_uuid(), acc.uuid());
    }

    #[test]
    fn registers_door_handlers() {
        let (acc, _gate) = gate();
        let door = acc
            .service(ServiceKind::GarageDoorOpener)
            .unwrap_or_else(|| panic!("door service missing"));

        assert!(door.has_get_handler(Characteristic::CurrentDoorState));
        assert!(door.has_get_handler(Characteristic::TargetDoorState));
        assert!(door.has_set_handler(Characteristic::TargetDoorState));
        assert!(door.has_get_handler(Characteristic::ObstructionDetected));
        assert!(!door.has_set_handler(Characteristic::CurrentDoorState));
    }

    #[test]
    fn reads_are_constant() {
        let (acc, gate) = gate();
        let door = ServiceKind::GarageDoorOpener;

        assert_eq!(gate.current_door_state(), DoorState::Closed);
        assert_eq!(gate.target_door_state(), DoorState::Closed);
        assert!(!gate.obstruction_detected());
        assert_eq!(
            read(&acc, door, Characteristic::CurrentDoorState),
            CharacteristicValue::UInt8(1)
        );
        assert_eq!(
            read(&acc, door, Characteristic::ObstructionDetected),
            CharacteristicValue::Bool(false)
        );
    }

    #[test]
    fn open_without_runtime_is_dropped() {
        let (acc, gate) = gate();
        acc.write(
            ServiceKind::GarageDoorOpener,
            Characteristic::TargetDoorState,
            DoorState::Open.into(),
        )
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(gate.in_flight(), 0);
        assert_eq!(gate.current_door_state(), DoorState::Closed);
    }

    #[test]
    fn non_open_targets_dispatch_nothing() {
        let (acc, gate) = gate();
        for state in [DoorState::Closed, DoorState::Stopped, DoorState::Closing] {
            acc.write(
                ServiceKind::GarageDoorOpener,
                Characteristic::TargetDoorState,
                state.into(),
            )
            .unwrap_or_else(|e| panic!("{e}"));
        }
        acc.write(
            ServiceKind::GarageDoorOpener,
            Characteristic::TargetDoorState,
            CharacteristicValue::UInt8(42),
        )
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn debug_does_not_leak_payload() {
        let (_acc, gate) = gate();
        let shown = format!("{gate:?}");
        assert!(shown.contains("Front Gate"));
        assert!(shown.contains("in_flight: 0"));
    }
}
