// In-process host: stores static values and handlers per service and
// dispatches reads and writes to them.

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use super::{
    Accessory, Characteristic, CharacteristicValue, GetHandler, HostError, Service, ServiceKind,
    SetHandler,
};

/// A service held by [`MemoryAccessory`].
pub struct MemoryService {
    kind: ServiceKind,
    values: HashMap<Characteristic, CharacteristicValue>,
    getters: HashMap<Characteristic, GetHandler>,
    setters: HashMap<Characteristic, SetHandler>,
}

impl MemoryService {
    fn new(kind: ServiceKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
            getters: HashMap::new(),
            setters: HashMap::new(),
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Whether a read handler is attached.
    pub fn has_get_handler(&self, characteristic: Characteristic) -> bool {
        self.getters.contains_key(&characteristic)
    }

    /// Whether a write handler is attached.
    pub fn has_set_handler(&self, characteristic: Characteristic) -> bool {
        self.setters.contains_key(&characteristic)
    }

    /// Read a characteristic: the handler if one is attached, otherwise the
    /// static value.
    pub fn read(&self, characteristic: Characteristic) -> Result<CharacteristicValue, HostError> {
        if let Some(get) = self.getters.get(&characteristic) {
            return Ok(get());
        }
        self.values
            .get(&characteristic)
            .cloned()
            .ok_or(HostError::UnknownCharacteristic {
                service: self.kind,
                characteristic,
            })
    }

    /// Write a characteristic through its handler.
    ///
    /// Read-only characteristics are rejected even if a handler was
    /// registered for them.
    pub fn write(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), HostError> {
        if !characteristic.is_writable() {
            return Err(HostError::NotWritable(characteristic));
        }
        let set = self
            .setters
            .get(&characteristic)
            .ok_or(HostError::NotWritable(characteristic))?;
        set(value);
        Ok(())
    }
}

impl Service for MemoryService {
    fn set_characteristic(
        &mut self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> &mut Self {
        self.values.insert(characteristic, value);
        self
    }

    fn on_get(&mut self, characteristic: Characteristic, handler: GetHandler) -> &mut Self {
        self.getters.insert(characteristic, handler);
        self
    }

    fn on_set(&mut self, characteristic: Characteristic, handler: SetHandler) -> &mut Self {
        self.setters.insert(characteristic, handler);
        self
    }
}

impl fmt::Debug for MemoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryService")
            .field("kind", &self.kind)
            .field("values", &self.values)
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .field("setters", &self.setters.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// In-process accessory.
///
/// Starts with an accessory-information service, as a bridge host would.
#[derive(Debug)]
pub struct MemoryAccessory {
    uuid: Uuid,
    display_name: String,
    services: HashMap<ServiceKind, MemoryService>,
}

impl MemoryAccessory {
    pub fn new(uuid: Uuid, display_name: impl Into<String>) -> Self {
        let mut services = HashMap::new();
        services.insert(
            ServiceKind::AccessoryInformation,
            MemoryService::new(ServiceKind::AccessoryInformation),
        );
        Self {
            uuid,
            display_name: display_name.into(),
            services,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Dispatch a controller read.
    pub fn read(
        &self,
        kind: ServiceKind,
        characteristic: Characteristic,
    ) -> Result<CharacteristicValue, HostError> {
        self.services
            .get(&kind)
            .ok_or(HostError::NoSuchService(kind))?
            .read(characteristic)
    }

    /// Dispatch a controller write.
    pub fn write(
        &self,
        kind: ServiceKind,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), HostError> {
        self.services
            .get(&kind)
            .ok_or(HostError::NoSuchService(kind))?
            .write(characteristic, value)
    }
}

impl Accessory for MemoryAccessory {
    type Service = MemoryService;

    fn service(&self, kind: ServiceKind) -> Option<&MemoryService> {
        self.services.get(&kind)
    }

    fn get_or_add_service(&mut self, kind: ServiceKind) -> &mut MemoryService {
        self.services
            .entry(kind)
            .or_insert_with(|| MemoryService::new(kind))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn accessory() -> MemoryAccessory {
        MemoryAccessory::new(Uuid::nil(), "Test")
    }

    #[test]
    fn starts_with_information_service() {
        let acc = accessory();
        assert!(acc.service(ServiceKind::AccessoryInformation).is_some());
        assert!(acc.service(ServiceKind::GarageDoorOpener).is_none());
        assert_eq!(acc.display_name(), "Test");
    }

    #[test]
    fn get_or_add_is_idempotent() {
        let mut acc = accessory();
        acc.get_or_add_service(ServiceKind::GarageDoorOpener)
            .set_characteristic(Characteristic::Name, "Gate".into());
        acc.get_or_add_service(ServiceKind::GarageDoorOpener);

        let value = acc
            .read(ServiceKind::GarageDoorOpener, Characteristic::Name)
            .ok();
        assert_eq!(value, Some(CharacteristicValue::from("Gate")));
    }

    #[test]
    fn handler_takes_precedence_over_static_value() {
        let mut acc = accessory();
        acc.information()
            .set_characteristic(Characteristic::Model, "static".into())
            .on_get(Characteristic::Model, Box::new(|| CharacteristicValue::from("dynamic")));

        let value = acc
            .read(ServiceKind::AccessoryInformation, Characteristic::Model)
            .ok();
        assert_eq!(value, Some(CharacteristicValue::from("dynamic")));
    }

    #[test]
    fn write_calls_set_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut acc = accessory();
        acc.get_or_add_service(ServiceKind::GarageDoorOpener).on_set(
            Characteristic::TargetDoorState,
            Box::new(move |_: CharacteristicValue| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );

        for _ in 0..2 {
            acc.write(
                ServiceKind::GarageDoorOpener,
                Characteristic::TargetDoorState,
                0u8.into(),
            )
            .unwrap_or_else(|e| panic!("{e}"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn read_only_characteristic_rejects_registered_setter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut acc = accessory();
        acc.get_or_add_service(ServiceKind::GarageDoorOpener).on_set(
            Characteristic::CurrentDoorState,
            Box::new(move |_: CharacteristicValue| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let result = acc.write(
            ServiceKind::GarageDoorOpener,
            Characteristic::CurrentDoorState,
            0u8.into(),
        );
        assert!(matches!(
            result,
            Err(HostError::NotWritable(Characteristic::CurrentDoorState))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dispatch_errors() {
        let acc = accessory();

        assert!(matches!(
            acc.read(ServiceKind::GarageDoorOpener, Characteristic::Name),
            Err(HostError::NoSuchService(ServiceKind::GarageDoorOpener))
        ));
        assert!(matches!(
            acc.read(ServiceKind::AccessoryInformation, Characteristic::Model),
            Err(HostError::UnknownCharacteristic { .. })
        ));
        assert!(matches!(
            acc.write(
                ServiceKind::AccessoryInformation,
                Characteristic::Name,
                "x".into()
            ),
            Err(HostError::NotWritable(Characteristic::Name))
        ));
    }
}
