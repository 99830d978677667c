//! Device Information Service: read-only identity strings and a PnP ID.
//!
//! HID-over-GATT hosts read this next to the HID service. Nothing is ever
//! written or notified, so registration is all there is.

use heapless::Vec;

use super::gatt::{uuid, AttributeRegistry, CharacteristicDef, Properties, ServiceHandles};
use crate::config::{
    DIS_FIRMWARE_REVISION, DIS_HARDWARE_REVISION, DIS_MANUFACTURER, DIS_MODEL_NUMBER,
    DIS_PRODUCT_VERSION, DIS_SERIAL_NUMBER, DIS_SOFTWARE_REVISION, DIS_VENDOR_ID,
    MAX_SERVICE_CHARACTERISTICS,
};
use crate::error::TransportError;

/// PnP ID size in bytes.
pub const PNP_ID_SIZE: usize = 7;

/// Who assigned the PnP vendor id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum VendorIdSource {
    BluetoothSig = 0x01,
    UsbImplementersForum = 0x02,
}

/// PnP ID characteristic value (DIS 1.1, section 3.9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PnpId {
    pub vendor_id_source: VendorIdSource,
    pub vendor_id: u16,
    pub product_id: u16,
    pub product_version: u16,
}

impl PnpId {
    /// Encode as `[source][vendor lo hi][product lo hi][version lo hi]`.
    pub fn to_bytes(&self) -> [u8; PNP_ID_SIZE] {
        let [vendor_lo, vendor_hi] = self.vendor_id.to_le_bytes();
        let [product_lo, product_hi] = self.product_id.to_le_bytes();
        let [version_lo, version_hi] = self.product_version.to_le_bytes();
        [
            self.vendor_id_source as u8,
            vendor_lo,
            vendor_hi,
            product_lo,
            product_hi,
            version_lo,
            version_hi,
        ]
    }
}

/// Contents of the Device Information Service. Empty strings are left out
/// of the attribute table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceInformation<'a> {
    pub manufacturer: &'a str,
    pub model_number: &'a str,
    pub serial_number: &'a str,
    pub hardware_revision: &'a str,
    pub firmware_revision: &'a str,
    pub software_revision: &'a str,
    pub pnp_id: PnpId,
}

impl DeviceInformation<'static> {
    /// The bridge's identity, for the firmware image with `product_id`.
    pub const fn new(product_id: u16) -> Self {
        Self {
            manufacturer: DIS_MANUFACTURER,
            model_number: DIS_MODEL_NUMBER,
            serial_number: DIS_SERIAL_NUMBER,
            hardware_revision: DIS_HARDWARE_REVISION,
            firmware_revision: DIS_FIRMWARE_REVISION,
            software_revision: DIS_SOFTWARE_REVISION,
            pnp_id: PnpId {
                vendor_id_source: VendorIdSource::BluetoothSig,
                vendor_id: DIS_VENDOR_ID,
                product_id,
                product_version: DIS_PRODUCT_VERSION,
            },
        }
    }
}

impl DeviceInformation<'_> {
    /// Add the service to the attribute table. Call once per boot.
    pub fn register<R: AttributeRegistry>(&self, registry: &mut R) -> Result<ServiceHandles, TransportError> {
        let pnp_id = self.pnp_id.to_bytes();
        let strings = [
            (uuid::MANUFACTURER_NAME, self.manufacturer),
            (uuid::MODEL_NUMBER, self.model_number),
            (uuid::SERIAL_NUMBER, self.serial_number),
            (uuid::HARDWARE_REVISION, self.hardware_revision),
            (uuid::FIRMWARE_REVISION, self.firmware_revision),
            (uuid::SOFTWARE_REVISION, self.software_revision),
        ];

        let mut characteristics: Vec<CharacteristicDef<'_>, MAX_SERVICE_CHARACTERISTICS> = Vec::new();
        for (uuid, value) in strings.into_iter().filter(|(_, value)| !value.is_empty()) {
            characteristics
                .push(CharacteristicDef::new(uuid, Properties::READ, value.as_bytes()))
                .map_err(|_| TransportError::HandleTableFull)?;
        }
        characteristics
            .push(CharacteristicDef::new(uuid::PNP_ID, Properties::READ, &pnp_id))
            .map_err(|_| TransportError::HandleTableFull)?;

        let handles = registry.register_service(uuid::DEVICE_INFORMATION, &characteristics)?;
        if handles.len() != characteristics.len() {
            return Err(TransportError::HandleTableFull);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Device Information registered ({} characteristics)", handles.len());
        Ok(handles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KEYBOARD_PRODUCT_ID, MOUSE_PRODUCT_ID};
    use crate::service::gatt::AttributeHandles;

    #[derive(Default)]
    struct RecordingRegistry {
        service: Option<u16>,
        characteristics: std::vec::Vec<(u16, Properties, std::vec::Vec<u8>)>,
    }

    impl AttributeRegistry for RecordingRegistry {
        fn register_service(
            &mut self,
            uuid: u16,
            characteristics: &[CharacteristicDef<'_>],
        ) -> Result<ServiceHandles, TransportError> {
            self.service = Some(uuid);
            let mut handles = ServiceHandles::new();
            for (i, def) in characteristics.iter().enumerate() {
                self.characteristics
                    .push((def.uuid, def.props, def.value.to_vec()));
                handles
                    .push(AttributeHandles {
                        value: 20 + i as u16,
                        cccd: None,
                    })
                    .map_err(|_| TransportError::HandleTableFull)?;
            }
            Ok(handles)
        }
    }

    #[test]
    fn pnp_id_layout() {
        let pnp = DeviceInformation::new(MOUSE_PRODUCT_ID).pnp_id;
        assert_eq!(pnp.to_bytes(), [0x01, 0x59, 0x00, 0x02, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn registers_strings_then_pnp_id() {
        let mut registry = RecordingRegistry::default();
        let handles = DeviceInformation::new(KEYBOARD_PRODUCT_ID)
            .register(&mut registry)
            .unwrap();

        assert_eq!(registry.service, Some(uuid::DEVICE_INFORMATION));
        assert_eq!(handles.len(), 7);
        let uuids: std::vec::Vec<u16> = registry.characteristics.iter().map(|c| c.0).collect();
        assert_eq!(
            uuids,
            [
                uuid::MANUFACTURER_NAME,
                uuid::MODEL_NUMBER,
                uuid::SERIAL_NUMBER,
                uuid::HARDWARE_REVISION,
                uuid::FIRMWARE_REVISION,
                uuid::SOFTWARE_REVISION,
                uuid::PNP_ID,
            ]
        );
        assert!(registry.characteristics.iter().all(|c| c.1 == Properties::READ));
        assert_eq!(registry.characteristics[0].2, b"ARM");
        assert_eq!(registry.characteristics[1].2, b"CYNTEC");
        assert_eq!(
            registry.characteristics[6].2,
            [0x01, 0x59, 0x00, 0x01, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn empty_strings_are_skipped() {
        let mut info = DeviceInformation::new(KEYBOARD_PRODUCT_ID);
        info.serial_number = "";
        info.software_revision = "";

        let mut registry = RecordingRegistry::default();
        let handles = info.register(&mut registry).unwrap();

        assert_eq!(handles.len(), 5);
        assert!(registry
            .characteristics
            .iter()
            .all(|c| c.0 != uuid::SERIAL_NUMBER && c.0 != uuid::SOFTWARE_REVISION));
    }

    #[test]
    fn short_handle_table_is_rejected() {
        struct Truncating;
        impl AttributeRegistry for Truncating {
            fn register_service(
                &mut self,
                _uuid: u16,
                _characteristics: &[CharacteristicDef<'_>],
            ) -> Result<ServiceHandles, TransportError> {
                Ok(ServiceHandles::new())
            }
        }

        assert_eq!(
            DeviceInformation::new(KEYBOARD_PRODUCT_ID).register(&mut Truncating),
            Err(TransportError::HandleTableFull)
        );
    }
}
