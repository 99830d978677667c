//! GATT-level vocabulary shared by the HID service and the BLE stack glue.
//!
//! The library never talks to a BLE stack directly. It describes the
//! attributes it needs with [`CharacteristicDef`] and talks to the stack
//! through three capabilities:
//! - [`AttributeRegistry`]: one-shot service registration
//! - [`Transport`]: value updates and link state
//! - [`AttributeWriteHandler`]: implemented by us, invoked by the stack

use heapless::Vec;

use crate::config::MAX_SERVICE_CHARACTERISTICS;
use crate::error::TransportError;

/// 16-bit SIG UUIDs used by the HID and Device Information services.
pub mod uuid {
    pub const HUMAN_INTERFACE_DEVICE: u16 = 0x1812;
    pub const HID_INFORMATION: u16 = 0x2A4A;
    pub const REPORT_MAP: u16 = 0x2A4B;
    pub const HID_CONTROL_POINT: u16 = 0x2A4C;
    pub const REPORT: u16 = 0x2A4D;
    pub const PROTOCOL_MODE: u16 = 0x2A4E;
    pub const REPORT_REFERENCE: u16 = 0x2908;

    pub const DEVICE_INFORMATION: u16 = 0x180A;
    pub const MODEL_NUMBER: u16 = 0x2A24;
    pub const SERIAL_NUMBER: u16 = 0x2A25;
    pub const FIRMWARE_REVISION: u16 = 0x2A26;
    pub const HARDWARE_REVISION: u16 = 0x2A27;
    pub const SOFTWARE_REVISION: u16 = 0x2A28;
    pub const MANUFACTURER_NAME: u16 = 0x2A29;
    pub const PNP_ID: u16 = 0x2A50;
}

/// Report Reference descriptor report type for an input report.
pub const REPORT_TYPE_INPUT: u8 = 0x01;

bitflags::bitflags! {
    /// Characteristic properties.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Properties: u8 {
        const READ = 0x02;
        const WRITE_WITHOUT_RESPONSE = 0x04;
        const WRITE = 0x08;
        const NOTIFY = 0x10;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Properties {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Properties({=u8:#04x})", self.bits())
    }
}

/// One characteristic to register, with its initial value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacteristicDef<'a> {
    pub uuid: u16,
    pub props: Properties,
    pub value: &'a [u8],
    /// Largest value the attribute may hold.
    pub max_len: u16,
    /// `[report id, report type]` for a Report Reference descriptor.
    pub report_reference: Option<[u8; 2]>,
}

impl<'a> CharacteristicDef<'a> {
    pub const fn new(uuid: u16, props: Properties, value: &'a [u8]) -> Self {
        Self {
            uuid,
            props,
            value,
            max_len: value.len() as u16,
            report_reference: None,
        }
    }

    pub const fn with_report_reference(mut self, report_id: u8, report_type: u8) -> Self {
        self.report_reference = Some([report_id, report_type]);
        self
    }
}

/// Handles the stack assigned to one characteristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttributeHandles {
    pub value: u16,
    /// Client Characteristic Configuration, present for notifying characteristics.
    pub cccd: Option<u16>,
}

/// Handles returned by [`AttributeRegistry::register_service`], in the
/// order the characteristics were given.
pub type ServiceHandles = Vec<AttributeHandles, MAX_SERVICE_CHARACTERISTICS>;

/// Adds a primary service to the stack's attribute table.
pub trait AttributeRegistry {
    fn register_service(
        &mut self,
        uuid: u16,
        characteristics: &[CharacteristicDef<'_>],
    ) -> Result<ServiceHandles, TransportError>;
}

/// Pushes attribute values to the connected host.
pub trait Transport {
    /// Update the stored value of `handle` and notify it if the host
    /// subscribed. Fire-and-forget: a failure only means this update was
    /// not delivered.
    fn update_characteristic(&mut self, handle: u16, value: &[u8]) -> Result<(), TransportError>;

    fn is_link_connected(&self) -> bool;
}

/// Receives attribute writes made by the host.
pub trait AttributeWriteHandler {
    fn on_attribute_written(&mut self, handle: u16, data: &[u8]);
}
