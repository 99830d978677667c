//! HID-over-GATT service and the Device Information Service.

pub mod device_info;
pub mod gatt;
pub mod hid_service;

pub use device_info::{DeviceInformation, PnpId, VendorIdSource};
pub use gatt::{
    AttributeHandles, AttributeRegistry, AttributeWriteHandler, CharacteristicDef, Properties,
    ServiceHandles, Transport,
};
pub use hid_service::{HidHandles, HidService, Registration};
