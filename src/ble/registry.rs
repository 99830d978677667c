//! [`AttributeRegistry`] over the SoftDevice GATT server builder.

use defmt::warn;
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{self, Attribute, Metadata};
use nrf_softdevice::ble::gatt_server::RegisterError;
use nrf_softdevice::ble::{SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

use crate::error::TransportError;
use crate::service::gatt::uuid::REPORT_REFERENCE;
use crate::service::{AttributeHandles, AttributeRegistry, CharacteristicDef, Properties, ServiceHandles};

/// Borrows the SoftDevice mutably for the duration of registration.
pub struct SoftdeviceRegistry<'a> {
    sd: &'a mut Softdevice,
}

impl<'a> SoftdeviceRegistry<'a> {
    pub fn new(sd: &'a mut Softdevice) -> Self {
        Self { sd }
    }
}

impl AttributeRegistry for SoftdeviceRegistry<'_> {
    fn register_service(
        &mut self,
        uuid: u16,
        characteristics: &[CharacteristicDef<'_>],
    ) -> Result<ServiceHandles, TransportError> {
        let mut service_builder =
            ServiceBuilder::new(self.sd, Uuid::new_16(uuid)).map_err(register_failed)?;
        let mut handles = ServiceHandles::new();

        for def in characteristics {
            let mut characteristic_builder = service_builder
                .add_characteristic(
                    Uuid::new_16(def.uuid),
                    Attribute::new(def.value)
                        .security(SecurityMode::JustWorks)
                        .variable_len(def.max_len),
                    Metadata::new(sd_properties(def.props)),
                )
                .map_err(register_failed)?;

            if let Some(reference) = def.report_reference {
                characteristic_builder
                    .add_descriptor(
                        Uuid::new_16(REPORT_REFERENCE),
                        Attribute::new(reference).security(SecurityMode::JustWorks),
                    )
                    .map_err(register_failed)?;
            }

            let characteristic_handles = characteristic_builder.build();
            let cccd = def
                .props
                .contains(Properties::NOTIFY)
                .then_some(characteristic_handles.cccd_handle);
            handles
                .push(AttributeHandles {
                    value: characteristic_handles.value_handle,
                    cccd,
                })
                .map_err(|_| TransportError::HandleTableFull)?;
        }

        let _service_handle = service_builder.build();
        Ok(handles)
    }
}

fn sd_properties(props: Properties) -> characteristic::Properties {
    let mut out = characteristic::Properties::new();
    if props.contains(Properties::READ) {
        out = out.read();
    }
    if props.contains(Properties::WRITE) {
        out = out.write();
    }
    if props.contains(Properties::WRITE_WITHOUT_RESPONSE) {
        out = out.write_without_response();
    }
    if props.contains(Properties::NOTIFY) {
        out = out.notify();
    }
    out
}

fn register_failed(e: RegisterError) -> TransportError {
    warn!("GATT registration failed: {:?}", e);
    TransportError::RegisterFailed
}
