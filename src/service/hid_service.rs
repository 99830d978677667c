//! HID Service adapter: binds a [`ReportEncoder`] to the five HIDS
//! characteristics and keeps them in sync with the host.

use super::gatt::{
    uuid, AttributeHandles, AttributeRegistry, AttributeWriteHandler, CharacteristicDef,
    Properties, Transport, REPORT_TYPE_INPUT,
};
use crate::error::{Error, TransportError};
use crate::hid::{ControlPoint, ProtocolMode, ReportEncoder};

/// Attribute handles of a registered HID service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidHandles {
    pub protocol_mode: u16,
    pub report_map: u16,
    pub report: u16,
    pub report_cccd: u16,
    pub hid_information: u16,
    pub control_point: u16,
}

/// Proof that the HID service has been added to the attribute table.
///
/// The stack accepts a service only once per boot, so the firmware owns
/// one `Registration` and passes it to every [`HidService::new`]. Only
/// the first call registers; later calls reuse the recorded handles.
#[derive(Debug, Default)]
pub struct Registration {
    handles: Option<HidHandles>,
}

impl Registration {
    pub const fn new() -> Self {
        Self { handles: None }
    }

    pub fn is_registered(&self) -> bool {
        self.handles.is_some()
    }

    pub fn handles(&self) -> Option<HidHandles> {
        self.handles
    }
}

/// A registered HID service for one profile.
pub struct HidService<T, const N: usize> {
    handles: HidHandles,
    encoder: ReportEncoder<N>,
    control_point: ControlPoint,
    transport: T,
}

impl<T: Transport, const N: usize> HidService<T, N> {
    /// Register the service (first call per `registration`) and take
    /// ownership of the encoder and transport.
    pub fn new<R: AttributeRegistry>(
        registration: &mut Registration,
        registry: &mut R,
        transport: T,
        encoder: ReportEncoder<N>,
    ) -> Result<Self, Error> {
        let handles = match registration.handles {
            Some(handles) => handles,
            None => {
                let handles = register(registry, &encoder)?;
                #[cfg(feature = "defmt")]
                defmt::info!("HID service registered: {}", handles);
                registration.handles = Some(handles);
                handles
            }
        };

        Ok(Self {
            handles,
            encoder,
            control_point: ControlPoint::default(),
            transport,
        })
    }

    pub fn handles(&self) -> &HidHandles {
        &self.handles
    }

    pub fn encoder(&self) -> &ReportEncoder<N> {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut ReportEncoder<N> {
        &mut self.encoder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Last Control Point value written by the host.
    pub fn control_point(&self) -> ControlPoint {
        self.control_point
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_link_connected()
    }

    /// Push the current report to the host.
    pub fn notify(&mut self) -> Result<(), TransportError> {
        let report = *self.encoder.report();
        self.transport
            .update_characteristic(self.handles.report, report.as_bytes())
    }
}

impl<T, const N: usize> AttributeWriteHandler for HidService<T, N> {
    fn on_attribute_written(&mut self, handle: u16, data: &[u8]) {
        let h = &self.handles;
        if handle == h.control_point {
            if let [value] = data {
                self.control_point = ControlPoint(*value);
                #[cfg(feature = "defmt")]
                defmt::debug!("HID control point: {}", value);
            }
        } else if handle == h.report {
            if data.len() <= 4 {
                match self.encoder.write_report_prefix(data) {
                    Ok(()) => {}
                    Err(_e) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("Report write rejected: {}", _e);
                    }
                }
            }
        } else if handle == h.protocol_mode {
            if let [value] = data {
                let accepted = ProtocolMode::try_from(*value)
                    .map(|mode| self.encoder.set_protocol_mode(mode))
                    .unwrap_or(false);
                if !accepted {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Ignoring protocol mode {}", value);
                }
            }
        } else if handle == h.report_cccd {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "Input report notifications: {}",
                data.first().is_some_and(|flags| flags & 0x01 != 0)
            );
        }
    }
}

/// Characteristic order in the service table.
const PROTOCOL_MODE: usize = 0;
const REPORT_MAP: usize = 1;
const REPORT: usize = 2;
const HID_INFORMATION: usize = 3;
const CONTROL_POINT: usize = 4;
const CHARACTERISTIC_COUNT: usize = 5;

fn register<R: AttributeRegistry, const N: usize>(
    registry: &mut R,
    encoder: &ReportEncoder<N>,
) -> Result<HidHandles, TransportError> {
    let protocol_mode = [encoder.protocol_mode() as u8];
    let information = encoder.information().to_bytes();
    let control_point = [ControlPoint::default().0];

    let characteristics: [CharacteristicDef<'_>; CHARACTERISTIC_COUNT] = [
        CharacteristicDef::new(
            uuid::PROTOCOL_MODE,
            Properties::READ | Properties::WRITE_WITHOUT_RESPONSE,
            &protocol_mode,
        ),
        CharacteristicDef::new(uuid::REPORT_MAP, Properties::READ, encoder.report_map()),
        CharacteristicDef::new(
            uuid::REPORT,
            Properties::READ | Properties::WRITE | Properties::NOTIFY,
            encoder.report().as_bytes(),
        )
        .with_report_reference(0, REPORT_TYPE_INPUT),
        CharacteristicDef::new(uuid::HID_INFORMATION, Properties::READ, &information),
        CharacteristicDef::new(
            uuid::HID_CONTROL_POINT,
            Properties::WRITE_WITHOUT_RESPONSE,
            &control_point,
        ),
    ];

    let handles = registry.register_service(uuid::HUMAN_INTERFACE_DEVICE, &characteristics)?;
    if handles.len() != CHARACTERISTIC_COUNT {
        return Err(TransportError::HandleTableFull);
    }

    let value = |i: usize| handles[i].value;
    let report: AttributeHandles = handles[REPORT];
    Ok(HidHandles {
        protocol_mode: value(PROTOCOL_MODE),
        report_map: value(REPORT_MAP),
        report: report.value,
        report_cccd: report.cccd.ok_or(TransportError::RegisterFailed)?,
        hid_information: value(HID_INFORMATION),
        control_point: value(CONTROL_POINT),
    })
}
