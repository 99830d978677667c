//! Legacy (31-byte) advertising payload builder.

use crate::config::{KEYBOARD_DEVICE_NAME, MOUSE_DEVICE_NAME};
use crate::error::Error;
use crate::service::gatt::uuid::HUMAN_INTERFACE_DEVICE;
use crate::session::Profile;

pub const MAXIMUM_ADVERTISE_LENGTH: usize = 31;

/// AD structure types.
pub mod ad_type {
    pub const FLAGS: u8 = 0x01;
    pub const COMPLETE_16BIT_SERVICES: u8 = 0x03;
    pub const COMPLETE_LOCAL_NAME: u8 = 0x09;
    pub const APPEARANCE: u8 = 0x19;
}

pub const LE_GENERAL_DISCOVERABLE: u8 = 0x02;
pub const BR_EDR_NOT_SUPPORTED: u8 = 0x04;

pub const APPEARANCE_KEYBOARD: u16 = 0x03C1;
pub const APPEARANCE_MOUSE: u16 = 0x03C2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvertisingData {
    data: [u8; MAXIMUM_ADVERTISE_LENGTH],
    used_bytes: usize,
}

impl Default for AdvertisingData {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvertisingData {
    pub const fn new() -> Self {
        Self {
            data: [0; MAXIMUM_ADVERTISE_LENGTH],
            used_bytes: 0,
        }
    }

    /// Flags, appearance, HID service UUID and complete local name for
    /// `profile`.
    pub fn for_profile(profile: Profile) -> Result<Self, Error> {
        let (appearance, name) = match profile {
            Profile::Keyboard => (APPEARANCE_KEYBOARD, KEYBOARD_DEVICE_NAME),
            Profile::Mouse => (APPEARANCE_MOUSE, MOUSE_DEVICE_NAME),
        };
        Self::new()
            .add_flags(LE_GENERAL_DISCOVERABLE | BR_EDR_NOT_SUPPORTED)?
            .add_appearance(appearance)?
            .add_services(&[HUMAN_INTERFACE_DEVICE])?
            .add_name(name.as_bytes())
    }

    fn add_internal(mut self, element_type: u8, element_data: &[u8]) -> Result<Self, Error> {
        let needed = self.used_bytes + 2 + element_data.len();
        if needed > MAXIMUM_ADVERTISE_LENGTH {
            return Err(Error::InvalidLength {
                expected: MAXIMUM_ADVERTISE_LENGTH,
                actual: needed,
            });
        }

        self.data[self.used_bytes] = (element_data.len() + 1) as u8;
        self.data[self.used_bytes + 1] = element_type;
        self.data[self.used_bytes + 2..needed].copy_from_slice(element_data);
        self.used_bytes = needed;

        Ok(self)
    }

    pub fn add_flags(self, flags: u8) -> Result<Self, Error> {
        self.add_internal(ad_type::FLAGS, &[flags])
    }

    pub fn add_appearance(self, appearance: u16) -> Result<Self, Error> {
        self.add_internal(ad_type::APPEARANCE, &appearance.to_le_bytes())
    }

    /// Complete list of 16-bit service UUIDs (up to 4).
    pub fn add_services(self, services: &[u16]) -> Result<Self, Error> {
        let mut bytes = [0u8; 8];
        let used = services.len() * 2;
        if used > bytes.len() {
            return Err(Error::InvalidLength {
                expected: bytes.len(),
                actual: used,
            });
        }
        for (chunk, uuid) in bytes.chunks_exact_mut(2).zip(services) {
            chunk.copy_from_slice(&uuid.to_le_bytes());
        }
        self.add_internal(ad_type::COMPLETE_16BIT_SERVICES, &bytes[..used])
    }

    pub fn add_name(self, name: &[u8]) -> Result<Self, Error> {
        self.add_internal(ad_type::COMPLETE_LOCAL_NAME, name)
    }

    pub fn get_slice(&self) -> &[u8] {
        &self.data[..self.used_bytes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_payload() {
        let adv = AdvertisingData::for_profile(Profile::Keyboard).unwrap();
        let mut expected = heapless::Vec::<u8, 31>::new();
        expected
            .extend_from_slice(&[0x02, 0x01, 0x06, 0x03, 0x19, 0xC1, 0x03, 0x03, 0x03, 0x12, 0x18])
            .unwrap();
        expected.extend_from_slice(&[13, 0x09]).unwrap();
        expected.extend_from_slice(b"HID_Keyboard").unwrap();
        assert_eq!(adv.get_slice(), &expected[..]);
    }

    #[test]
    fn mouse_payload_uses_mouse_appearance() {
        let adv = AdvertisingData::for_profile(Profile::Mouse).unwrap();
        assert_eq!(&adv.get_slice()[3..7], &[0x03, 0x19, 0xC2, 0x03]);
        assert!(adv.get_slice().ends_with(b"HID_Mouse"));
    }

    #[test]
    fn overflow_is_rejected() {
        let adv = AdvertisingData::new().add_flags(0x06).unwrap();
        let err = adv.add_name(&[b'x'; 27]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLength {
                expected: 31,
                actual: 32
            }
        );
    }

    #[test]
    fn exactly_full_is_accepted() {
        let adv = AdvertisingData::new().add_name(&[b'x'; 29]).unwrap();
        assert_eq!(adv.get_slice().len(), 31);
    }

    #[test]
    fn too_many_services() {
        let err = AdvertisingData::new().add_services(&[1, 2, 3, 4, 5]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLength {
                expected: 8,
                actual: 10
            }
        );
    }
}
