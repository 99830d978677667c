//! Application-wide constants and compile-time configuration.
//!
//! All pin assignments, timing parameters, and protocol constants live
//! here so they can be tuned in one place.

// BLE

/// GAP device name advertised by the keyboard firmware.
pub const KEYBOARD_DEVICE_NAME: &str = "HID_Keyboard";

/// GAP device name advertised by the mouse firmware.
pub const MOUSE_DEVICE_NAME: &str = "HID_Mouse";

/// Advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

/// Delay before re-advertising after an advertising error (ms).
pub const BLE_ADV_RETRY_MS: u64 = 500;

/// Maximum number of characteristics in one registered service
/// (Device Information has seven, HID five).
pub const MAX_SERVICE_CHARACTERISTICS: usize = 7;

/// ATT MTU requested from the SoftDevice.
pub const BLE_ATT_MTU: u16 = 128;

/// GATT attribute table size handed to the SoftDevice (bytes).
pub const BLE_ATTR_TAB_SIZE: u32 = 4096;

/// Bonds kept in RAM; the oldest is evicted when full.
pub const MAX_BONDS: usize = 4;

/// Console events queued between the BLE stack and the serial task.
pub const CONSOLE_EVENT_DEPTH: usize = 4;

// Device Information

pub const DIS_MANUFACTURER: &str = "ARM";
pub const DIS_MODEL_NUMBER: &str = "CYNTEC";
pub const DIS_SERIAL_NUMBER: &str = "SN1";
pub const DIS_HARDWARE_REVISION: &str = "hw-rev1";
pub const DIS_FIRMWARE_REVISION: &str = env!("CARGO_PKG_VERSION");
pub const DIS_SOFTWARE_REVISION: &str = "soft-rev1";

/// PnP ID vendor (Bluetooth SIG company id: Nordic Semiconductor).
pub const DIS_VENDOR_ID: u16 = 0x0059;

/// PnP ID product ids, one per firmware image.
pub const KEYBOARD_PRODUCT_ID: u16 = 0x0001;
pub const MOUSE_PRODUCT_ID: u16 = 0x0002;

/// PnP ID product version (BCD, 1.0).
pub const DIS_PRODUCT_VERSION: u16 = 0x0100;

// Serial

/// Console baud rate (8N1).
pub const SERIAL_BAUD: u32 = 115_200;

/// Capacity of the mouse line-parse buffer (bytes).
pub const LINE_BUFFER_LEN: usize = 200;

/// Capacity of one console feedback line (bytes).
pub const CONSOLE_LINE_LEN: usize = 48;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in the binaries.  Adjust for your custom PCB.
//
//   UART RX  → P0.08  (interface MCU VCOM)
//   UART TX  → P0.06
