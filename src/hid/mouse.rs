//! Mouse profile report maps.
//!
//! Both variants describe an 8-byte input report so the Report
//! characteristic keeps the same size as the keyboard profile; the
//! trailing bytes are declared as constant padding.

/// Length of the 8-bit-delta mouse report map in bytes.
pub const MOUSE_REPORT_MAP_LEN: usize = 56;

/// Length of the 16-bit-delta mouse report map in bytes.
pub const WIDE_MOUSE_REPORT_MAP_LEN: usize = 58;

/// 3-button relative mouse with 8-bit X/Y deltas (-127..127).
pub const MOUSE_REPORT_MAP: [u8; MOUSE_REPORT_MAP_LEN] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (3 bits + 5 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x03, //     Usage Maximum (Button 3)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x03, //     Report Count (3)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x05, //     Report Size (5)
    0x81, 0x01, //     Input (Constant)
    //
    //   - X, Y displacement -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Padding to 8 bytes -
    0x95, 0x05, //     Report Count (5)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x01, //     Input (Constant)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];

/// 3-button relative mouse with 16-bit X/Y deltas (-32767..32767).
pub const WIDE_MOUSE_REPORT_MAP: [u8; WIDE_MOUSE_REPORT_MAP_LEN] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (3 bits + 5 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x03, //     Usage Maximum (Button 3)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x03, //     Report Count (3)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x05, //     Report Size (5)
    0x81, 0x01, //     Input (Constant)
    //
    //   - X, Y displacement -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x01, 0x80, // Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, // Logical Maximum (32767)
    0x75, 0x10, //     Report Size (16)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Padding to 8 bytes -
    0x95, 0x03, //     Report Count (3)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x01, //     Input (Constant)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];
