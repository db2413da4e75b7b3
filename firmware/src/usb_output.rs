//! USB HID output: report descriptors and the report sink.
//!
//! Exactly one of the two HID profiles is active per run; the descriptor is
//! selected by [`OperatingMode`] when the HID class is configured and never
//! changes afterwards.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use keywheel_core::{OperatingMode, Report, ReportError, ReportSink, REFERENCE_ENCODER_RANGE};

/// Keyboard HID report descriptor: 8 modifier bits, one reserved byte, six
/// key-usage slots. Matches `KeyboardReport::as_bytes` (8 bytes).
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Modifiers (8 bits) ---
    0x05, 0x07, //   Usage Page (Key Codes)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Reserved byte ---
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Six-key rollover array ---
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x65, //   Logical Maximum (101)
    0x05, 0x07, //   Usage Page (Key Codes)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0x65, //   Usage Maximum (101)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];

/// Axis Logical Maximum, derived from the configured encoder range so the
/// descriptor can never drift from the values the pipeline reports.
const AXIS_LOGICAL_MAX: [u8; 2] = ((REFERENCE_ENCODER_RANGE - 1) as u16).to_le_bytes();

/// Gamepad HID report descriptor: 18 buttons, 6 padding bits, one 16-bit X
/// axis covering the encoder range. Matches `GamepadReport::as_bytes`
/// (5 bytes).
pub const GAMEPAD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (18 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x12, //   Usage Maximum (Button 18)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x12, //   Report Count (18)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Padding to the byte boundary ---
    0x95, 0x06, //   Report Count (6)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x03, //   Input (Constant, Variable, Absolute)
    //
    // --- Encoder axis ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, AXIS_LOGICAL_MAX[0], AXIS_LOGICAL_MAX[1], // Logical Maximum (range - 1)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// USB HID report sink.
///
/// Wraps an embassy-usb HID writer to flush composed reports.
pub struct UsbReportSink<'d> {
    writer: HidWriter<'d, Driver<'d, USB>, 8>,
    ready: bool,
}

impl<'d> UsbReportSink<'d> {
    /// Create a new report sink from the given HID writer.
    pub fn new(writer: HidWriter<'d, Driver<'d, USB>, 8>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }
}

impl<'d> ReportSink for UsbReportSink<'d> {
    async fn send(&mut self, report: &Report) -> Result<(), ReportError> {
        let result = match report {
            Report::Keyboard(r) => self.writer.write(&r.as_bytes()).await,
            Report::Gamepad(r) => self.writer.write(&r.as_bytes()).await,
        };
        result.map_err(|_| ReportError::Io)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// HID request handler (handles SET_REPORT, etc.).
///
/// A no-op handler; neither profile consumes output reports (keyboard LEDs
/// are ignored).
pub struct SurfaceRequestHandler;

impl RequestHandler for SurfaceRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class for the given operating mode.
///
/// Returns the HID writer for use by the report sink.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    mode: OperatingMode,
) -> HidWriter<'d, Driver<'d, USB>, 8> {
    let report_descriptor = match mode {
        OperatingMode::Keyboard => KEYBOARD_REPORT_DESCRIPTOR,
        OperatingMode::Gamepad => GAMEPAD_REPORT_DESCRIPTOR,
    };
    let config = embassy_usb::class::hid::Config {
        report_descriptor,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 8,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
