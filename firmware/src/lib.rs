//! RP2040 firmware for the keywheel control surface.
//!
//! Reads a strobe-and-sense button matrix and a rotary quadrature encoder,
//! and reports to the host as either a USB HID keyboard or a USB HID
//! gamepad (18 buttons plus one axis driven by the encoder). Exactly one
//! profile is active per run, selected in `main.rs`.
//!
//! # Hardware Configuration
//!
//! | Function        | GPIO      | Description                         |
//! |-----------------|-----------|-------------------------------------|
//! | Encoder phase A | 0         | Rising-edge interrupt source        |
//! | Encoder phase B | 1         | Sampled at each phase-A edge        |
//! | Matrix rows     | 2, 3, 4   | Push-pull outputs, strobed low      |
//! | Matrix columns  | 5, 6, 7, 8| Pull-up inputs, closed reads low    |
//!
//! # Architecture
//!
//! Embassy tasks:
//!
//! - **USB Task**: runs the USB device stack
//! - **Encoder Task** (gamepad mode only): awaits phase-A rising edges,
//!   samples phase B, and updates the shared rotation counter
//! - the main task runs the scan-route-emit pipeline from `keywheel_core`
//!
//! The rotation counter is the only state shared between tasks; its writer
//! updates inside a critical section and the pipeline reads it as a single
//! atomic word.
//!
//! # Features
//!
//! - **`dev-panic`** (default): `panic-probe` for development (prints panic
//!   info via RTT)
//! - **`prod-panic`**: `panic-reset` for production (silent reset)

#![no_std]

// Re-export core types for convenience
pub use keywheel_core::{
    Action, Buttons, ConfigError, ControlPipeline, CycleClock, GamepadReport, KeyCode,
    KeyState, KeyTransition, KeyboardReport, Keymap, MatrixIo, OperatingMode, Report,
    ReportError, ReportSink, RotationCounter, SurfaceConfig,
};

pub mod clock;
pub mod encoder_io;
pub mod matrix_io;
pub mod usb_output;

pub use clock::EmbassyClock;
pub use encoder_io::encoder_task;
pub use matrix_io::GpioMatrix;
pub use usb_output::{configure_usb_hid, SurfaceRequestHandler, UsbReportSink};
