//! Platform-agnostic input pipeline for a matrix + encoder control surface.
//!
//! This crate contains everything the firmware needs that does not touch
//! hardware: matrix scanning with debounce, quadrature decoding, routing of
//! key transitions into one of two HID protocols, and the fixed-cadence
//! report scheduler. It can be used both in embedded `no_std` environments
//! and on host for testing.
//!
//! # Overview
//!
//! - [`config`]: Configuration surface and startup validation
//!   ([`SurfaceConfig`], [`Keymap`], [`OperatingMode`])
//! - [`keys`]: Key code spaces for the two reporting modes ([`KeyCode`])
//! - [`matrix`]: Debounced strobe-and-sense scanner ([`MatrixScanner`],
//!   [`MatrixIo`])
//! - [`encoder`]: Interrupt-shared rotation counter ([`RotationCounter`])
//! - [`router`]: Maps key transitions to protocol actions ([`route`])
//! - [`report`]: HID report types ([`KeyboardReport`], [`GamepadReport`])
//! - [`emitter`]: Mode-selected report emitters ([`ModeStrategy`])
//! - [`output`]: Report sink trait ([`ReportSink`])
//! - [`pipeline`]: Scan-route-emit cycle and scheduler ([`ControlPipeline`])
//!
//! # Data flow
//!
//! Each scheduler tick polls the matrix once, routes every debounced key
//! transition into the active emitter, samples the rotation counter (gamepad
//! mode only), and flushes exactly one composed report to the sink before
//! sleeping out the remaining time budget. The rotation counter itself is
//! updated asynchronously from the encoder's phase-A edge interrupt.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and per-transition diagnostics
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod emitter;
pub mod encoder;
pub mod keys;
pub mod matrix;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod router;

#[cfg(test)]
mod testutil;

// Re-export main types at crate root
pub use config::{
    ConfigError, Keymap, OperatingMode, SurfaceConfig, MATRIX_CAP, MAX_ENCODER_RANGE,
    REFERENCE_ENCODER_RANGE,
};
pub use emitter::{GamepadEmitter, KeyboardEmitter, ModeStrategy};
pub use encoder::RotationCounter;
pub use keys::KeyCode;
pub use matrix::{KeyState, KeyTransition, MatrixIo, MatrixScanner};
pub use output::{Report, ReportError, ReportSink};
pub use pipeline::{ControlPipeline, CycleClock};
pub use report::{Buttons, GamepadReport, KeyboardReport};
pub use router::{route, Action};
