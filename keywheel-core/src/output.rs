//! Report sink trait and error types.

use core::future::Future;

use crate::report::{GamepadReport, KeyboardReport};

/// One composed HID report, tagged by the active protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    Keyboard(KeyboardReport),
    Gamepad(GamepadReport),
}

/// Error type for report flushing.
///
/// A failed flush is never retried; the next cycle's report supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Report dropped (e.g., host not polling fast enough).
    Dropped,
    /// Endpoint busy.
    Busy,
}

/// Async trait for HID report sinks.
///
/// This abstracts the destination for composed reports, enabling different
/// outputs (USB HID in firmware, a capturing mock in tests).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait ReportSink {
    /// Flush one composed report.
    ///
    /// May block until the previous report has been sent.
    fn send(&mut self, report: &Report) -> impl Future<Output = Result<(), ReportError>>;

    /// Check if the sink is ready to accept reports.
    fn is_ready(&self) -> bool;
}
