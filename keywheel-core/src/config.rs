//! Control-surface configuration and startup validation.
//!
//! Pin assignment, grid shape, key tables, report cadence, and encoder range
//! all arrive here as one immutable [`SurfaceConfig`]. Validation runs once,
//! before the main loop starts; a config that fails validation must never
//! reach the scheduler.

use heapless::Vec;

use crate::keys::{kbd, pad, KeyCode};

/// Largest supported matrix, in cells (rows x cols).
pub const MATRIX_CAP: usize = 12;

/// Largest usable encoder range: the axis is a `u16` on the wire, so it can
/// represent at most `[0, 65536)`.
pub const MAX_ENCODER_RANGE: i32 = 1 << 16;

/// Encoder counts per revolution of the reference device.
pub const REFERENCE_ENCODER_RANGE: i32 = 600;

/// Which HID profile this run reports as.
///
/// Fixed for the lifetime of one run; kept as a live enum so a future
/// runtime switch stays a local change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    Keyboard,
    Gamepad,
}

/// Error type for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Grid is empty or exceeds [`MATRIX_CAP`] cells.
    GridTooLarge { rows: usize, cols: usize },
    /// Code slice length does not match rows x cols.
    ShapeMismatch { expected: usize, got: usize },
    /// The keyboard and gamepad tables have different shapes.
    MapShapeDiffers,
    /// A gamepad table entry is neither a button index nor a reserved code.
    ButtonIndexOutOfRange { code: u8 },
    /// Report frequency of zero has no defined period.
    ZeroReportFrequency,
    /// The axis wraps modulo the encoder range, which must be positive and
    /// fit the `u16` axis (at most [`MAX_ENCODER_RANGE`]).
    EncoderRangeInvalid { range: i32 },
    /// A zero-poll debounce window would accept raw contact bounce.
    ZeroDebounceWindow,
}

/// A rectangular key-code table of fixed shape.
///
/// Stored flat, row-major. Both mode tables share one shape; only their
/// contents differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    rows: usize,
    cols: usize,
    codes: Vec<KeyCode, MATRIX_CAP>,
}

impl Keymap {
    /// Build a keymap from a row-major code slice.
    pub fn new(rows: usize, cols: usize, codes: &[KeyCode]) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 || rows * cols > MATRIX_CAP {
            return Err(ConfigError::GridTooLarge { rows, cols });
        }
        if codes.len() != rows * cols {
            return Err(ConfigError::ShapeMismatch {
                expected: rows * cols,
                got: codes.len(),
            });
        }
        let mut table = Vec::new();
        table
            .extend_from_slice(codes)
            .map_err(|_| ConfigError::GridTooLarge { rows, cols })?;
        Ok(Self { rows, cols, codes: table })
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The code mapped to one cell.
    #[inline]
    #[must_use]
    pub fn code_at(&self, row: usize, col: usize) -> KeyCode {
        self.codes[row * self.cols + col]
    }

    fn codes(&self) -> &[KeyCode] {
        &self.codes
    }
}

/// The complete immutable configuration the pipeline consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub mode: OperatingMode,
    pub keyboard_map: Keymap,
    pub gamepad_map: Keymap,
    /// Consecutive closed polls before Idle promotes to Pressed.
    pub debounce_polls: u8,
    /// Target report frequency in Hz.
    pub report_hz: u32,
    /// The axis wraps into `[0, encoder_range)`.
    pub encoder_range: i32,
}

impl SurfaceConfig {
    /// Check every configuration-time contract.
    ///
    /// Grid cap and per-table shape are already enforced by [`Keymap::new`];
    /// this covers the cross-table and scalar constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyboard_map.shape() != self.gamepad_map.shape() {
            return Err(ConfigError::MapShapeDiffers);
        }
        for &code in self.gamepad_map.codes() {
            if !code.is_reserved() && code.raw() as usize >= pad::BUTTON_COUNT {
                return Err(ConfigError::ButtonIndexOutOfRange { code: code.raw() });
            }
        }
        if self.report_hz == 0 {
            return Err(ConfigError::ZeroReportFrequency);
        }
        if self.encoder_range <= 0 || self.encoder_range > MAX_ENCODER_RANGE {
            return Err(ConfigError::EncoderRangeInvalid {
                range: self.encoder_range,
            });
        }
        if self.debounce_polls == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        Ok(())
    }

    /// Target period between report flushes.
    #[inline]
    #[must_use]
    pub fn report_period_micros(&self) -> u64 {
        1_000_000 / u64::from(self.report_hz)
    }

    /// The keymap the given mode scans with.
    #[must_use]
    pub fn active_map(&self) -> &Keymap {
        match self.mode {
            OperatingMode::Keyboard => &self.keyboard_map,
            OperatingMode::Gamepad => &self.gamepad_map,
        }
    }

    /// The reference device: a 3x4 grid with two unused cells, a 600-count
    /// encoder on the axis, and a 2-poll debounce window.
    #[must_use]
    pub fn reference(mode: OperatingMode) -> Self {
        let keyboard_map = Keymap::new(
            3,
            4,
            &[
                kbd::ESC, KeyCode::FN, kbd::ENTER, KeyCode::UNUSED,
                kbd::LEFT_ARROW, kbd::TAB, kbd::RIGHT_ARROW, KeyCode::UNUSED,
                kbd::D, kbd::F, kbd::J, kbd::K,
            ],
        );
        let gamepad_map = Keymap::new(
            3,
            4,
            &[
                pad::START, pad::CUSTOM1, pad::OPTIONS, KeyCode::UNUSED,
                pad::CUSTOM2, pad::CUSTOM3, pad::CUSTOM4, KeyCode::UNUSED,
                pad::CUSTOM5, pad::CUSTOM6, pad::CUSTOM7, pad::CUSTOM8,
            ],
        );
        // Both tables are static 3x4 literals; construction cannot fail.
        let (Ok(keyboard_map), Ok(gamepad_map)) = (keyboard_map, gamepad_map) else {
            unreachable!()
        };
        Self {
            mode,
            keyboard_map,
            gamepad_map,
            debounce_polls: 2,
            report_hz: 250,
            encoder_range: REFERENCE_ENCODER_RANGE,
        }
    }
}
