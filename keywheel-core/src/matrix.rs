//! Strobe-and-sense matrix scanning with per-cell debounce.
//!
//! The scanner drives one row active at a time, senses every column, and
//! runs each cell through a four-state lifecycle. Only state *changes* are
//! yielded, so a steady held key or an open cell produces nothing.
//!
//! Lifecycle per cell: Idle -> Pressed -> Held* -> Released -> Idle. The
//! debounce window gates only the Idle -> Pressed promotion; release is
//! taken on the first open poll.

use heapless::Vec;

use crate::config::{Keymap, MATRIX_CAP};
use crate::keys::KeyCode;

/// Debounced lifecycle state of one matrix cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Contact open, nothing pending.
    Idle,
    /// Debounce window satisfied this poll; reported once.
    Pressed,
    /// Contact still closed on the polls after Pressed.
    Held,
    /// Contact opened; reported once before returning to Idle.
    Released,
}

/// One reportable state change from a scan, tagged with the cell's code in
/// the active mode's table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyTransition {
    pub code: KeyCode,
    pub state: KeyState,
}

/// Digital line access for the matrix.
///
/// The scanner strobes rows through [`drive_row`](MatrixIo::drive_row) and
/// senses contacts through [`read_column`](MatrixIo::read_column); `true`
/// means the contact under the currently driven row is closed. GPIO
/// implements this in firmware, a scripted mock in tests.
pub trait MatrixIo {
    fn drive_row(&mut self, row: usize, active: bool);
    fn read_column(&mut self, col: usize) -> bool;
}

#[derive(Clone, Copy)]
struct Cell {
    state: KeyState,
    /// Consecutive closed polls seen while Idle.
    settle: u8,
}

impl Cell {
    const fn new() -> Self {
        Self {
            state: KeyState::Idle,
            settle: 0,
        }
    }

    /// Advance the lifecycle one poll. Returns the new state only when it
    /// differs from the previous poll's state.
    fn step(&mut self, closed: bool, debounce_polls: u8) -> Option<KeyState> {
        let next = match self.state {
            KeyState::Idle => {
                if closed {
                    self.settle = self.settle.saturating_add(1);
                    if self.settle >= debounce_polls {
                        self.settle = 0;
                        KeyState::Pressed
                    } else {
                        KeyState::Idle
                    }
                } else {
                    self.settle = 0;
                    KeyState::Idle
                }
            }
            KeyState::Pressed | KeyState::Held => {
                if closed {
                    KeyState::Held
                } else {
                    KeyState::Released
                }
            }
            KeyState::Released => {
                // Back to Idle; a still-closed contact starts a fresh window.
                self.settle = u8::from(closed);
                KeyState::Idle
            }
        };
        if next != self.state {
            self.state = next;
            Some(next)
        } else {
            None
        }
    }
}

/// Debounced matrix scanner over a [`MatrixIo`] implementation.
pub struct MatrixScanner<IO> {
    io: IO,
    map: Keymap,
    debounce_polls: u8,
    cells: Vec<Cell, MATRIX_CAP>,
}

impl<IO: MatrixIo> MatrixScanner<IO> {
    /// Create a scanner over the active mode's keymap.
    ///
    /// The map's shape was validated at configuration time; cells start Idle.
    pub fn new(io: IO, map: Keymap, debounce_polls: u8) -> Self {
        let mut cells = Vec::new();
        for _ in 0..map.rows() * map.cols() {
            // Cannot overflow: Keymap construction caps rows * cols.
            let _ = cells.push(Cell::new());
        }
        Self {
            io,
            map,
            debounce_polls,
            cells,
        }
    }

    /// Poll the whole grid once and yield every debounced state change.
    ///
    /// Cells mapped to [`KeyCode::UNUSED`] are permanently Idle: their lines
    /// are never run through the lifecycle, so electrical bounce on them can
    /// not produce events.
    pub fn scan(&mut self) -> Vec<KeyTransition, MATRIX_CAP> {
        let mut transitions = Vec::new();
        for row in 0..self.map.rows() {
            self.io.drive_row(row, true);
            for col in 0..self.map.cols() {
                let code = self.map.code_at(row, col);
                if code == KeyCode::UNUSED {
                    continue;
                }
                let closed = self.io.read_column(col);
                let cell = &mut self.cells[row * self.map.cols() + col];
                if let Some(state) = cell.step(closed, self.debounce_polls) {
                    // Capacity equals the cell count; push cannot fail.
                    let _ = transitions.push(KeyTransition { code, state });
                }
            }
            self.io.drive_row(row, false);
        }
        transitions
    }

    /// Current debounced state of one cell.
    #[must_use]
    pub fn state_of(&self, row: usize, col: usize) -> KeyState {
        self.cells[row * self.map.cols() + col].state
    }
}
