//! GPIO implementation of the matrix line access.

use embassy_rp::gpio::{Input, Output};
use embassy_time::{block_for, Duration};
use keywheel_core::MatrixIo;

/// How long a freshly driven row settles before its columns are sensed.
const STROBE_SETTLE: Duration = Duration::from_micros(5);

/// Matrix wiring: rows are push-pull outputs strobed active-low, columns
/// are pull-up inputs, so a closed contact under the driven row reads low.
pub struct GpioMatrix<'d, const R: usize, const C: usize> {
    rows: [Output<'d>; R],
    cols: [Input<'d>; C],
}

impl<'d, const R: usize, const C: usize> GpioMatrix<'d, R, C> {
    /// Take ownership of the matrix lines. Rows start inactive (high).
    pub fn new(mut rows: [Output<'d>; R], cols: [Input<'d>; C]) -> Self {
        for row in &mut rows {
            row.set_high();
        }
        Self { rows, cols }
    }
}

impl<'d, const R: usize, const C: usize> MatrixIo for GpioMatrix<'d, R, C> {
    fn drive_row(&mut self, row: usize, active: bool) {
        if active {
            self.rows[row].set_low();
            block_for(STROBE_SETTLE);
        } else {
            self.rows[row].set_high();
        }
    }

    fn read_column(&mut self, col: usize) -> bool {
        self.cols[col].is_low()
    }
}
