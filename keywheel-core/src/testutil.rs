//! Shared helpers for host tests.

extern crate std;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::vec::Vec as StdVec;

use crate::matrix::MatrixIo;

/// Run a future to completion (simple blocking executor). Mock futures in
/// this crate are always ready.
pub(crate) fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}

/// Scripted matrix: one boolean frame per poll, row-major. The frame index
/// advances when the last row is released, matching the scan order of
/// `MatrixScanner::scan`. The final frame repeats once the script runs out.
pub(crate) struct ScriptedMatrix {
    frames: StdVec<StdVec<bool>>,
    rows: usize,
    cols: usize,
    poll: usize,
    active_row: usize,
}

impl ScriptedMatrix {
    pub(crate) fn new(rows: usize, cols: usize, frames: StdVec<StdVec<bool>>) -> Self {
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| f.len() == rows * cols));
        Self {
            frames,
            rows,
            cols,
            poll: 0,
            active_row: 0,
        }
    }

    /// Frames for a 1x1 grid from a contact trace.
    pub(crate) fn single_cell(trace: &[bool]) -> Self {
        Self::new(1, 1, trace.iter().map(|&c| std::vec![c]).collect())
    }

    /// A grid where every contact stays open.
    pub(crate) fn idle_grid(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, std::vec![std::vec![false; rows * cols]])
    }
}

impl MatrixIo for ScriptedMatrix {
    fn drive_row(&mut self, row: usize, active: bool) {
        if active {
            self.active_row = row;
        } else if row == self.rows - 1 {
            self.poll += 1;
        }
    }

    fn read_column(&mut self, col: usize) -> bool {
        let frame = self
            .frames
            .get(self.poll)
            .unwrap_or_else(|| self.frames.last().unwrap());
        frame[self.active_row * self.cols + col]
    }
}
