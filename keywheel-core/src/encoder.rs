//! Quadrature rotation counter shared between the edge interrupt and the
//! scan loop.
//!
//! The encoder's two phases are 90 degrees apart. Only phase-A rising edges
//! are decoded: phase B sampled low at that edge means clockwise (A leads),
//! high means counter-clockwise (B leads). That is one count per full
//! quadrature cycle, not per edge; phase-B edges are deliberately ignored.

use portable_atomic::{AtomicI32, Ordering};

/// Signed rotation counter with a masked writer and an atomic reader.
///
/// The writer runs in interrupt context and performs its read-modify-write
/// inside a critical section, so a preempted reader can never observe a torn
/// update. The reader is a single word load and may run at any time.
pub struct RotationCounter(AtomicI32);

impl RotationCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicI32::new(0))
    }

    /// Record one phase-A rising edge, with the level of phase B sampled at
    /// that edge. Called from interrupt context.
    pub fn record_phase_a_edge(&self, phase_b_high: bool) {
        critical_section::with(|_| {
            let count = self.0.load(Ordering::Relaxed);
            let next = if phase_b_high {
                count.wrapping_sub(1)
            } else {
                count.wrapping_add(1)
            };
            self.0.store(next, Ordering::Relaxed);
        });
    }

    /// Raw signed count.
    #[inline]
    #[must_use]
    pub fn count(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    /// The count wrapped into `[0, range)` for the axis report.
    ///
    /// Euclidean remainder, so counter-clockwise totals (negative counts)
    /// still land in range. Configuration validation caps the range at the
    /// `u16` axis width, so the narrowing cast never truncates.
    #[must_use]
    pub fn axis_position(&self, range: i32) -> u16 {
        self.count().rem_euclid(range) as u16
    }
}

impl Default for RotationCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_b_low_counts_up_one_per_edge() {
        let counter = RotationCounter::new();
        for expected in 1..=5 {
            counter.record_phase_a_edge(false);
            assert_eq!(counter.count(), expected);
        }
    }

    #[test]
    fn phase_b_high_counts_down_one_per_edge() {
        let counter = RotationCounter::new();
        for expected in 1..=5 {
            counter.record_phase_a_edge(true);
            assert_eq!(counter.count(), -expected);
        }
    }

    #[test]
    fn direction_changes_mix_cleanly() {
        let counter = RotationCounter::new();
        counter.record_phase_a_edge(false);
        counter.record_phase_a_edge(false);
        counter.record_phase_a_edge(true);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn axis_wraps_into_range() {
        let counter = RotationCounter::new();
        for _ in 0..601 {
            counter.record_phase_a_edge(false);
        }
        assert_eq!(counter.count(), 601);
        assert_eq!(counter.axis_position(600), 1);
    }

    #[test]
    fn full_width_range_wraps_past_the_axis_width() {
        // Counts beyond 2^16 with the widest valid range still report
        // count mod range, not a truncated word.
        let counter = RotationCounter::new();
        for _ in 0..(1 << 16) + 64 {
            counter.record_phase_a_edge(false);
        }
        assert_eq!(counter.axis_position(crate::config::MAX_ENCODER_RANGE), 64);
    }

    #[test]
    fn negative_counts_stay_in_range() {
        let counter = RotationCounter::new();
        counter.record_phase_a_edge(true);
        assert_eq!(counter.count(), -1);
        let axis = counter.axis_position(600);
        assert_eq!(axis, 599);
        assert!(axis < 600);
    }
}
