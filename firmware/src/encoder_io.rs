//! Encoder task: turns phase-A edges into rotation counter updates.

use embassy_rp::gpio::Input;
use keywheel_core::RotationCounter;

/// Await phase-A rising edges and decode direction from phase B.
///
/// Phase B trails phase A by 90 degrees: it reads low at A's rising edge
/// for clockwise rotation and high for counter-clockwise. The counter's
/// read-modify-write runs inside a critical section, so the scan loop can
/// never observe a torn update.
#[embassy_executor::task]
pub async fn encoder_task(
    mut phase_a: Input<'static>,
    phase_b: Input<'static>,
    counter: &'static RotationCounter,
) {
    loop {
        phase_a.wait_for_rising_edge().await;
        counter.record_phase_a_edge(phase_b.is_high());
    }
}
