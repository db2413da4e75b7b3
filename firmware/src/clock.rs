//! embassy-time implementation of the scheduler clock.

use embassy_time::{Instant, Timer};
use keywheel_core::CycleClock;

/// Monotonic microsecond clock backed by embassy-time.
pub struct EmbassyClock;

impl CycleClock for EmbassyClock {
    fn now_micros(&mut self) -> u64 {
        Instant::now().as_micros()
    }

    async fn sleep_micros(&mut self, micros: u64) {
        Timer::after_micros(micros).await;
    }
}
