//! The scan-route-emit cycle and its fixed-cadence scheduler.
//!
//! [`ControlPipeline`] ties the whole core together: each cycle polls the
//! matrix once, routes every transition into the active emitter, composes
//! exactly one report (sampling the rotation counter in gamepad mode), and
//! flushes it before sleeping out the remaining time budget.
//!
//! The scheduler is drift-accepting: cadence is never faster than the
//! target period but may be slower under load. An overlong cycle continues
//! immediately with no catch-up compensation and no negative sleep.

use core::future::Future;

use crate::config::{ConfigError, OperatingMode, SurfaceConfig};
use crate::emitter::ModeStrategy;
use crate::encoder::RotationCounter;
use crate::matrix::{MatrixIo, MatrixScanner};
use crate::output::{ReportError, ReportSink};
use crate::router::route;

/// Wall-clock access for the scheduler.
///
/// embassy-time in firmware, a scripted mock in tests.
pub trait CycleClock {
    fn now_micros(&mut self) -> u64;
    fn sleep_micros(&mut self, micros: u64) -> impl Future<Output = ()>;
}

/// The complete input-acquisition and reporting pipeline.
pub struct ControlPipeline<'a, IO, S, C> {
    scanner: MatrixScanner<IO>,
    strategy: ModeStrategy,
    mode: OperatingMode,
    counter: &'a RotationCounter,
    sink: S,
    clock: C,
    period_micros: u64,
    encoder_range: i32,
}

impl<'a, IO: MatrixIo, S: ReportSink, C: CycleClock> ControlPipeline<'a, IO, S, C> {
    /// Validate the configuration and assemble the pipeline.
    ///
    /// A config that fails validation never reaches the main loop.
    pub fn new(
        config: &SurfaceConfig,
        io: IO,
        counter: &'a RotationCounter,
        sink: S,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scanner: MatrixScanner::new(io, config.active_map().clone(), config.debounce_polls),
            strategy: ModeStrategy::for_mode(config.mode),
            mode: config.mode,
            counter,
            sink,
            clock,
            period_micros: config.report_period_micros(),
            encoder_range: config.encoder_range,
        })
    }

    /// Run the pipeline until power-off.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.cycle_once().await;
        }
    }

    /// One scan-route-emit cycle followed by the remaining sleep budget.
    ///
    /// Returns the flush result for testing purposes.
    pub async fn cycle_once(&mut self) -> Result<(), ReportError> {
        let start = self.clock.now_micros();
        let result = self.scan_and_emit().await;
        let elapsed = self.clock.now_micros().saturating_sub(start);
        if elapsed < self.period_micros {
            self.clock.sleep_micros(self.period_micros - elapsed).await;
        }
        result
    }

    async fn scan_and_emit(&mut self) -> Result<(), ReportError> {
        for transition in self.scanner.scan() {
            #[cfg(feature = "defmt")]
            defmt::info!("key {} -> {}", transition.code, transition.state);
            self.strategy
                .apply(route(self.mode, transition.code, transition.state));
        }
        let report = self.strategy.compose(self.counter, self.encoder_range);
        self.sink.send(&report).await
    }

    /// Get a reference to the report sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
