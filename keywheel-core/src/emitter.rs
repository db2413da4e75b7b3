//! Mode-specific report emitters.
//!
//! Exactly one emitter is active per run, selected by [`OperatingMode`] at
//! startup. Both accumulate routed actions into a report; press and release
//! are idempotent, so the router's Pressed/Held and Released/Idle collapse
//! is safe. The two variants live behind one tagged [`ModeStrategy`] so both
//! modes unit-test from the same binary.

use crate::config::OperatingMode;
use crate::encoder::RotationCounter;
use crate::output::Report;
use crate::report::{GamepadReport, KeyboardReport};
use crate::router::Action;

/// Accumulates keystroke state. No axis data ever leaves this emitter.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct KeyboardEmitter {
    report: KeyboardReport,
}

impl KeyboardEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report: KeyboardReport::empty(),
        }
    }

    pub fn press(&mut self, usage: u8) {
        self.report.press(usage);
    }

    pub fn release(&mut self, usage: u8) {
        self.report.release(usage);
    }

    #[must_use]
    pub fn report(&self) -> KeyboardReport {
        self.report
    }
}

/// Accumulates the button bitmap; the axis is written fresh every cycle.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct GamepadEmitter {
    report: GamepadReport,
}

impl GamepadEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report: GamepadReport::neutral(),
        }
    }

    pub fn press_button(&mut self, index: u8) {
        self.report.buttons.set(index, true);
    }

    pub fn release_button(&mut self, index: u8) {
        self.report.buttons.set(index, false);
    }

    pub fn set_axis(&mut self, axis: u16) {
        self.report.axis = axis;
    }

    #[must_use]
    pub fn report(&self) -> GamepadReport {
        self.report
    }
}

/// Runtime-selected reporting strategy.
pub enum ModeStrategy {
    Keyboard(KeyboardEmitter),
    Gamepad(GamepadEmitter),
}

impl ModeStrategy {
    #[must_use]
    pub const fn for_mode(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::Keyboard => Self::Keyboard(KeyboardEmitter::new()),
            OperatingMode::Gamepad => Self::Gamepad(GamepadEmitter::new()),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> OperatingMode {
        match self {
            Self::Keyboard(_) => OperatingMode::Keyboard,
            Self::Gamepad(_) => OperatingMode::Gamepad,
        }
    }

    /// Fold one routed action into the accumulated report.
    pub fn apply(&mut self, action: Action) {
        match (self, action) {
            (Self::Keyboard(emitter), Action::PressKey(usage)) => emitter.press(usage),
            (Self::Keyboard(emitter), Action::ReleaseKey(usage)) => emitter.release(usage),
            (Self::Gamepad(emitter), Action::PressButton(index)) => emitter.press_button(index),
            (Self::Gamepad(emitter), Action::ReleaseButton(index)) => {
                emitter.release_button(index)
            }
            // NoOp, or an action for the inactive protocol.
            _ => {}
        }
    }

    /// Snapshot the report for flushing. Gamepad mode samples the rotation
    /// counter into the axis; keyboard mode never carries axis data.
    #[must_use]
    pub fn compose(&mut self, counter: &RotationCounter, encoder_range: i32) -> Report {
        match self {
            Self::Keyboard(emitter) => Report::Keyboard(emitter.report()),
            Self::Gamepad(emitter) => {
                emitter.set_axis(counter.axis_position(encoder_range));
                Report::Gamepad(emitter.report())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamepad_double_press_is_idempotent() {
        let mut strategy = ModeStrategy::for_mode(OperatingMode::Gamepad);
        strategy.apply(Action::PressButton(6));
        let counter = RotationCounter::new();
        let once = strategy.compose(&counter, 600);
        strategy.apply(Action::PressButton(6));
        assert_eq!(strategy.compose(&counter, 600), once);
    }

    #[test]
    fn keyboard_compose_never_carries_axis_data() {
        let counter = RotationCounter::new();
        counter.record_phase_a_edge(false);

        let mut strategy = ModeStrategy::for_mode(OperatingMode::Keyboard);
        strategy.apply(Action::PressKey(0x29));
        match strategy.compose(&counter, 600) {
            Report::Keyboard(report) => assert!(report.contains(0x29)),
            Report::Gamepad(_) => panic!("keyboard mode composed a gamepad report"),
        }
    }

    #[test]
    fn gamepad_compose_samples_the_counter() {
        let counter = RotationCounter::new();
        for _ in 0..601 {
            counter.record_phase_a_edge(false);
        }

        let mut strategy = ModeStrategy::for_mode(OperatingMode::Gamepad);
        match strategy.compose(&counter, 600) {
            Report::Gamepad(report) => assert_eq!(report.axis, 1),
            Report::Keyboard(_) => panic!("gamepad mode composed a keyboard report"),
        }
    }

    #[test]
    fn actions_for_the_inactive_protocol_are_ignored() {
        let counter = RotationCounter::new();
        let mut strategy = ModeStrategy::for_mode(OperatingMode::Keyboard);
        strategy.apply(Action::PressButton(3));
        strategy.apply(Action::NoOp);
        match strategy.compose(&counter, 600) {
            Report::Keyboard(report) => assert_eq!(report, crate::report::KeyboardReport::empty()),
            Report::Gamepad(_) => unreachable!(),
        }
    }
}
