//! Maps debounced key transitions to protocol actions.

use crate::config::OperatingMode;
use crate::keys::KeyCode;
use crate::matrix::KeyState;

/// One output action in the active protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    PressKey(u8),
    ReleaseKey(u8),
    PressButton(u8),
    ReleaseButton(u8),
    NoOp,
}

/// Pure mapping from (mode, code, state) to exactly one action.
///
/// Pressed and Held both map to a press, Released and Idle both map to a
/// release. The emitters are idempotent, so the collapse is harmless:
/// pressing an already-pressed key or releasing an idle one changes nothing.
/// Reserved codes never reach the host.
#[must_use]
pub fn route(mode: OperatingMode, code: KeyCode, state: KeyState) -> Action {
    if code.is_reserved() {
        return Action::NoOp;
    }
    let press = matches!(state, KeyState::Pressed | KeyState::Held);
    match (mode, press) {
        (OperatingMode::Keyboard, true) => Action::PressKey(code.raw()),
        (OperatingMode::Keyboard, false) => Action::ReleaseKey(code.raw()),
        (OperatingMode::Gamepad, true) => Action::PressButton(code.raw()),
        (OperatingMode::Gamepad, false) => Action::ReleaseButton(code.raw()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{kbd, pad};

    #[test]
    fn pressed_and_held_both_press() {
        for state in [KeyState::Pressed, KeyState::Held] {
            assert_eq!(
                route(OperatingMode::Keyboard, kbd::ESC, state),
                Action::PressKey(kbd::ESC.raw())
            );
            assert_eq!(
                route(OperatingMode::Gamepad, pad::START, state),
                Action::PressButton(pad::START.raw())
            );
        }
    }

    #[test]
    fn released_and_idle_both_release() {
        for state in [KeyState::Released, KeyState::Idle] {
            assert_eq!(
                route(OperatingMode::Keyboard, kbd::ESC, state),
                Action::ReleaseKey(kbd::ESC.raw())
            );
            assert_eq!(
                route(OperatingMode::Gamepad, pad::START, state),
                Action::ReleaseButton(pad::START.raw())
            );
        }
    }

    #[test]
    fn reserved_codes_route_to_noop() {
        for state in [
            KeyState::Idle,
            KeyState::Pressed,
            KeyState::Held,
            KeyState::Released,
        ] {
            assert_eq!(route(OperatingMode::Keyboard, KeyCode::FN, state), Action::NoOp);
            assert_eq!(route(OperatingMode::Gamepad, KeyCode::UNUSED, state), Action::NoOp);
        }
    }
}
