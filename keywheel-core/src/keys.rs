//! Logical key codes for the two reporting modes.
//!
//! A matrix cell maps to exactly one [`KeyCode`] in the active mode's table.
//! The two code spaces are disjoint: keyboard tables hold HID usage IDs,
//! gamepad tables hold button indices in `0..BUTTON_COUNT`. Codes at `0x80`
//! and above are reserved and never produce host traffic.

/// One logical key code from a mode's mapping table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    /// Reserved: function-layer modifier, not reported to the host.
    pub const FN: Self = Self(0x80);
    /// Reserved: padding for matrix cells with no switch fitted.
    pub const UNUSED: Self = Self(0x81);

    /// Reserved codes route to no action in either mode.
    #[inline]
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.0 >= 0x80
    }

    /// Get the raw u8 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// HID keyboard usage IDs used by the reference layout.
pub mod kbd {
    use super::KeyCode;

    pub const ESC: KeyCode = KeyCode(0x29);
    pub const ENTER: KeyCode = KeyCode(0x28);
    pub const TAB: KeyCode = KeyCode(0x2B);
    pub const LEFT_ARROW: KeyCode = KeyCode(0x50);
    pub const RIGHT_ARROW: KeyCode = KeyCode(0x4F);
    pub const D: KeyCode = KeyCode(0x07);
    pub const F: KeyCode = KeyCode(0x09);
    pub const J: KeyCode = KeyCode(0x0D);
    pub const K: KeyCode = KeyCode(0x0E);
}

/// Gamepad button indices.
pub mod pad {
    use super::KeyCode;

    pub const A: KeyCode = KeyCode(0);
    pub const B: KeyCode = KeyCode(1);
    pub const X: KeyCode = KeyCode(2);
    pub const Y: KeyCode = KeyCode(3);
    pub const LEFT_BUMPER: KeyCode = KeyCode(4);
    pub const RIGHT_BUMPER: KeyCode = KeyCode(5);
    pub const START: KeyCode = KeyCode(6);
    pub const OPTIONS: KeyCode = KeyCode(7);
    pub const LEFT_STICK: KeyCode = KeyCode(8);
    pub const RIGHT_STICK: KeyCode = KeyCode(9);
    pub const CUSTOM1: KeyCode = KeyCode(10);
    pub const CUSTOM2: KeyCode = KeyCode(11);
    pub const CUSTOM3: KeyCode = KeyCode(12);
    pub const CUSTOM4: KeyCode = KeyCode(13);
    pub const CUSTOM5: KeyCode = KeyCode(14);
    pub const CUSTOM6: KeyCode = KeyCode(15);
    pub const CUSTOM7: KeyCode = KeyCode(16);
    pub const CUSTOM8: KeyCode = KeyCode(17);

    /// Number of reportable gamepad buttons.
    pub const BUTTON_COUNT: usize = 18;
}
