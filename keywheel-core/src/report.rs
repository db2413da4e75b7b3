//! HID report types and their wire formats.
//!
//! These are the exact byte layouts the firmware's report descriptors
//! declare: an 8-byte keyboard report (modifier, reserved, six key slots)
//! and a 5-byte gamepad report (18-button bitmap padded to three bytes plus
//! one 16-bit axis).

use crate::keys::pad::BUTTON_COUNT;

/// Button state represented as a bitfield.
///
/// Bit `n` is gamepad button `n`; bits at [`BUTTON_COUNT`] and above are
/// never set.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u32);

impl Buttons {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Set or clear one button. Out-of-range indices are ignored;
    /// configuration validation keeps them out of the tables anyway.
    #[inline]
    pub fn set(&mut self, index: u8, pressed: bool) {
        if usize::from(index) >= BUTTON_COUNT {
            return;
        }
        if pressed {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Check if one button is pressed. Out-of-range indices are never
    /// pressed, matching [`set`](Self::set).
    #[inline]
    #[must_use]
    pub const fn contains(self, index: u8) -> bool {
        if index as usize >= BUTTON_COUNT {
            return false;
        }
        (self.0 >> index) & 1 == 1
    }

    /// Get the raw bitmap.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// USB HID keyboard report: modifier byte plus six-key rollover.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Size of the report on the wire.
    pub const SIZE: usize = 8;

    /// No keys down.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            keycodes: [0; 6],
        }
    }

    /// Add a usage to the rollover array. Idempotent: a usage already down
    /// stays down once. With all six slots taken the extra key is dropped.
    pub fn press(&mut self, usage: u8) {
        if usage == 0 || self.contains(usage) {
            return;
        }
        if let Some(slot) = self.keycodes.iter_mut().find(|k| **k == 0) {
            *slot = usage;
        }
    }

    /// Remove a usage from the rollover array. Idempotent: releasing a usage
    /// that is not down changes nothing.
    pub fn release(&mut self, usage: u8) {
        for slot in &mut self.keycodes {
            if *slot == usage {
                *slot = 0;
            }
        }
    }

    #[must_use]
    pub fn contains(&self, usage: u8) -> bool {
        usage != 0 && self.keycodes.contains(&usage)
    }

    /// Wire format: modifier, reserved byte, six key slots.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let k = &self.keycodes;
        [self.modifier, 0, k[0], k[1], k[2], k[3], k[4], k[5]]
    }
}

/// USB HID gamepad report: 18-button bitmap plus one analog axis.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    pub buttons: Buttons,
    /// Rotation counter wrapped into the configured encoder range.
    pub axis: u16,
}

impl GamepadReport {
    /// Size of the report on the wire.
    pub const SIZE: usize = 5;

    /// Neutral report: no buttons, axis at zero.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            axis: 0,
        }
    }

    /// Wire format: bitmap little-endian in three bytes (18 bits + padding),
    /// then the axis little-endian.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.raw().to_le_bytes();
        let axis = self.axis.to_le_bytes();
        [buttons[0], buttons[1], buttons[2], axis[0], axis[1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_press_is_idempotent() {
        let mut report = KeyboardReport::empty();
        report.press(0x29);
        let once = report;
        report.press(0x29);
        assert_eq!(report, once);
        assert_eq!(report.keycodes.iter().filter(|&&k| k == 0x29).count(), 1);
    }

    #[test]
    fn keyboard_release_is_idempotent() {
        let mut report = KeyboardReport::empty();
        report.release(0x29);
        assert_eq!(report, KeyboardReport::empty());
        report.press(0x29);
        report.release(0x29);
        report.release(0x29);
        assert_eq!(report, KeyboardReport::empty());
    }

    #[test]
    fn keyboard_rollover_drops_the_seventh_key() {
        let mut report = KeyboardReport::empty();
        for usage in 1..=7u8 {
            report.press(usage);
        }
        assert!(!report.contains(7));
        assert_eq!(report.keycodes, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn keyboard_wire_format() {
        let mut report = KeyboardReport::empty();
        report.press(0x29);
        assert_eq!(report.as_bytes(), [0, 0, 0x29, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn double_press_leaves_bitmap_unchanged() {
        let mut buttons = Buttons::NONE;
        buttons.set(6, true);
        let once = buttons;
        buttons.set(6, true);
        assert_eq!(buttons, once);
        buttons.set(6, false);
        assert!(buttons.is_empty());
    }

    #[test]
    fn out_of_range_button_is_ignored() {
        let mut buttons = Buttons::NONE;
        buttons.set(18, true);
        assert!(buttons.is_empty());
    }

    #[test]
    fn out_of_range_contains_is_false() {
        let buttons = Buttons(u32::MAX);
        assert!(buttons.contains(17));
        assert!(!buttons.contains(18));
        // Past the word width; must answer, not overflow the shift.
        assert!(!buttons.contains(32));
        assert!(!buttons.contains(u8::MAX));
    }

    #[test]
    fn gamepad_wire_format() {
        let mut report = GamepadReport::neutral();
        report.buttons.set(0, true);
        report.buttons.set(17, true);
        report.axis = 599;
        // bit 0 -> byte 0, bit 17 -> byte 2; axis 599 = 0x0257 LE
        assert_eq!(report.as_bytes(), [0x01, 0x00, 0x02, 0x57, 0x02]);
    }
}
