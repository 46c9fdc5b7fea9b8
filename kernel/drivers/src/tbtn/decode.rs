//! `HINF` value decoding.
//!
//! The firmware reports button activity as an integer whose low seven bits
//! identify the button and the transition. Everything above bit 6 is noise
//! as far as this driver is concerned.

use core::fmt;

/// Bits of the `HINF` result that carry the key value.
pub const KEY_VALUE_MASK: u64 = 0x7F;

/// One of the two programmable buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// The A1 button.
    A1,
    /// The A2 button.
    A2,
}

impl Button {
    /// The keymap scancode the button is reported under.
    #[must_use]
    pub const fn scancode(self) -> u32 {
        match self {
            Self::A1 => 57,
            Self::A2 => 67,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A1 => f.write_str("A1"),
            Self::A2 => f.write_str("A2"),
        }
    }
}

/// A decoded button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Which button changed.
    pub button: Button,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

/// Extracts the key value from a raw `HINF` result.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn key_value(raw: u64) -> u8 {
    (raw & KEY_VALUE_MASK) as u8
}

/// Decodes a raw `HINF` result. Returns `None` for unrecognized values.
#[must_use]
pub const fn decode(raw: u64) -> Option<ButtonEvent> {
    let (button, pressed) = match key_value(raw) {
        57 => (Button::A1, true),
        56 => (Button::A1, false),
        67 => (Button::A2, true),
        66 => (Button::A2, false),
        _ => return None,
    };
    Some(ButtonEvent { button, pressed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        let cases = [
            (0x39, Button::A1, true),
            (0x38, Button::A1, false),
            (0x43, Button::A2, true),
            (0x42, Button::A2, false),
        ];
        for (raw, button, pressed) in cases {
            assert_eq!(decode(raw), Some(ButtonEvent { button, pressed }), "raw {raw:#x}");
        }
    }

    #[test]
    fn upper_bits_are_ignored() {
        assert_eq!(decode(0xB9), decode(0x39));
        assert_eq!(decode(0xFFFF_FF42), decode(0x42));
        assert_eq!(decode(0x8000_0000_0000_0043), decode(0x43));
    }

    #[test]
    fn unknown_values_are_rejected() {
        for raw in [0x00, 0x3A, 0x44, 0x7F, 0xFF] {
            assert_eq!(decode(raw), None, "raw {raw:#x}");
        }
        assert_eq!(key_value(0xFF), 0x7F);
    }

    #[test]
    fn scancodes_match_press_codes() {
        assert_eq!(Button::A1.scancode(), 57);
        assert_eq!(Button::A2.scancode(), 67);
    }
}
