//! Input event types and codes.
//!
//! Numbering follows `linux/input-event-codes.h` so events can be forwarded
//! to evdev consumers unchanged.

use core::fmt;

use bitflags::bitflags;

/// Event type of an [`InputEvent`](super::InputEvent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EventType {
    /// Synchronization marker.
    Syn = 0x00,
    /// Key press or release.
    Key = 0x01,
    /// Relative axis movement.
    Rel = 0x02,
    /// Absolute axis position.
    Abs = 0x03,
    /// Miscellaneous data such as raw scancodes.
    Msc = 0x04,
    /// Binary switch state.
    Sw = 0x05,
}

impl EventType {
    /// Returns the capability bit for this type.
    #[must_use]
    pub const fn bit(self) -> EventTypes {
        EventTypes::from_bits_retain(1 << self as u16)
    }
}

bitflags! {
    /// Set of event types a device can emit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EventTypes: u32 {
        /// [`EventType::Syn`].
        const SYN = 1 << 0x00;
        /// [`EventType::Key`].
        const KEY = 1 << 0x01;
        /// [`EventType::Rel`].
        const REL = 1 << 0x02;
        /// [`EventType::Abs`].
        const ABS = 1 << 0x03;
        /// [`EventType::Msc`].
        const MSC = 1 << 0x04;
        /// [`EventType::Sw`].
        const SW  = 1 << 0x05;
    }
}

/// `EV_SYN` code closing one batch of events.
pub const SYN_REPORT: u16 = 0x00;

/// `EV_MSC` code carrying the raw scancode behind a key event.
pub const MSC_SCAN: u16 = 0x04;

/// A key code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    /// `KEY_RESERVED`; never reported.
    pub const RESERVED: Self = Self(0);
    /// `KEY_PROG1`: first programmable key.
    pub const PROG1: Self = Self(148);
    /// `KEY_PROG2`: second programmable key.
    pub const PROG2: Self = Self(149);
    /// `KEY_PROG3`.
    pub const PROG3: Self = Self(202);
    /// `KEY_PROG4`.
    pub const PROG4: Self = Self(203);
    /// `KEY_UNKNOWN`: reported for scancodes missing from a keymap.
    pub const UNKNOWN: Self = Self(240);
    /// `KEY_MAX`: highest valid key code.
    pub const MAX: Self = Self(0x2ff);

    /// Number of key codes (`KEY_CNT`).
    pub const COUNT: usize = Self::MAX.0 as usize + 1;

    const fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "KEY_RESERVED",
            148 => "KEY_PROG1",
            149 => "KEY_PROG2",
            202 => "KEY_PROG3",
            203 => "KEY_PROG4",
            240 => "KEY_UNKNOWN",
            _ => return None,
        })
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "KeyCode({})", self.0),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Bus a device is attached to, as reported in its [`InputId`](super::InputId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusType(pub u16);

impl BusType {
    /// `BUS_PCI`.
    pub const PCI: Self = Self(0x01);
    /// `BUS_USB`.
    pub const USB: Self = Self(0x03);
    /// `BUS_VIRTUAL`.
    pub const VIRTUAL: Self = Self(0x06);
    /// `BUS_HOST`: devices built into the host platform.
    pub const HOST: Self = Self(0x19);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_bits() {
        assert_eq!(EventType::Key.bit(), EventTypes::KEY);
        assert_eq!(EventType::Msc.bit(), EventTypes::MSC);
    }

    #[test]
    fn key_codes_match_evdev() {
        assert_eq!(KeyCode::PROG1.0, 148);
        assert_eq!(KeyCode::PROG2.0, 149);
        assert_eq!(KeyCode::UNKNOWN.0, 240);
        assert_eq!(KeyCode::COUNT, 0x300);
        assert_eq!(format!("{:?}", KeyCode::PROG2), "KEY_PROG2");
        assert_eq!(format!("{:?}", KeyCode(30)), "KeyCode(30)");
    }
}
