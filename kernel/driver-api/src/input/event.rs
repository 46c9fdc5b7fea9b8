//! The event record delivered to input handlers.

use super::codes::{EventType, KeyCode, MSC_SCAN, SYN_REPORT};

/// A single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Event type.
    pub kind: EventType,
    /// Type-specific code (key code, `MSC_SCAN`, `SYN_REPORT`, ...).
    pub code: u16,
    /// Value: 1 = press, 0 = release for keys; the scancode for `MSC_SCAN`.
    pub value: i32,
}

impl InputEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(kind: EventType, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    /// A key press (`pressed`) or release event.
    #[must_use]
    pub const fn key(key: KeyCode, pressed: bool) -> Self {
        Self::new(EventType::Key, key.0, pressed as i32)
    }

    /// A raw scancode event.
    #[must_use]
    pub const fn scan(scancode: i32) -> Self {
        Self::new(EventType::Msc, MSC_SCAN, scancode)
    }

    /// The `SYN_REPORT` marker closing a batch.
    #[must_use]
    pub const fn sync() -> Self {
        Self::new(EventType::Syn, SYN_REPORT, 0)
    }
}
