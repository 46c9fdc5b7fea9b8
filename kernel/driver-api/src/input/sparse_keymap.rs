//! Sparse keymaps: tables translating firmware scancodes to key codes.
//!
//! A keymap is a slice of [`KeyEntry`] terminated by [`KeyEntry::END`].
//! [`setup`] copies the table into the device and declares the matching
//! capabilities; [`report_event`] looks a scancode up and emits the
//! `MSC_SCAN` + key + `SYN_REPORT` sequence for it.

use alloc::vec::Vec;

use super::codes::{EventType, KeyCode, MSC_SCAN};
use super::core::InputHandle;
use super::device::InputDevice;
use crate::error::DriverError;

/// What a keymap entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEntryKind {
    /// Report the entry's key code.
    Key,
    /// Swallow the scancode silently.
    Ignore,
    /// End of table.
    End,
}

/// One scancode mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Entry kind.
    pub kind: KeyEntryKind,
    /// Firmware scancode.
    pub code: u32,
    /// Key reported for `code` (unused for `Ignore` and `End`).
    pub keycode: KeyCode,
}

impl KeyEntry {
    /// Table terminator.
    pub const END: Self = Self {
        kind: KeyEntryKind::End,
        code: 0,
        keycode: KeyCode::RESERVED,
    };

    /// Maps `code` to `keycode`.
    #[must_use]
    pub const fn key(code: u32, keycode: KeyCode) -> Self {
        Self {
            kind: KeyEntryKind::Key,
            code,
            keycode,
        }
    }

    /// Swallows `code`.
    #[must_use]
    pub const fn ignore(code: u32) -> Self {
        Self {
            kind: KeyEntryKind::Ignore,
            code,
            keycode: KeyCode::RESERVED,
        }
    }
}

/// Installs `keymap` into `dev`.
///
/// Every `Key` entry's key code is declared, plus `KEY_UNKNOWN` and
/// `EV_MSC`/`MSC_SCAN` so unmapped scancodes can still be reported.
/// Entries after the first `End` are ignored.
///
/// # Errors
///
/// Returns [`DriverError::InvalidArgument`] if a scancode appears twice or a
/// key code is out of range. The device is left unchanged on error.
pub fn setup(dev: &mut InputDevice, keymap: &[KeyEntry]) -> Result<(), DriverError> {
    let entries: Vec<KeyEntry> = keymap
        .iter()
        .copied()
        .take_while(|e| e.kind != KeyEntryKind::End)
        .collect();

    for (i, entry) in entries.iter().enumerate() {
        if entries[..i].iter().any(|prev| prev.code == entry.code) {
            tbtn_core::kerr!("sparse-keymap: duplicate scancode {:#x}", entry.code);
            return Err(DriverError::InvalidArgument);
        }
        if entry.kind == KeyEntryKind::Key && entry.keycode > KeyCode::MAX {
            tbtn_core::kerr!("sparse-keymap: key code {} out of range", entry.keycode.0);
            return Err(DriverError::InvalidArgument);
        }
    }

    for entry in entries.iter().filter(|e| e.kind == KeyEntryKind::Key) {
        dev.set_capability(EventType::Key, entry.keycode.0);
    }
    if dev.event_types().contains(EventType::Key.bit()) {
        dev.set_capability(EventType::Key, KeyCode::UNKNOWN.0);
        dev.set_capability(EventType::Msc, MSC_SCAN);
    }
    dev.keymap = entries;
    Ok(())
}

/// Finds the entry for firmware scancode `code`.
#[must_use]
pub fn entry_from_scancode(handle: &InputHandle, code: u32) -> Option<KeyEntry> {
    handle.find_entry(|e| e.code == code)
}

/// Finds the first `Key` entry reporting `keycode`.
#[must_use]
pub fn entry_from_keycode(handle: &InputHandle, keycode: KeyCode) -> Option<KeyEntry> {
    handle.find_entry(|e| e.kind == KeyEntryKind::Key && e.keycode == keycode)
}

/// Emits the events for `entry`.
///
/// A `Key` entry produces `MSC_SCAN`, the key at `value`, and `SYN_REPORT`.
/// With `autorelease` set, a pressed key is followed by an immediate release
/// and a second `SYN_REPORT`. `Ignore` entries produce nothing.
pub fn report_entry(handle: &InputHandle, entry: &KeyEntry, value: i32, autorelease: bool) {
    if entry.kind != KeyEntryKind::Key {
        return;
    }
    // Scancodes are forwarded bit-for-bit.
    #[allow(clippy::cast_possible_wrap)]
    handle.event(EventType::Msc, MSC_SCAN, entry.code as i32);
    handle.event(EventType::Key, entry.keycode.0, value);
    handle.sync();
    if value != 0 && autorelease {
        handle.event(EventType::Key, entry.keycode.0, 0);
        handle.sync();
    }
}

/// Looks up `code` and reports it.
///
/// Returns `true` if the scancode was in the keymap. Unmapped scancodes are
/// reported as `KEY_UNKNOWN` with autorelease, and `false` is returned.
pub fn report_event(handle: &InputHandle, code: u32, value: i32, autorelease: bool) -> bool {
    if let Some(entry) = entry_from_scancode(handle, code) {
        report_entry(handle, &entry, value, autorelease);
        return true;
    }
    let unknown = KeyEntry::key(code, KeyCode::UNKNOWN);
    report_entry(handle, &unknown, value, true);
    false
}
