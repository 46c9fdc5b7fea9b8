//! Scancode table for the two programmable buttons.

use tbtn_driver_api::input::{KeyCode, KeyEntry};

/// Maps the `HINF` press codes to `KEY_PROG1` (A1) and `KEY_PROG2` (A2).
pub static TBTN_KEYMAP: [KeyEntry; 3] = [
    KeyEntry::key(57, KeyCode::PROG1),
    KeyEntry::key(67, KeyCode::PROG2),
    KeyEntry::END,
];

#[cfg(test)]
mod tests {
    use super::*;
    use tbtn_driver_api::input::KeyEntryKind;

    #[test]
    fn one_entry_per_button() {
        let keys: Vec<_> = TBTN_KEYMAP
            .iter()
            .filter(|e| e.kind == KeyEntryKind::Key)
            .map(|e| (e.code, e.keycode))
            .collect();
        assert_eq!(keys, [(57, KeyCode::PROG1), (67, KeyCode::PROG2)]);
        assert_eq!(TBTN_KEYMAP.last(), Some(&KeyEntry::END));
    }
}
