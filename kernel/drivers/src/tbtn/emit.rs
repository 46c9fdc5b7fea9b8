//! Forwarding decoded button events to the input core.

use tbtn_driver_api::InputHandle;
use tbtn_driver_api::input::sparse_keymap;

use super::decode::ButtonEvent;

/// Reports `event` through the device's sparse keymap.
///
/// Returns `false` if the button's scancode is missing from the keymap, in
/// which case a `KEY_UNKNOWN` event was emitted instead. Releases come from
/// firmware, so presses are not auto-released.
pub fn report(input: &InputHandle, event: ButtonEvent) -> bool {
    sparse_keymap::report_event(
        input,
        event.button.scancode(),
        i32::from(event.pressed),
        false,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tbtn_driver_api::InputCore;
    use tbtn_driver_api::input::{KeyCode, KeyEntry};

    use super::*;
    use crate::tbtn::decode::Button;

    fn device_with(keymap: &[KeyEntry]) -> (Arc<InputCore>, InputHandle) {
        let core = Arc::new(InputCore::default());
        let mut dev = core.allocate_device().unwrap();
        dev.name = "Emit Test";
        sparse_keymap::setup(&mut dev, keymap).unwrap();
        let handle = core.register_device(dev).unwrap();
        (core, handle)
    }

    #[test]
    fn mapped_button_is_reported() {
        let (_core, input) = device_with(&crate::tbtn::keymap::TBTN_KEYMAP);
        let press = ButtonEvent {
            button: Button::A2,
            pressed: true,
        };
        assert!(report(&input, press));
        assert!(input.key_pressed(KeyCode::PROG2));
    }

    #[test]
    fn missing_keymap_entry_fails() {
        let (_core, input) =
            device_with(&[KeyEntry::key(57, KeyCode::PROG1), KeyEntry::END]);
        let press = ButtonEvent {
            button: Button::A2,
            pressed: true,
        };
        assert!(!report(&input, press));
        assert!(!input.key_pressed(KeyCode::PROG2));
    }
}
