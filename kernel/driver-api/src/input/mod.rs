//! Virtual input devices.
//!
//! Drivers allocate an [`InputDevice`] from the [`InputCore`], declare its
//! capabilities (usually through [`sparse_keymap::setup`]), and register it.
//! The returned [`InputHandle`] is the only way to emit events, and dropping
//! it unregisters the device.

pub mod codes;
pub mod core;
pub mod device;
pub mod event;
pub mod sparse_keymap;

pub use self::core::{DEFAULT_MAX_DEVICES, InputCore, InputDeviceInfo, InputHandle, InputHandler};
pub use codes::{BusType, EventType, EventTypes, KeyCode, MSC_SCAN, SYN_REPORT};
pub use device::{InputDevice, InputId};
pub use event::InputEvent;
pub use sparse_keymap::{KeyEntry, KeyEntryKind};
