//! The input core: device registration and event routing.
//!
//! Registered devices live in the core's table and are addressed by number
//! (`input0`, `input1`, ...). Drivers keep an [`InputHandle`]; dropping it
//! unregisters the device, releases any keys still held down, and tells
//! every handler the device is gone.
//!
//! Events are filtered the way evdev consumers expect: types and codes the
//! device did not declare are dropped, key events that do not change the key
//! state are dropped, and accepted events are buffered until `SYN_REPORT`,
//! at which point the whole batch is handed to the connected handlers.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use tbtn_core::sync::SpinLock;

use super::codes::{EventType, EventTypes, KeyCode, MSC_SCAN, SYN_REPORT};
use super::device::{DeviceSlot, InputDevice, InputId, KeyBitmap};
use super::event::InputEvent;
use super::sparse_keymap::KeyEntry;
use crate::error::DriverError;

/// Device capacity used by [`InputCore::default`].
pub const DEFAULT_MAX_DEVICES: usize = 32;

/// Snapshot of a registered device, passed to handlers on connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDeviceInfo {
    /// Device number (`inputN`).
    pub number: u32,
    /// Device name.
    pub name: &'static str,
    /// Physical path.
    pub phys: &'static str,
    /// Bus and vendor identity.
    pub id: InputId,
}

/// A consumer of input events (an evdev node, a console, a test recorder).
pub trait InputHandler: Send + Sync {
    /// Called once per registered device when the handler connects, and for
    /// every device registered afterwards.
    fn connect(&self, _device: &InputDeviceInfo) {}

    /// Receives one batch of events, always ending with `SYN_REPORT`.
    fn events(&self, device: u32, events: &[InputEvent]);

    /// Called after a device has been unregistered.
    fn disconnect(&self, _device: u32) {}
}

struct Registered {
    number: u32,
    dev: InputDevice,
    key_state: KeyBitmap,
    pending: Vec<InputEvent>,
}

impl Registered {
    fn info(&self) -> InputDeviceInfo {
        InputDeviceInfo {
            number: self.number,
            name: self.dev.name,
            phys: self.dev.phys,
            id: self.dev.id,
        }
    }

    /// Applies one event. Returns the completed batch on `SYN_REPORT`.
    fn handle_event(&mut self, kind: EventType, code: u16, value: i32) -> Option<Vec<InputEvent>> {
        if !self.dev.evbits.contains(kind.bit()) {
            return None;
        }
        match kind {
            EventType::Syn if code == SYN_REPORT => {
                self.pending.push(InputEvent::sync());
                let batch = core::mem::take(&mut self.pending);
                // A lone SYN_REPORT carries no information.
                (batch.len() >= 2).then_some(batch)
            }
            EventType::Key => {
                let key = KeyCode(code);
                if !self.dev.keybits.test(key) {
                    return None;
                }
                let down = value != 0;
                if value != 2 {
                    if self.key_state.test(key) == down {
                        return None;
                    }
                    if down {
                        self.key_state.set(key);
                    } else {
                        self.key_state.clear(key);
                    }
                }
                self.pending.push(InputEvent::new(kind, code, value));
                None
            }
            EventType::Msc if code == MSC_SCAN && self.dev.scan_supported => {
                self.pending.push(InputEvent::new(kind, code, value));
                None
            }
            _ => None,
        }
    }

    /// Builds the batch that releases every key still held down.
    fn release_keys(&mut self) -> Option<Vec<InputEvent>> {
        let mut batch: Vec<InputEvent> = self
            .key_state
            .iter()
            .map(|key| InputEvent::key(key, false))
            .collect();
        if batch.is_empty() {
            return None;
        }
        self.key_state = KeyBitmap::new();
        batch.push(InputEvent::sync());
        Some(batch)
    }
}

struct CoreState {
    devices: BTreeMap<u32, Registered>,
    handlers: Vec<Arc<dyn InputHandler>>,
    next_number: u32,
}

/// The host input subsystem.
pub struct InputCore {
    max_devices: usize,
    allocated: Arc<AtomicUsize>,
    state: SpinLock<CoreState>,
}

impl InputCore {
    /// Creates an input core that allows at most `max_devices` devices to be
    /// allocated at once (registered devices included).
    #[must_use]
    pub fn new(max_devices: usize) -> Self {
        Self {
            max_devices,
            allocated: Arc::new(AtomicUsize::new(0)),
            state: SpinLock::new(CoreState {
                devices: BTreeMap::new(),
                handlers: Vec::new(),
                next_number: 0,
            }),
        }
    }

    /// Allocates an empty device.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoMemory`] when the device table is full.
    pub fn allocate_device(&self) -> Result<InputDevice, DriverError> {
        DeviceSlot::claim(&self.allocated, self.max_devices)
            .map(InputDevice::new)
            .ok_or(DriverError::NoMemory)
    }

    /// Registers `dev` and returns the handle that owns the registration.
    ///
    /// `EV_SYN` is always added to the device's event types.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidArgument`] if the device has no name or
    /// declares no event types.
    pub fn register_device(
        self: &Arc<Self>,
        mut dev: InputDevice,
    ) -> Result<InputHandle, DriverError> {
        if dev.name.is_empty() || dev.evbits.is_empty() {
            return Err(DriverError::InvalidArgument);
        }
        dev.evbits |= EventTypes::SYN;

        let (info, handlers) = {
            let mut state = self.state.lock();
            let number = state.next_number;
            state.next_number += 1;
            let entry = Registered {
                number,
                dev,
                key_state: KeyBitmap::new(),
                pending: Vec::new(),
            };
            let info = entry.info();
            state.devices.insert(number, entry);
            (info, state.handlers.clone())
        };

        tbtn_core::kinfo!(
            "input: {} as input{} ({})",
            info.name,
            info.number,
            info.phys
        );
        for handler in &handlers {
            handler.connect(&info);
        }

        Ok(InputHandle {
            core: Arc::clone(self),
            number: info.number,
        })
    }

    /// Connects an event consumer. It is immediately told about every device
    /// already registered.
    pub fn connect_handler(&self, handler: Arc<dyn InputHandler>) {
        let connected = Arc::clone(&handler);
        let existing: Vec<InputDeviceInfo> = {
            let mut state = self.state.lock();
            state.handlers.push(handler);
            state.devices.values().map(Registered::info).collect()
        };
        for info in &existing {
            connected.connect(info);
        }
    }

    /// Number of registered devices.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.state.lock().devices.len()
    }

    /// Number of allocated devices, registered or not.
    #[must_use]
    pub fn allocated_count(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    /// Looks up a registered device by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<InputDeviceInfo> {
        self.state
            .lock()
            .devices
            .values()
            .find(|r| r.dev.name == name)
            .map(Registered::info)
    }

    fn dispatch(&self, number: u32, kind: EventType, code: u16, value: i32) {
        let delivery = {
            let mut state = self.state.lock();
            let batch = state
                .devices
                .get_mut(&number)
                .and_then(|r| r.handle_event(kind, code, value));
            batch.map(|batch| (batch, state.handlers.clone()))
        };
        if let Some((batch, handlers)) = delivery {
            for handler in &handlers {
                handler.events(number, &batch);
            }
        }
    }

    fn with_device<R>(&self, number: u32, f: impl FnOnce(&InputDevice) -> R) -> Option<R> {
        self.state.lock().devices.get(&number).map(|r| f(&r.dev))
    }

    fn unregister(&self, number: u32) {
        let (removed, release, handlers) = {
            let mut state = self.state.lock();
            let Some(mut removed) = state.devices.remove(&number) else {
                return;
            };
            let release = removed.release_keys();
            (removed, release, state.handlers.clone())
        };

        for handler in &handlers {
            if let Some(batch) = &release {
                handler.events(number, batch);
            }
            handler.disconnect(number);
        }
        tbtn_core::kinfo!("input: unregistered input{} ({})", number, removed.dev.name);
    }
}

impl Default for InputCore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEVICES)
    }
}

/// Ownership of one registered input device.
///
/// Dropping the handle unregisters the device.
pub struct InputHandle {
    core: Arc<InputCore>,
    number: u32,
}

impl InputHandle {
    /// Device number (`inputN`).
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Submits one event. Events are delivered to handlers at the next
    /// [`sync`](Self::sync).
    pub fn event(&self, kind: EventType, code: u16, value: i32) {
        self.core.dispatch(self.number, kind, code, value);
    }

    /// Reports a key state.
    pub fn report_key(&self, key: KeyCode, pressed: bool) {
        self.event(EventType::Key, key.0, i32::from(pressed));
    }

    /// Closes the current batch with `SYN_REPORT`.
    pub fn sync(&self) {
        self.event(EventType::Syn, SYN_REPORT, 0);
    }

    /// Returns `true` while `key` is held down.
    #[must_use]
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        let state = self.core.state.lock();
        state
            .devices
            .get(&self.number)
            .is_some_and(|r| r.key_state.test(key))
    }

    pub(crate) fn find_entry(&self, pred: impl Fn(&KeyEntry) -> bool) -> Option<KeyEntry> {
        self.core
            .with_device(self.number, |dev| dev.keymap.iter().copied().find(|e| pred(e)))
            .flatten()
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.core.unregister(self.number);
    }
}
