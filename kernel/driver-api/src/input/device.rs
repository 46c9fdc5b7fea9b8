//! Allocated-but-unregistered input devices.
//!
//! A driver obtains an [`InputDevice`] from
//! [`InputCore::allocate_device`](super::InputCore::allocate_device), fills in
//! identity and capabilities, then hands it to
//! [`InputCore::register_device`](super::InputCore::register_device).
//! Dropping an unregistered device releases its allocation.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::codes::{BusType, EventType, EventTypes, KeyCode, MSC_SCAN};
use super::sparse_keymap::KeyEntry;

/// Device identity reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputId {
    /// Bus the device sits on.
    pub bustype: BusType,
    /// Vendor ID.
    pub vendor: u16,
    /// Product ID.
    pub product: u16,
    /// Version.
    pub version: u16,
}

const KEY_WORDS: usize = KeyCode::COUNT.div_ceil(64);

/// One bit per key code.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct KeyBitmap([u64; KEY_WORDS]);

impl KeyBitmap {
    pub(crate) const fn new() -> Self {
        Self([0; KEY_WORDS])
    }

    pub(crate) fn set(&mut self, key: KeyCode) {
        let i = usize::from(key.0);
        self.0[i / 64] |= 1 << (i % 64);
    }

    pub(crate) fn clear(&mut self, key: KeyCode) {
        let i = usize::from(key.0);
        self.0[i / 64] &= !(1 << (i % 64));
    }

    pub(crate) fn test(&self, key: KeyCode) -> bool {
        let i = usize::from(key.0);
        i < KeyCode::COUNT && self.0[i / 64] & (1 << (i % 64)) != 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        (0..KeyCode::COUNT)
            .filter_map(|i| u16::try_from(i).ok().map(KeyCode))
            .filter(|&k| self.test(k))
    }
}

/// Releases one allocation from the owning core when dropped.
pub(crate) struct DeviceSlot {
    allocated: Arc<AtomicUsize>,
}

impl DeviceSlot {
    /// Claims a slot if fewer than `max` are in use.
    pub(crate) fn claim(allocated: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        allocated
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .ok()
            .map(|_| Self {
                allocated: Arc::clone(allocated),
            })
    }
}

impl Drop for DeviceSlot {
    fn drop(&mut self) {
        self.allocated.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A virtual input device that has not been registered yet.
pub struct InputDevice {
    /// Human-readable device name. Registration rejects an empty name.
    pub name: &'static str,
    /// Physical path (e.g. `tbtn/input0`).
    pub phys: &'static str,
    /// Bus and vendor identity.
    pub id: InputId,
    pub(crate) evbits: EventTypes,
    pub(crate) keybits: KeyBitmap,
    pub(crate) scan_supported: bool,
    pub(crate) keymap: Vec<KeyEntry>,
    // Held for its Drop, which returns the allocation to the core.
    _slot: DeviceSlot,
}

impl InputDevice {
    pub(crate) fn new(slot: DeviceSlot) -> Self {
        Self {
            name: "",
            phys: "",
            id: InputId::default(),
            evbits: EventTypes::empty(),
            keybits: KeyBitmap::new(),
            scan_supported: false,
            keymap: Vec::new(),
            _slot: slot,
        }
    }

    /// Declares that the device can emit `code` events of type `kind`.
    ///
    /// Only [`EventType::Key`] codes and `EV_MSC`/[`MSC_SCAN`] carry per-code
    /// state; other types only record the type bit.
    pub fn set_capability(&mut self, kind: EventType, code: u16) {
        self.evbits |= kind.bit();
        match kind {
            EventType::Key if usize::from(code) < KeyCode::COUNT => self.keybits.set(KeyCode(code)),
            EventType::Msc if code == MSC_SCAN => self.scan_supported = true,
            _ => {}
        }
    }

    /// Event types this device can emit.
    #[must_use]
    pub fn event_types(&self) -> EventTypes {
        self.evbits
    }

    /// Returns `true` if the device declares `key`.
    #[must_use]
    pub fn has_key(&self, key: KeyCode) -> bool {
        self.keybits.test(key)
    }

    /// The installed sparse keymap, without its `End` sentinel.
    #[must_use]
    pub fn keymap(&self) -> &[KeyEntry] {
        &self.keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_set_clear() {
        let mut map = KeyBitmap::new();
        map.set(KeyCode::PROG1);
        map.set(KeyCode::MAX);
        assert!(map.test(KeyCode::PROG1));
        assert!(map.test(KeyCode::MAX));
        assert!(!map.test(KeyCode::PROG2));
        map.clear(KeyCode::PROG1);
        assert!(!map.test(KeyCode::PROG1));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![KeyCode::MAX]);
    }

    #[test]
    fn bitmap_rejects_out_of_range() {
        assert!(!KeyBitmap::new().test(KeyCode(0x300)));
    }

    #[test]
    fn slots_are_bounded_and_released() {
        let allocated = Arc::new(AtomicUsize::new(0));
        let first = DeviceSlot::claim(&allocated, 1).unwrap();
        assert!(DeviceSlot::claim(&allocated, 1).is_none());
        drop(first);
        assert!(DeviceSlot::claim(&allocated, 1).is_some());
        assert_eq!(allocated.load(Ordering::Acquire), 0);
    }

    #[test]
    fn capabilities_accumulate() {
        let allocated = Arc::new(AtomicUsize::new(0));
        let mut dev = InputDevice::new(DeviceSlot::claim(&allocated, 1).unwrap());
        dev.set_capability(EventType::Key, KeyCode::PROG1.0);
        dev.set_capability(EventType::Msc, MSC_SCAN);
        assert!(dev.has_key(KeyCode::PROG1));
        assert!(dev.scan_supported);
        assert_eq!(dev.event_types(), EventTypes::KEY | EventTypes::MSC);
    }
}
