//! The ACPI bus: device enumeration, driver matching, and notification
//! routing.
//!
//! Devices and drivers may be registered in any order; whenever one side
//! appears, the bus tries to pair it with the other. A device is bound to at
//! most one driver. Notifications are delivered only to bound devices, and
//! all bus operations are serialized by the bus lock, so a driver never sees
//! a notification concurrently with its own `add` or `remove`.
//!
//! Notifications are queued and drained by a single dispatcher. A `Notify`
//! raised while another is being delivered (including one raised by firmware
//! from inside a driver's method evaluation) is appended to the queue and
//! delivered after the current one.
//!
//! Driver callbacks run under the bus lock and must not call any other bus
//! method.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use tbtn_acpi::NotifyCode;
use tbtn_core::sync::SpinLock;

use crate::acpi_device::{AcpiDeviceInfo, AcpiHandle};
use crate::error::DriverError;
use crate::firmware::{AcpiFirmware, FirmwareCapability};
use crate::input::InputCore;
use crate::probe_context::AcpiProbeContext;
use crate::registration::{AcpiBinding, AcpiDriverEntry};

struct Binding {
    driver: &'static AcpiDriverEntry,
    data: Box<dyn AcpiBinding>,
}

struct Device {
    info: AcpiDeviceInfo,
    binding: Option<Binding>,
}

struct BusState {
    devices: BTreeMap<AcpiHandle, Device>,
    drivers: Vec<&'static AcpiDriverEntry>,
}

/// The host's ACPI device bus.
pub struct AcpiBus {
    firmware: Arc<dyn AcpiFirmware>,
    input: Arc<InputCore>,
    state: SpinLock<BusState>,
    queued: SpinLock<VecDeque<(AcpiHandle, NotifyCode)>>,
    dispatching: AtomicBool,
}

impl AcpiBus {
    /// Creates an empty bus backed by `firmware` and `input`.
    #[must_use]
    pub fn new(firmware: Arc<dyn AcpiFirmware>, input: Arc<InputCore>) -> Self {
        Self {
            firmware,
            input,
            state: SpinLock::new(BusState {
                devices: BTreeMap::new(),
                drivers: Vec::new(),
            }),
            queued: SpinLock::new(VecDeque::new()),
            dispatching: AtomicBool::new(false),
        }
    }

    /// The input core handed to drivers.
    #[must_use]
    pub fn input(&self) -> &Arc<InputCore> {
        &self.input
    }

    /// Registers `entry` and binds it to every present, unbound device it
    /// matches. Returns the number of devices bound.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Busy`] if a driver with the same name is
    /// already registered.
    pub fn register_driver(&self, entry: &'static AcpiDriverEntry) -> Result<usize, DriverError> {
        let mut state = self.state.lock();
        if state.drivers.iter().any(|d| d.name == entry.name) {
            return Err(DriverError::Busy);
        }
        state.drivers.push(entry);

        let mut bound = 0;
        for device in state.devices.values_mut() {
            if device.binding.is_none() && self.try_bind(device, entry) {
                bound += 1;
            }
        }
        Ok(bound)
    }

    /// Unregisters `entry`, removing every binding it holds.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] if the driver is not registered.
    pub fn unregister_driver(&self, entry: &'static AcpiDriverEntry) -> Result<(), DriverError> {
        let removed: Vec<(AcpiHandle, Binding)> = {
            let mut state = self.state.lock();
            let before = state.drivers.len();
            state.drivers.retain(|d| d.name != entry.name);
            if state.drivers.len() == before {
                return Err(DriverError::NotFound);
            }
            state
                .devices
                .iter_mut()
                .filter(|(_, dev)| {
                    dev.binding
                        .as_ref()
                        .is_some_and(|b| b.driver.name == entry.name)
                })
                .filter_map(|(handle, dev)| dev.binding.take().map(|b| (*handle, b)))
                .collect()
        };

        for (handle, binding) in removed {
            Self::unbind(handle, binding);
        }
        Ok(())
    }

    /// Adds an enumerated device and binds the first registered driver that
    /// accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Busy`] if a device with the same handle exists.
    pub fn add_device(&self, info: AcpiDeviceInfo) -> Result<(), DriverError> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.devices.contains_key(&info.handle) {
            return Err(DriverError::Busy);
        }
        let mut device = Device {
            info,
            binding: None,
        };
        for &driver in &state.drivers {
            if self.try_bind(&mut device, driver) {
                break;
            }
        }
        state.devices.insert(info.handle, device);
        Ok(())
    }

    /// Removes a device, unbinding its driver first.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoDevice`] if the handle is unknown.
    pub fn remove_device(&self, handle: AcpiHandle) -> Result<(), DriverError> {
        let device = self
            .state
            .lock()
            .devices
            .remove(&handle)
            .ok_or(DriverError::NoDevice)?;
        if let Some(binding) = device.binding {
            Self::unbind(handle, binding);
        }
        Ok(())
    }

    /// Delivers a firmware notification to the driver bound to `handle`.
    ///
    /// If another notification is already being delivered, this one is
    /// queued behind it and the call returns immediately. Notifications for
    /// unknown or unbound devices are logged and dropped.
    pub fn notify(&self, handle: AcpiHandle, event: u32) {
        self.queued.lock().push_back((handle, NotifyCode(event)));
        while !self.dispatching.swap(true, Ordering::Acquire) {
            while let Some((handle, code)) = self.next_queued() {
                self.deliver(handle, code);
            }
            self.dispatching.store(false, Ordering::Release);
            // A notification queued after the last pop but before the
            // store above has no dispatcher yet.
            if self.queued.lock().is_empty() {
                break;
            }
        }
    }

    fn next_queued(&self) -> Option<(AcpiHandle, NotifyCode)> {
        self.queued.lock().pop_front()
    }

    fn deliver(&self, handle: AcpiHandle, code: NotifyCode) {
        let state = self.state.lock();
        match state.devices.get(&handle).and_then(|d| d.binding.as_ref()) {
            Some(binding) => {
                tbtn_core::ktrace!(
                    "ACPI: notify {} -> driver '{}' on {}",
                    code,
                    binding.driver.name,
                    handle
                );
                binding.data.notify(code);
            }
            None => tbtn_core::kwarn!("ACPI: notify {} for unbound {}, dropped", code, handle),
        }
    }

    /// Name of the driver bound to `handle`, if any.
    #[must_use]
    pub fn bound_driver(&self, handle: AcpiHandle) -> Option<&'static str> {
        self.state
            .lock()
            .devices
            .get(&handle)
            .and_then(|d| d.binding.as_ref())
            .map(|b| b.driver.name)
    }

    /// Number of known devices, bound or not.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.state.lock().devices.len()
    }

    fn try_bind(&self, device: &mut Device, driver: &'static AcpiDriverEntry) -> bool {
        let info = device.info;
        if !info.is_present() || !info.matches(driver.id_table) {
            return false;
        }
        tbtn_core::kinfo!(
            "ACPI: matched {} ({}) -> driver '{}'",
            info.path,
            info.hid,
            driver.name
        );

        let ctx = AcpiProbeContext {
            device: info,
            firmware: FirmwareCapability::new(info.handle, Arc::clone(&self.firmware)),
            input: Arc::clone(&self.input),
        };
        match (driver.add)(ctx) {
            Ok(data) => {
                tbtn_core::kinfo!("ACPI: driver '{}' bound to {}", driver.name, info.path);
                device.binding = Some(Binding { driver, data });
                true
            }
            Err(e) => {
                tbtn_core::kerr!(
                    "ACPI: driver '{}' probe failed on {}: {} ({})",
                    driver.name,
                    info.path,
                    e,
                    e.errno()
                );
                false
            }
        }
    }

    fn unbind(handle: AcpiHandle, binding: Binding) {
        let name = binding.driver.name;
        binding.data.remove();
        tbtn_core::kinfo!("ACPI: driver '{}' unbound from {}", name, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{OnceLock, Weak};
    use tbtn_acpi::{AcpiStatus, AmlPath, AmlValue, DeviceStatus, InlineString, NameSeg};

    use crate::acpi_device::AcpiMatchId;

    struct NoFirmware;

    impl AcpiFirmware for NoFirmware {
        fn evaluate_integer(&self, _: AcpiHandle, _: NameSeg) -> Result<u64, AcpiStatus> {
            Err(AcpiStatus::NotFound)
        }
    }

    static NOTIFIED: AtomicUsize = AtomicUsize::new(0);
    static REMOVED: AtomicUsize = AtomicUsize::new(0);

    struct Counting;

    impl AcpiBinding for Counting {
        fn notify(&self, _event: NotifyCode) {
            NOTIFIED.fetch_add(1, Ordering::SeqCst);
        }

        fn remove(self: Box<Self>) {
            REMOVED.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn add_counting(_ctx: AcpiProbeContext) -> Result<Box<dyn AcpiBinding>, DriverError> {
        Ok(Box::new(Counting))
    }

    fn add_failing(_ctx: AcpiProbeContext) -> Result<Box<dyn AcpiBinding>, DriverError> {
        Err(DriverError::NoMemory)
    }

    static COUNTING: AcpiDriverEntry = AcpiDriverEntry {
        name: "counting",
        class: "test",
        id_table: &[AcpiMatchId::eisa("MAT002A")],
        add: add_counting,
    };

    static FAILING: AcpiDriverEntry = AcpiDriverEntry {
        name: "failing",
        class: "test",
        id_table: &[AcpiMatchId::eisa("MAT002B")],
        add: add_failing,
    };

    struct Evaluating(FirmwareCapability);

    impl AcpiBinding for Evaluating {
        fn notify(&self, _event: NotifyCode) {
            let _ = self.0.evaluate_integer(NameSeg(*b"HINF"));
        }
    }

    fn add_evaluating(ctx: AcpiProbeContext) -> Result<Box<dyn AcpiBinding>, DriverError> {
        Ok(Box::new(Evaluating(ctx.firmware)))
    }

    static EVALUATING: AcpiDriverEntry = AcpiDriverEntry {
        name: "evaluating",
        class: "test",
        id_table: &[AcpiMatchId::string("TEST0001")],
        add: add_evaluating,
    };

    /// Raises a second notification from inside the first evaluation.
    #[derive(Default)]
    struct NotifyingFirmware {
        bus: OnceLock<Weak<AcpiBus>>,
        calls: AtomicUsize,
    }

    impl AcpiFirmware for NotifyingFirmware {
        fn evaluate_integer(&self, handle: AcpiHandle, _: NameSeg) -> Result<u64, AcpiStatus> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                if let Some(bus) = self.bus.get().and_then(Weak::upgrade) {
                    bus.notify(handle, 0x80);
                }
            }
            Ok(0)
        }
    }

    fn device(handle: u64, hid: u32) -> AcpiDeviceInfo {
        AcpiDeviceInfo {
            handle: AcpiHandle(handle),
            path: AmlPath::parse("\\_SB_.TBTN").unwrap(),
            hid: AmlValue::Integer(u64::from(hid)),
            cid: None,
            uid: None,
            status: DeviceStatus::default(),
        }
    }

    fn bus() -> AcpiBus {
        AcpiBus::new(Arc::new(NoFirmware), Arc::new(InputCore::default()))
    }

    // NOTIFIED and REMOVED are shared, so every assertion on them lives here.
    #[test]
    fn bind_notify_unbind() {
        let bus = bus();
        bus.add_device(device(1, 0x2A00_3434)).unwrap();
        bus.add_device(device(2, 0x0000_0001)).unwrap();
        assert_eq!(bus.register_driver(&COUNTING), Ok(1));
        assert_eq!(bus.bound_driver(AcpiHandle(1)), Some("counting"));
        assert_eq!(bus.bound_driver(AcpiHandle(2)), None);

        bus.notify(AcpiHandle(1), 0x80);
        bus.notify(AcpiHandle(2), 0x80);
        bus.notify(AcpiHandle(9), 0x80);
        assert_eq!(NOTIFIED.load(Ordering::SeqCst), 1);

        bus.unregister_driver(&COUNTING).unwrap();
        assert_eq!(REMOVED.load(Ordering::SeqCst), 1);
        assert_eq!(bus.bound_driver(AcpiHandle(1)), None);

        bus.notify(AcpiHandle(1), 0x80);
        assert_eq!(NOTIFIED.load(Ordering::SeqCst), 1);
        assert_eq!(bus.unregister_driver(&COUNTING), Err(DriverError::NotFound));
    }

    #[test]
    fn duplicates_are_rejected() {
        let bus = bus();
        bus.register_driver(&FAILING).unwrap();
        assert_eq!(bus.register_driver(&FAILING), Err(DriverError::Busy));
        bus.add_device(device(3, 0x2B00_3434)).unwrap();
        assert_eq!(
            bus.add_device(device(3, 0x2B00_3434)),
            Err(DriverError::Busy)
        );
    }

    #[test]
    fn failed_probe_leaves_device_unbound() {
        let bus = bus();
        bus.register_driver(&FAILING).unwrap();
        bus.add_device(device(4, 0x2B00_3434)).unwrap();
        assert_eq!(bus.device_count(), 1);
        assert_eq!(bus.bound_driver(AcpiHandle(4)), None);
        assert_eq!(bus.remove_device(AcpiHandle(4)), Ok(()));
        assert_eq!(bus.remove_device(AcpiHandle(4)), Err(DriverError::NoDevice));
    }

    #[test]
    fn absent_devices_are_not_bound() {
        let bus = bus();
        let mut info = device(5, 0x2B00_3434);
        info.status = DeviceStatus::empty();
        bus.add_device(info).unwrap();
        assert_eq!(bus.register_driver(&FAILING), Ok(0));
    }

    #[test]
    fn notify_raised_during_delivery_is_queued() {
        let firmware = Arc::new(NotifyingFirmware::default());
        let bus = Arc::new(AcpiBus::new(
            firmware.clone(),
            Arc::new(InputCore::default()),
        ));
        assert!(firmware.bus.set(Arc::downgrade(&bus)).is_ok());

        let mut info = device(6, 0);
        info.hid = AmlValue::String(InlineString::new("TEST0001"));
        bus.add_device(info).unwrap();
        assert_eq!(bus.register_driver(&EVALUATING), Ok(1));

        bus.notify(AcpiHandle(6), 0x80);
        assert_eq!(firmware.calls.load(Ordering::SeqCst), 2);

        bus.notify(AcpiHandle(6), 0x80);
        assert_eq!(firmware.calls.load(Ordering::SeqCst), 3);
    }
}
