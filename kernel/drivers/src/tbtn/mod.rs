//! Panasonic Toughpad `TBTN` A1/A2 button driver.
//!
//! The Toughpad exposes its two programmable front-panel buttons as an ACPI
//! device (`MAT002A`, or `MAT002B` on later firmware). Every press and
//! release raises `Notify(TBTN, 0x80)`; the driver then evaluates `HINF` to
//! learn which button changed and forwards the transition to a virtual input
//! device as `KEY_PROG1` (A1) or `KEY_PROG2` (A2).

pub mod decode;
pub mod emit;
pub mod keymap;


use alloc::boxed::Box;

use tbtn_acpi::{NameSeg, NotifyCode};
use tbtn_core::{kerr, kinfo, kwarn};
use tbtn_driver_api::input::{BusType, sparse_keymap};
use tbtn_driver_api::registration::{AcpiBinding, AcpiDriverEntry};
use tbtn_driver_api::{
    AcpiBus, AcpiMatchId, AcpiProbeContext, DriverError, FirmwareCapability, InputHandle,
    ModuleInfo,
};

use self::keymap::TBTN_KEYMAP;

/// Control method returning the last button transition.
pub const HINF: NameSeg = NameSeg::new(*b"HINF");

/// Notification raised on every button transition.
pub const NOTIFY_BUTTON: NotifyCode = NotifyCode::DEVICE_SPECIFIC;

/// Name of the virtual input device.
pub const DEVICE_NAME: &str = "TBTN A1/A2 Buttons";

/// Physical path of the virtual input device.
pub const DEVICE_PHYS: &str = "tbtn/input0";

/// Hardware IDs the driver binds to.
pub static TBTN_IDS: [AcpiMatchId; 2] = [
    AcpiMatchId::eisa("MAT002A"),
    AcpiMatchId::eisa("MAT002B"),
];

tbtn_driver_api::acpi_driver_entry!(
    /// The `TBTN` driver entry.
    TBTN_DRIVER,
    AcpiDriverEntry {
        name: "tbtn_driver",
        class: "tbtn",
        id_table: &TBTN_IDS,
        add,
    }
);

/// Module metadata.
pub static MODULE_INFO: ModuleInfo = ModuleInfo {
    name: "tbtn",
    author: "sh1ma",
    description: "TOUGHPAD ACPI TBTN A1/A2 Button Driver",
    license: "GPL",
};

/// Driver state for one bound `TBTN` device.
pub struct Tbtn {
    firmware: FirmwareCapability,
    input: InputHandle,
}

impl Tbtn {
    /// Creates and registers the virtual input device for a matched `TBTN`.
    ///
    /// The input device is registered last, so on any error nothing remains
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoMemory`] if no input device can be allocated,
    /// or the error from keymap installation or registration.
    pub fn new(ctx: AcpiProbeContext) -> Result<Self, DriverError> {
        let AcpiProbeContext {
            device,
            firmware,
            input,
        } = ctx;

        let mut dev = input.allocate_device().inspect_err(|e| {
            kerr!("tbtn: failed to allocate input device: {}", e);
        })?;
        dev.name = DEVICE_NAME;
        dev.phys = DEVICE_PHYS;
        dev.id.bustype = BusType::HOST;

        sparse_keymap::setup(&mut dev, &TBTN_KEYMAP).inspect_err(|e| {
            kerr!("tbtn: failed to set up keymap: {}", e);
        })?;

        let handle = input.register_device(dev).inspect_err(|e| {
            kerr!("tbtn: failed to register input device: {}", e);
        })?;

        kinfo!(
            "tbtn: {} at {} registered as input{}",
            device.hid_string().as_str(),
            device.path,
            handle.number()
        );
        Ok(Self {
            firmware,
            input: handle,
        })
    }

    /// The registered input device.
    #[must_use]
    pub fn input(&self) -> &InputHandle {
        &self.input
    }

    /// Queries `HINF` and reports the button transition it describes.
    fn handle_button(&self) {
        let raw = match self.firmware.evaluate_integer(HINF) {
            Ok(raw) => raw,
            Err(status) => {
                kerr!("tbtn: failed to evaluate HINF: {}", status);
                return;
            }
        };

        let Some(event) = decode::decode(raw) else {
            kwarn!("tbtn: unhandled HINF key_value {}", decode::key_value(raw));
            return;
        };

        if emit::report(&self.input, event) {
            kinfo!(
                "tbtn: {} {}",
                event.button,
                if event.pressed { "pressed" } else { "released" }
            );
        } else {
            kwarn!(
                "tbtn: failed to report scancode {}",
                event.button.scancode()
            );
        }
    }
}

impl AcpiBinding for Tbtn {
    fn notify(&self, event: NotifyCode) {
        if event == NOTIFY_BUTTON {
            self.handle_button();
        } else {
            kinfo!("tbtn: unknown event {}", event);
        }
    }

    fn remove(self: Box<Self>) {
        kinfo!("tbtn: removing input{}", self.input.number());
    }
}

fn add(ctx: AcpiProbeContext) -> Result<Box<dyn AcpiBinding>, DriverError> {
    Ok(Box::new(Tbtn::new(ctx)?))
}

/// Registers the driver with `bus`, binding every matching device present.
///
/// # Errors
///
/// Propagates the bus error if the driver is already registered.
pub fn init(bus: &AcpiBus) -> Result<(), DriverError> {
    match bus.register_driver(&TBTN_DRIVER) {
        Ok(bound) => {
            kinfo!(
                "tbtn: ACPI driver registered (v{}), {} device(s) bound",
                tbtn_core::config::VERSION,
                bound
            );
            Ok(())
        }
        Err(e) => {
            kerr!("tbtn: failed to register ACPI driver: {} ({})", e, e.errno());
            Err(e)
        }
    }
}

/// Unregisters the driver from `bus`, unbinding every device it owns.
pub fn exit(bus: &AcpiBus) {
    match bus.unregister_driver(&TBTN_DRIVER) {
        Ok(()) => kinfo!("tbtn: ACPI driver unregistered"),
        Err(e) => kwarn!("tbtn: ACPI driver was not registered: {}", e),
    }
}
