//! ACPI driver registration types.
//!
//! A driver publishes one static [`AcpiDriverEntry`] (see
//! [`acpi_driver_entry!`](crate::acpi_driver_entry)) and hands it to
//! [`AcpiBus::register_driver`](crate::AcpiBus::register_driver). For every
//! matching device the bus calls `add`, and keeps the returned
//! [`AcpiBinding`] until the device or the driver goes away.

use alloc::boxed::Box;

use tbtn_acpi::NotifyCode;

use crate::acpi_device::AcpiMatchId;
use crate::error::DriverError;
use crate::probe_context::AcpiProbeContext;

/// Per-device driver state kept by the bus while the device is bound.
pub trait AcpiBinding: Send + Sync {
    /// Handles a firmware notification addressed to the bound device.
    fn notify(&self, event: NotifyCode);

    /// Called when the binding is torn down. Resources owned by the binding
    /// are released when it is dropped at the end of this call.
    fn remove(self: Box<Self>) {}
}

/// A statically described ACPI driver.
pub struct AcpiDriverEntry {
    /// Driver name (for logging and duplicate detection).
    pub name: &'static str,
    /// Device class.
    pub class: &'static str,
    /// Hardware IDs this driver supports.
    pub id_table: &'static [AcpiMatchId],
    /// Binds the driver to one matched device.
    pub add: fn(AcpiProbeContext) -> Result<Box<dyn AcpiBinding>, DriverError>,
}

impl core::fmt::Debug for AcpiDriverEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AcpiDriverEntry")
            .field("name", &self.name)
            .field("class", &self.class)
            .field("id_table", &self.id_table)
            .finish_non_exhaustive()
    }
}

/// Declares a static [`AcpiDriverEntry`].
///
/// # Example
///
/// ```ignore
/// tbtn_driver_api::acpi_driver_entry!(MY_DRIVER, AcpiDriverEntry {
///     name: "my_driver",
///     class: "my",
///     id_table: &[AcpiMatchId::eisa("PNP0C0C")],
///     add: my_add,
/// });
/// ```
#[macro_export]
macro_rules! acpi_driver_entry {
    ($(#[$meta:meta])* $name:ident, $entry:expr) => {
        $(#[$meta])*
        pub static $name: $crate::registration::AcpiDriverEntry = $entry;
    };
}
