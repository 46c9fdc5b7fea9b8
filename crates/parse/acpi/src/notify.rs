//! ACPI `Notify()` values.

use core::fmt;

/// A notification value delivered by firmware through `Notify(device, value)`.
///
/// Values below `0x80` have meanings defined by the ACPI specification;
/// `0x80` and above are device-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotifyCode(pub u32);

impl NotifyCode {
    /// Re-check the device itself.
    pub const DEVICE_CHECK: Self = Self(0x01);
    /// First device-specific value.
    pub const DEVICE_SPECIFIC: Self = Self(0x80);

    /// Returns `true` for values whose meaning is defined by the device
    /// rather than by ACPI.
    #[must_use]
    pub const fn is_device_specific(self) -> bool {
        self.0 >= Self::DEVICE_SPECIFIC.0
    }
}

impl fmt::Display for NotifyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
