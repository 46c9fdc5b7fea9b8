//! Driver error types.

use core::fmt;

use tbtn_acpi::AcpiStatus;

/// Errors returned by driver callbacks and host subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// An allocation failed or a fixed-size table is full.
    NoMemory,
    /// A caller supplied an invalid argument (bad keymap, unnamed device).
    InvalidArgument,
    /// The resource is already registered or bound.
    Busy,
    /// No such device.
    NoDevice,
    /// A lookup by name or handle found nothing.
    NotFound,
    /// A firmware call failed.
    Firmware(AcpiStatus),
}

impl DriverError {
    /// Returns the negative errno handed back across the host callback ABI.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::NoMemory => -12,
            Self::InvalidArgument => -22,
            Self::Busy => -16,
            Self::NoDevice => -19,
            Self::NotFound => -2,
            Self::Firmware(_) => -5,
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMemory => f.write_str("out of memory"),
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::Busy => f.write_str("resource busy"),
            Self::NoDevice => f.write_str("no such device"),
            Self::NotFound => f.write_str("not found"),
            Self::Firmware(status) => write!(f, "firmware error: {status}"),
        }
    }
}

impl From<AcpiStatus> for DriverError {
    fn from(status: AcpiStatus) -> Self {
        Self::Firmware(status)
    }
}
