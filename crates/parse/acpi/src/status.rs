//! ACPICA exception codes and `_STA` device status bits.

use core::fmt;

use bitflags::bitflags;

/// A failed ACPI operation, using ACPICA exception numbering.
///
/// `AE_OK` is not represented; success is the `Ok` side of a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcpiStatus {
    /// `AE_ERROR`: unspecified failure.
    Error,
    /// `AE_NO_MEMORY`.
    NoMemory,
    /// `AE_NOT_FOUND`: the named object (e.g. a method) does not exist.
    NotFound,
    /// `AE_NOT_EXIST`.
    NotExist,
    /// `AE_ALREADY_EXISTS`.
    AlreadyExists,
    /// `AE_TYPE`: the object has the wrong type (e.g. a method returned a
    /// buffer where an integer was expected).
    Type,
    /// `AE_NULL_OBJECT`.
    NullObject,
    /// `AE_NOT_IMPLEMENTED`.
    NotImplemented,
    /// `AE_SUPPORT`.
    Support,
    /// `AE_TIME`: a wait timed out.
    Time,
    /// `AE_BAD_PARAMETER`.
    BadParameter,
    /// `AE_AML_BAD_OPCODE`: the interpreter hit invalid bytecode.
    AmlBadOpcode,
    /// Any other exception code.
    Other(u32),
}

impl AcpiStatus {
    /// Maps a raw ACPICA exception code. Returns `None` for `AE_OK` (0).
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0x0000 => return None,
            0x0001 => Self::Error,
            0x0004 => Self::NoMemory,
            0x0005 => Self::NotFound,
            0x0006 => Self::NotExist,
            0x0007 => Self::AlreadyExists,
            0x0008 => Self::Type,
            0x0009 => Self::NullObject,
            0x000E => Self::NotImplemented,
            0x000F => Self::Support,
            0x0011 => Self::Time,
            0x1001 => Self::BadParameter,
            0x3001 => Self::AmlBadOpcode,
            other => Self::Other(other),
        })
    }

    /// Returns the raw ACPICA exception code.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Error => 0x0001,
            Self::NoMemory => 0x0004,
            Self::NotFound => 0x0005,
            Self::NotExist => 0x0006,
            Self::AlreadyExists => 0x0007,
            Self::Type => 0x0008,
            Self::NullObject => 0x0009,
            Self::NotImplemented => 0x000E,
            Self::Support => 0x000F,
            Self::Time => 0x0011,
            Self::BadParameter => 0x1001,
            Self::AmlBadOpcode => 0x3001,
            Self::Other(code) => code,
        }
    }

    /// Returns the ACPICA exception name, as `acpi_format_exception` would.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "AE_ERROR",
            Self::NoMemory => "AE_NO_MEMORY",
            Self::NotFound => "AE_NOT_FOUND",
            Self::NotExist => "AE_NOT_EXIST",
            Self::AlreadyExists => "AE_ALREADY_EXISTS",
            Self::Type => "AE_TYPE",
            Self::NullObject => "AE_NULL_OBJECT",
            Self::NotImplemented => "AE_NOT_IMPLEMENTED",
            Self::Support => "AE_SUPPORT",
            Self::Time => "AE_TIME",
            Self::BadParameter => "AE_BAD_PARAMETER",
            Self::AmlBadOpcode => "AE_AML_BAD_OPCODE",
            Self::Other(_) => "AE_UNKNOWN_STATUS",
        }
    }
}

impl fmt::Display for AcpiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{} ({code:#06x})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

bitflags! {
    /// Device status returned by `_STA`.
    ///
    /// Devices without a `_STA` method are treated as [`DeviceStatus::DEFAULT`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceStatus: u32 {
        /// The device is present.
        const PRESENT     = 1 << 0;
        /// The device is enabled and decoding its resources.
        const ENABLED     = 1 << 1;
        /// The device should be shown in the UI.
        const SHOWN       = 1 << 2;
        /// The device is functioning properly.
        const FUNCTIONING = 1 << 3;
        /// A battery is present.
        const BATTERY     = 1 << 4;
    }
}

impl DeviceStatus {
    /// Status implied when `_STA` is absent (`0x0F`).
    pub const DEFAULT: Self = Self::PRESENT
        .union(Self::ENABLED)
        .union(Self::SHOWN)
        .union(Self::FUNCTIONING);
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_not_an_error() {
        assert_eq!(AcpiStatus::from_code(0), None);
    }

    #[test]
    fn codes_map_both_ways() {
        assert_eq!(AcpiStatus::from_code(0x0005), Some(AcpiStatus::NotFound));
        assert_eq!(AcpiStatus::NotFound.code(), 0x0005);
        assert_eq!(AcpiStatus::from_code(0x4242), Some(AcpiStatus::Other(0x4242)));
    }

    #[test]
    fn display_uses_exception_names() {
        assert_eq!(format!("{}", AcpiStatus::NotFound), "AE_NOT_FOUND");
        assert_eq!(
            format!("{}", AcpiStatus::Other(0x4242)),
            "AE_UNKNOWN_STATUS (0x4242)"
        );
    }

    #[test]
    fn missing_sta_means_present() {
        assert_eq!(DeviceStatus::default().bits(), 0x0F);
        assert!(DeviceStatus::default().contains(DeviceStatus::PRESENT));
    }
}
