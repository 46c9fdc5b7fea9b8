//! Firmware method evaluation.
//!
//! The host ACPI interpreter is reached through the [`AcpiFirmware`] trait.
//! Drivers never see the trait object directly: the bus hands each bound
//! device a [`FirmwareCapability`] scoped to that device's handle.

use alloc::sync::Arc;

use tbtn_acpi::{AcpiStatus, NameSeg};

use crate::acpi_device::AcpiHandle;

/// Interface to the host's ACPI interpreter.
///
/// Evaluation runs while the bus delivers a notification. An implementation
/// may raise further notifications through [`AcpiBus::notify`](crate::AcpiBus::notify),
/// which queues them, but must not call any other bus method.
pub trait AcpiFirmware: Send + Sync {
    /// Evaluates the zero-argument control method `method` below `handle`
    /// and returns its integer result.
    ///
    /// # Errors
    ///
    /// Returns the interpreter's [`AcpiStatus`] if the method does not exist,
    /// fails, or returns a non-integer.
    fn evaluate_integer(&self, handle: AcpiHandle, method: NameSeg) -> Result<u64, AcpiStatus>;
}

/// Firmware access limited to a single device.
#[derive(Clone)]
pub struct FirmwareCapability {
    handle: AcpiHandle,
    firmware: Arc<dyn AcpiFirmware>,
}

impl FirmwareCapability {
    /// Scopes `firmware` to `handle`.
    #[must_use]
    pub fn new(handle: AcpiHandle, firmware: Arc<dyn AcpiFirmware>) -> Self {
        Self { handle, firmware }
    }

    /// The device handle this capability is scoped to.
    #[must_use]
    pub fn handle(&self) -> AcpiHandle {
        self.handle
    }

    /// Evaluates `method` on the scoped device.
    ///
    /// # Errors
    ///
    /// Propagates the interpreter's [`AcpiStatus`].
    pub fn evaluate_integer(&self, method: NameSeg) -> Result<u64, AcpiStatus> {
        self.firmware.evaluate_integer(self.handle, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant;

    impl AcpiFirmware for Constant {
        fn evaluate_integer(&self, handle: AcpiHandle, method: NameSeg) -> Result<u64, AcpiStatus> {
            match (handle, &method.0) {
                (AcpiHandle(7), b"HINF") => Ok(0x39),
                (AcpiHandle(7), _) => Err(AcpiStatus::NotFound),
                _ => Err(AcpiStatus::BadParameter),
            }
        }
    }

    #[test]
    fn capability_uses_its_own_handle() {
        let cap = FirmwareCapability::new(AcpiHandle(7), Arc::new(Constant));
        assert_eq!(cap.handle(), AcpiHandle(7));
        assert_eq!(cap.evaluate_integer(NameSeg(*b"HINF")), Ok(0x39));
        assert_eq!(
            cap.evaluate_integer(NameSeg(*b"_STA")),
            Err(AcpiStatus::NotFound)
        );
    }
}
