//! Probe context for ACPI driver initialization.
//!
//! The bus builds an [`AcpiProbeContext`] for every matched device and passes
//! it by value to the driver's `add` function. The context carries exactly
//! what a driver may touch: the device description, firmware access scoped to
//! that device, and the input core.

use alloc::sync::Arc;

use crate::acpi_device::AcpiDeviceInfo;
use crate::firmware::FirmwareCapability;
use crate::input::InputCore;

/// Capabilities handed to an ACPI driver when it is bound to a device.
pub struct AcpiProbeContext {
    /// The matched device.
    pub device: AcpiDeviceInfo,
    /// Firmware method evaluation, scoped to `device.handle`.
    pub firmware: FirmwareCapability,
    /// The input subsystem.
    pub input: Arc<InputCore>,
}
