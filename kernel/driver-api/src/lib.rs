//! Host driver model for ACPI-enumerated input drivers.
//!
//! - **Layer 0** -- firmware access ([`AcpiFirmware`], [`FirmwareCapability`])
//!   and device identity ([`AcpiDeviceInfo`], [`AcpiMatchId`]).
//! - **Layer 1** -- driver registration ([`AcpiDriverEntry`]) and the bound
//!   driver data ([`AcpiBinding`]).
//! - **Layer 2** -- the [`AcpiBus`] that matches devices to drivers and routes
//!   notifications, and the [`InputCore`] that owns virtual input devices.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod acpi_device;
pub mod bus;
pub mod error;
pub mod firmware;
pub mod input;
pub mod module;
pub mod probe_context;
pub mod registration;

pub use acpi_device::{AcpiDeviceInfo, AcpiHandle, AcpiMatchId};
pub use bus::AcpiBus;
pub use error::DriverError;
pub use firmware::{AcpiFirmware, FirmwareCapability};
pub use input::{InputCore, InputDevice, InputEvent, InputHandle, InputHandler};
pub use module::ModuleInfo;
pub use probe_context::AcpiProbeContext;
pub use registration::{AcpiBinding, AcpiDriverEntry};
