//! `tbtn-acpi` --- ACPI value types shared between the host driver model and
//! the TBTN driver.
//!
//! Covers the small slice of ACPI a notification-driven device driver needs:
//! compressed EISA hardware IDs ([`EisaId`]), namespace names and paths
//! ([`NameSeg`], [`AmlPath`]), resolved `_HID`/`_CID` values ([`AmlValue`]),
//! `_STA` status bits ([`DeviceStatus`]), notification codes ([`NotifyCode`])
//! and ACPICA exception codes ([`AcpiStatus`]).

#![cfg_attr(not(test), no_std)]

pub mod id;
pub mod notify;
pub mod path;
pub mod status;
pub mod value;

pub use id::EisaId;
pub use notify::NotifyCode;
pub use path::{AmlPath, NameSeg, PathError};
pub use status::{AcpiStatus, DeviceStatus};
pub use value::{AmlValue, InlineString};
