//! ACPI device information and match tables.
//!
//! Devices enumerated from the namespace are described by
//! [`AcpiDeviceInfo`]. Drivers declare the hardware IDs they support through
//! a static [`AcpiMatchId`] table, and the bus compares those against each
//! device's `_HID`, falling back to `_CID`.

use core::fmt;

use tbtn_acpi::{AmlPath, AmlValue, DeviceStatus, EisaId, InlineString};

/// Opaque firmware handle for a namespace object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AcpiHandle(pub u64);

impl fmt::Display for AcpiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle:{:#x}", self.0)
    }
}

/// Identifies an ACPI device by hardware ID for driver matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcpiDeviceId {
    /// Compressed EISA/PnP ID (e.g. `MAT002A`).
    Eisa(EisaId),
    /// String ID (e.g. `ACPI0011`).
    String(&'static str),
}

/// Match table entry for ACPI driver binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcpiMatchId {
    /// The device ID to match against.
    pub id: AcpiDeviceId,
}

impl AcpiMatchId {
    /// Creates a match entry from a seven-character EISA ID, compressed at
    /// const time.
    #[must_use]
    pub const fn eisa(id: &'static str) -> Self {
        Self {
            id: AcpiDeviceId::Eisa(EisaId::encode(id)),
        }
    }

    /// Creates a match entry from a string ID.
    #[must_use]
    pub const fn string(id: &'static str) -> Self {
        Self {
            id: AcpiDeviceId::String(id),
        }
    }

    /// Checks whether this entry matches a `_HID` or `_CID` value.
    ///
    /// EISA entries also match string IDs spelling the same seven characters,
    /// since firmware may publish either form.
    #[must_use]
    pub fn matches_hid(&self, hid: &AmlValue) -> bool {
        match (&self.id, hid) {
            (AcpiDeviceId::Eisa(want), AmlValue::String(s)) => {
                s.as_str().as_bytes() == want.decode().as_slice()
            }
            (AcpiDeviceId::Eisa(want), value) => value.as_eisa_id() == Some(*want),
            (AcpiDeviceId::String(want), AmlValue::String(s)) => *want == s.as_str(),
            (AcpiDeviceId::String(_), _) => false,
        }
    }
}

impl fmt::Display for AcpiMatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            AcpiDeviceId::Eisa(id) => write!(f, "{id}"),
            AcpiDeviceId::String(s) => f.write_str(s),
        }
    }
}

/// Information about an ACPI-enumerated device.
#[derive(Debug, Clone, Copy)]
pub struct AcpiDeviceInfo {
    /// Firmware handle used for method evaluation and notifications.
    pub handle: AcpiHandle,
    /// Full namespace path (e.g. `\_SB_.TBTN`).
    pub path: AmlPath,
    /// Primary hardware ID (`_HID`).
    pub hid: AmlValue,
    /// Compatible ID (`_CID`), for fallback matching.
    pub cid: Option<AmlValue>,
    /// Unique ID (`_UID`), for multi-instance devices.
    pub uid: Option<u64>,
    /// Result of `_STA`.
    pub status: DeviceStatus,
}

impl AcpiDeviceInfo {
    /// Returns `true` if any entry of `table` matches `_HID` or `_CID`.
    #[must_use]
    pub fn matches(&self, table: &[AcpiMatchId]) -> bool {
        table.iter().any(|id| {
            id.matches_hid(&self.hid) || self.cid.as_ref().is_some_and(|cid| id.matches_hid(cid))
        })
    }

    /// `_HID` as text (`MAT002A`), whichever form the firmware published.
    #[must_use]
    pub fn hid_string(&self) -> InlineString {
        if let AmlValue::String(s) = self.hid {
            return s;
        }
        let text = self.hid.as_eisa_id().map(|id| id.decode());
        InlineString::new(
            text.as_ref()
                .and_then(|t| core::str::from_utf8(t).ok())
                .unwrap_or(""),
        )
    }

    /// Returns `true` if `_STA` reports the device present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.status.contains(DeviceStatus::PRESENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(hid: AmlValue, cid: Option<AmlValue>) -> AcpiDeviceInfo {
        AcpiDeviceInfo {
            handle: AcpiHandle(1),
            path: AmlPath::parse("\\_SB_.TBTN").unwrap(),
            hid,
            cid,
            uid: None,
            status: DeviceStatus::default(),
        }
    }

    #[test]
    fn eisa_entry_matches_integer_hid() {
        let id = AcpiMatchId::eisa("MAT002A");
        assert!(id.matches_hid(&AmlValue::Integer(0x2A00_3434)));
        assert!(id.matches_hid(&AmlValue::EisaId(EisaId::from_raw(0x2A00_3434))));
        assert!(!id.matches_hid(&AmlValue::Integer(0x2B00_3434)));
    }

    #[test]
    fn eisa_entry_matches_string_hid() {
        let id = AcpiMatchId::eisa("MAT002B");
        assert!(id.matches_hid(&AmlValue::String(InlineString::new("MAT002B"))));
        assert!(!id.matches_hid(&AmlValue::String(InlineString::new("MAT002A"))));
    }

    #[test]
    fn string_entry_ignores_integers() {
        let id = AcpiMatchId::string("ACPI0011");
        assert!(id.matches_hid(&AmlValue::String(InlineString::new("ACPI0011"))));
        assert!(!id.matches_hid(&AmlValue::Integer(0x2A00_3434)));
    }

    #[test]
    fn cid_is_a_fallback() {
        let table = [AcpiMatchId::eisa("MAT002A")];
        let dev = device(
            AmlValue::String(InlineString::new("VEND0001")),
            Some(AmlValue::Integer(0x2A00_3434)),
        );
        assert!(dev.matches(&table));
        assert!(!device(AmlValue::Integer(0), None).matches(&table));
    }

    #[test]
    fn hid_string_normalizes_forms() {
        assert_eq!(
            device(AmlValue::Integer(0x2B00_3434), None).hid_string().as_str(),
            "MAT002B"
        );
        assert_eq!(
            device(AmlValue::String(InlineString::new("MAT002A")), None)
                .hid_string()
                .as_str(),
            "MAT002A"
        );
    }

    #[test]
    fn absent_device_is_not_present() {
        let mut dev = device(AmlValue::Integer(0x2A00_3434), None);
        assert!(dev.is_present());
        dev.status = DeviceStatus::empty();
        assert!(!dev.is_present());
    }
}
