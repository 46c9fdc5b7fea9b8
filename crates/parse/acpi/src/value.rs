//! Resolved AML data values used for device identification.

use core::fmt;

use crate::id::EisaId;

/// Maximum length of an [`InlineString`].
const INLINE_STRING_CAP: usize = 16;

/// A short string stored inline, enough for `_HID` strings like `ACPI0004`.
#[derive(Clone, Copy)]
pub struct InlineString {
    buf: [u8; INLINE_STRING_CAP],
    len: u8,
}

impl InlineString {
    /// Creates an inline string, truncating to 16 bytes.
    #[must_use]
    pub fn new(s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut len = bytes.len().min(INLINE_STRING_CAP);
        // Never split a UTF-8 sequence.
        while !s.is_char_boundary(len) {
            len -= 1;
        }
        let mut buf = [0u8; INLINE_STRING_CAP];
        buf[..len].copy_from_slice(&bytes[..len]);
        Self {
            buf,
            len: u8::try_from(len).unwrap_or(u8::MAX),
        }
    }

    /// Returns the contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..usize::from(self.len)]).unwrap_or("")
    }
}

impl PartialEq for InlineString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for InlineString {}

impl fmt::Debug for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_str())
    }
}

/// A resolved `_HID`, `_CID` or `_UID` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmlValue {
    /// An integer. For `_HID`/`_CID` this is a compressed EISA ID.
    Integer(u64),
    /// An `EisaId()` value.
    EisaId(EisaId),
    /// A string ID such as `"ACPI0004"`.
    String(InlineString),
}

impl AmlValue {
    /// Interprets the value as an EISA ID if it can be one.
    ///
    /// Integer `_HID` values are compressed EISA IDs. Strings are never
    /// converted; callers compare them textually against
    /// [`EisaId::decode`].
    #[must_use]
    pub fn as_eisa_id(&self) -> Option<EisaId> {
        match self {
            Self::EisaId(id) => Some(*id),
            Self::Integer(v) => u32::try_from(*v).ok().map(EisaId::from_raw),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for AmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => match u32::try_from(*v) {
                Ok(raw) => write!(f, "{}", EisaId::from_raw(raw)),
                Err(_) => write!(f, "{v:#x}"),
            },
            Self::EisaId(id) => write!(f, "{id}"),
            Self::String(s) => f.write_str(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_string_truncates() {
        let s = InlineString::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(s.as_str(), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn integer_hid_displays_as_eisa() {
        let hid = AmlValue::Integer(0x2A00_3434);
        assert_eq!(format!("{hid}"), "MAT002A");
        assert_eq!(hid.as_eisa_id(), Some(EisaId::encode("MAT002A")));
    }

    #[test]
    fn string_hid_is_not_eisa() {
        let hid = AmlValue::String(InlineString::new("ACPI0004"));
        assert_eq!(hid.as_eisa_id(), None);
        assert_eq!(format!("{hid}"), "ACPI0004");
    }
}
