//! Compressed EISA/PnP hardware identifiers.

use core::fmt;

/// A compressed EISA/PnP device identifier.
///
/// The seven-character form (three uppercase letters plus four hex digits,
/// e.g. `MAT002A`) is packed into 32 bits: the manufacturer code in the upper
/// 16 bits and the product ID in the lower 16, then byte-swapped into the
/// order AML stores it. `MAT002A` therefore has the raw value `0x2A00_3434`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EisaId {
    /// The raw 32-bit value as found in AML.
    pub raw: u32,
}

impl EisaId {
    /// Wraps a raw AML-order value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    /// Compresses a seven-character EISA ID string at const time.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const) if `id` is not exactly
    /// seven characters or contains an invalid manufacturer letter or hex
    /// digit.
    #[must_use]
    pub const fn encode(id: &str) -> Self {
        let bytes = id.as_bytes();
        assert!(bytes.len() == 7, "EISA ID must be exactly 7 characters");

        let manufacturer = (letter(bytes[0]) << 10) | (letter(bytes[1]) << 5) | letter(bytes[2]);
        let product = (hex_digit(bytes[3]) << 12)
            | (hex_digit(bytes[4]) << 8)
            | (hex_digit(bytes[5]) << 4)
            | hex_digit(bytes[6]);

        let native = ((manufacturer as u32) << 16) | product as u32;
        Self {
            raw: native.swap_bytes(),
        }
    }

    /// Expands the ID back into its seven ASCII characters.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn decode(&self) -> [u8; 7] {
        let native = self.raw.swap_bytes();
        let product = native as u16;
        let nibble = |shift: u16| -> u8 {
            let n = ((product >> shift) & 0xF) as u8;
            if n < 10 { b'0' + n } else { b'A' + n - 10 }
        };

        [
            (((native >> 26) & 0x1F) as u8) + b'@',
            (((native >> 21) & 0x1F) as u8) + b'@',
            (((native >> 16) & 0x1F) as u8) + b'@',
            nibble(12),
            nibble(8),
            nibble(4),
            nibble(0),
        ]
    }
}

impl fmt::Display for EisaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars = self.decode();
        f.write_str(core::str::from_utf8(&chars).unwrap_or("???????"))
    }
}

const fn letter(b: u8) -> u16 {
    assert!(b.is_ascii_uppercase(), "EISA manufacturer code must be A-Z");
    (b - b'@') as u16
}

const fn hex_digit(b: u8) -> u16 {
    match b {
        b'0'..=b'9' => (b - b'0') as u16,
        b'A'..=b'F' => (b - b'A' + 10) as u16,
        b'a'..=b'f' => (b - b'a' + 10) as u16,
        _ => panic!("invalid hex digit in EISA ID"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panasonic_button_ids() {
        assert_eq!(EisaId::encode("MAT002A").raw, 0x2A00_3434);
        assert_eq!(EisaId::encode("MAT002B").raw, 0x2B00_3434);
    }

    #[test]
    fn pnp_id_decodes() {
        let id = EisaId::encode("PNP0C0D");
        assert_eq!(&id.decode(), b"PNP0C0D");
        assert_eq!(format!("{id}"), "PNP0C0D");
    }

    #[test]
    fn lowercase_hex_digits_normalize() {
        assert_eq!(EisaId::encode("MAT002a"), EisaId::encode("MAT002A"));
    }
}
