//! ACPI name segments and absolute namespace paths.
//!
//! Names are four ASCII characters (`_SB_`, `PCI0`, `HINF`). Paths chain up
//! to [`MAX_PATH_DEPTH`] segments inline, enough for real DSDT nesting.

use core::fmt;

/// Maximum number of segments in an [`AmlPath`].
pub const MAX_PATH_DEPTH: usize = 16;

/// Errors produced when parsing names and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A segment was empty or longer than four characters.
    BadSegmentLength,
    /// A segment contained a character outside `A-Z`, `0-9` and `_`, or
    /// started with a digit.
    BadCharacter,
    /// The path had more than [`MAX_PATH_DEPTH`] segments.
    TooDeep,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSegmentLength => f.write_str("name segment must be 1-4 characters"),
            Self::BadCharacter => f.write_str("invalid character in name segment"),
            Self::TooDeep => f.write_str("namespace path too deep"),
        }
    }
}

/// A four-byte ACPI name segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameSeg(pub [u8; 4]);

impl NameSeg {
    /// Creates a segment from exactly four bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Parses a segment, padding names shorter than four characters with
    /// `_` as ASL does.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if the name is empty, too long, or uses
    /// characters ACPI does not allow.
    pub fn parse(name: &str) -> Result<Self, PathError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return Err(PathError::BadSegmentLength);
        }
        if bytes[0].is_ascii_digit() {
            return Err(PathError::BadCharacter);
        }
        let mut seg = [b'_'; 4];
        for (slot, &b) in seg.iter_mut().zip(bytes) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_') {
                return Err(PathError::BadCharacter);
            }
            *slot = b;
        }
        Ok(Self(seg))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Debug for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameSeg(\"{}\")", self.as_str())
    }
}

impl fmt::Display for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed-capacity absolute namespace path (e.g. `\_SB_.TBTN`).
#[derive(Clone, Copy)]
pub struct AmlPath {
    segments: [NameSeg; MAX_PATH_DEPTH],
    len: u8,
}

impl AmlPath {
    /// The root path (`\`).
    pub const ROOT: Self = Self {
        segments: [NameSeg(*b"____"); MAX_PATH_DEPTH],
        len: 0,
    };

    /// Parses a dotted absolute path. The leading `\` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for malformed segments or paths deeper than
    /// [`MAX_PATH_DEPTH`].
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let mut out = Self::ROOT;
        let body = path.strip_prefix('\\').unwrap_or(path);
        if body.is_empty() {
            return Ok(out);
        }
        for part in body.split('.') {
            out.push(NameSeg::parse(part)?)?;
        }
        Ok(out)
    }

    /// Appends a segment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::TooDeep`] if the path is full.
    pub fn push(&mut self, seg: NameSeg) -> Result<(), PathError> {
        let len = self.len as usize;
        if len >= MAX_PATH_DEPTH {
            return Err(PathError::TooDeep);
        }
        self.segments[len] = seg;
        self.len += 1;
        Ok(())
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[NameSeg] {
        &self.segments[..self.len as usize]
    }

    /// Returns the final segment, or `None` for the root.
    #[must_use]
    pub fn leaf(&self) -> Option<NameSeg> {
        self.segments().last().copied()
    }
}

impl PartialEq for AmlPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments() == other.segments()
    }
}

impl Eq for AmlPath {}

impl fmt::Display for AmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\\")?;
        for (i, seg) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for AmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
