//! Driver module metadata.

use core::fmt;

/// Descriptive metadata a driver module publishes alongside its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module name.
    pub name: &'static str,
    /// Author.
    pub author: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// License identifier.
    pub license: &'static str,
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (author: {}, license: {})",
            self.name, self.description, self.author, self.license
        )
    }
}
