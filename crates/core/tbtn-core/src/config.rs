//! Compile-time configuration bridge.
//!
//! Maps the crate's `log-*` cargo features onto typed constants so the rest
//! of the workspace has a single source of truth. When several level
//! features are enabled (feature unification), the most verbose one wins.

use crate::log::LogLevel;

/// Default maximum log level. Messages more verbose than this are dropped
/// until [`set_max_level`](crate::log::set_max_level) raises the limit.
pub const MAX_LOG_LEVEL: LogLevel = if cfg!(feature = "log-trace") {
    LogLevel::Trace
} else if cfg!(feature = "log-debug") {
    LogLevel::Debug
} else if cfg!(feature = "log-info") {
    LogLevel::Info
} else if cfg!(feature = "log-warn") {
    LogLevel::Warn
} else if cfg!(feature = "log-error") {
    LogLevel::Error
} else {
    LogLevel::Info
};

/// Crate version, reported in the module banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_at_least_info() {
        assert!(MAX_LOG_LEVEL >= LogLevel::Info);
    }
}
