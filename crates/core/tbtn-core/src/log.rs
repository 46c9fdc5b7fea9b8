//! Leveled logging for the driver crates.
//!
//! Provides [`klog!`] and the shorthand macros (`kerr!`, `kwarn!`, `kinfo!`,
//! `kdebug!`, `ktrace!`). Output goes to a single global sink registered with
//! [`set_log_fn`]; before that, messages are silently discarded. Messages
//! more verbose than [`max_level`] are filtered before reaching the sink.

use core::fmt;
use core::sync::atomic::{AtomicPtr, AtomicU8, Ordering};

use crate::config;

// ---------------------------------------------------------------------------
// Log levels (lower = more severe)
// ---------------------------------------------------------------------------

/// Log severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    /// Something failed; the driver keeps running.
    Error = 1,
    /// Unexpected condition, not necessarily an error.
    Warn = 2,
    /// High-level progress messages.
    Info = 3,
    /// Detailed diagnostics.
    Debug = 4,
    /// Very verbose tracing.
    Trace = 5,
}

impl LogLevel {
    /// Returns the human-readable name (fixed-width for aligned output).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN ",
            Self::Info => "INFO ",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 | 1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            4 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().trim_end())
    }
}

// ---------------------------------------------------------------------------
// Level filter
// ---------------------------------------------------------------------------

static MAX_LEVEL: AtomicU8 = AtomicU8::new(config::MAX_LOG_LEVEL as u8);

/// Returns the current maximum level that reaches the sink.
#[must_use]
pub fn max_level() -> LogLevel {
    LogLevel::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
}

/// Sets the maximum level that reaches the sink.
pub fn set_max_level(level: LogLevel) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Returns `true` if a message at `level` would currently be delivered.
#[inline]
#[must_use]
pub fn enabled(level: LogLevel) -> bool {
    level <= max_level()
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// The signature of the global log sink.
pub type LogFn = fn(LogLevel, fmt::Arguments<'_>);

fn null_log(_level: LogLevel, _args: fmt::Arguments<'_>) {}

static LOG_FN: AtomicPtr<()> = AtomicPtr::new(null_log as *mut ());

/// Registers the global log sink.
///
/// # Safety
///
/// The provided function must be safe to call from any context in which the
/// driver runs, including notification delivery. May be called more than
/// once; later calls replace the sink.
pub unsafe fn set_log_fn(f: LogFn) {
    LOG_FN.store(f as *mut (), Ordering::Release);
}

#[inline]
fn load_log_fn() -> LogFn {
    let ptr = LOG_FN.load(Ordering::Acquire);
    // SAFETY: only valid `LogFn` pointers (or `null_log`) are stored into LOG_FN.
    unsafe { core::mem::transmute::<*mut (), LogFn>(ptr) }
}

/// Implementation detail for [`klog!`]. Not public API.
#[doc(hidden)]
pub fn _log(level: LogLevel, args: fmt::Arguments<'_>) {
    if enabled(level) {
        load_log_fn()(level, args);
    }
}

/// Logs a message at the given level.
#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {
        $crate::log::_log($level, format_args!($($arg)*))
    };
}

/// Logs an error-level message.
#[macro_export]
macro_rules! kerr {
    ($($arg:tt)*) => { $crate::klog!($crate::log::LogLevel::Error, $($arg)*) };
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => { $crate::klog!($crate::log::LogLevel::Warn, $($arg)*) };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => { $crate::klog!($crate::log::LogLevel::Info, $($arg)*) };
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => { $crate::klog!($crate::log::LogLevel::Debug, $($arg)*) };
}

/// Logs a trace-level message.
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => { $crate::klog!($crate::log::LogLevel::Trace, $($arg)*) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn names_are_fixed_width() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert_eq!(level.name().len(), 5);
        }
        assert_eq!(format!("{}", LogLevel::Warn), "WARN");
    }

    #[test]
    fn from_u8_saturates() {
        assert_eq!(LogLevel::from_u8(0), LogLevel::Error);
        assert_eq!(LogLevel::from_u8(3), LogLevel::Info);
        assert_eq!(LogLevel::from_u8(200), LogLevel::Trace);
    }

    std::thread_local! {
        static CAPTURED: std::cell::RefCell<Vec<(LogLevel, String)>> =
            const { std::cell::RefCell::new(Vec::new()) };
    }

    fn capture(level: LogLevel, args: fmt::Arguments<'_>) {
        CAPTURED.with(|c| c.borrow_mut().push((level, args.to_string())));
    }

    #[test]
    fn max_level_filters_before_the_sink() {
        // SAFETY: `capture` only touches thread-local state.
        unsafe { set_log_fn(capture) };
        let saved = max_level();

        set_max_level(LogLevel::Warn);
        assert_eq!(max_level(), LogLevel::Warn);
        assert!(enabled(LogLevel::Error));
        assert!(!enabled(LogLevel::Info));

        crate::kinfo!("dropped {}", 1);
        crate::kwarn!("kept {}", 2);
        crate::kerr!("kept {}", 3);
        crate::ktrace!("dropped {}", 4);

        set_max_level(LogLevel::Trace);
        crate::ktrace!("kept {}", 5);
        set_max_level(saved);

        let captured = CAPTURED.with(|c| c.borrow_mut().drain(..).collect::<Vec<_>>());
        assert_eq!(
            captured,
            vec![
                (LogLevel::Warn, "kept 2".to_string()),
                (LogLevel::Error, "kept 3".to_string()),
                (LogLevel::Trace, "kept 5".to_string()),
            ]
        );
    }
}
