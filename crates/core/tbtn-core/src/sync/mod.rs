//! Synchronization primitives usable from `static` items and before any
//! scheduler exists.

mod spinlock;

pub use spinlock::{SpinLock, SpinLockGuard};
