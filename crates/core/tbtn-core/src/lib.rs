//! Core library shared by the TBTN driver crates: leveled logging, the
//! compile-time configuration bridge, and a spin lock for host tables.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod log;
pub mod sync;

pub use log::LogLevel;
