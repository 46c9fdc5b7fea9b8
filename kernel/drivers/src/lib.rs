//! ACPI drivers built on the TBTN host driver model.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod tbtn;
