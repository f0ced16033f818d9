//! Peripheral Drivers
//!
//! Register-level drivers for external RF ICs.
//! These provide chip-specific programming on top of the HAL layer.

pub mod lmx2326;
