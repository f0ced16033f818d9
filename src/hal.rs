//! Hardware Abstraction Layer
//!
//! Abstractions over the Calypso peripherals the RF section talks to.
//! Only the TSP control lines are modeled; everything else belongs to the
//! board bring-up code.

pub mod tsp;

#[cfg(feature = "spi")]
pub mod spi;
