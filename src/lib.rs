//! TSM30 RF Board Support
//!
//! Board-specific RF support for the Vitelcom TSM30 handset (Calypso baseband,
//! LMX2326 synthesizer). The crate resolves which hardware revision it is
//! running on, picks the matching calibration tables, patches RF timing
//! globals for known hardware/RF-section combinations, and programs the
//! synthesizer over the TSP serial strobe lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       BOARD LAYER                            │
//! │  Identity Resolver → Config Selector → Patches  │  Tables    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DRIVER LAYER                            │
//! │  LMX2326 register protocol  │  RF front end (TSPACT bits)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  HAL / COLLABORATORS                         │
//! │  TSP control lines  │  Parameter store (TIFFS)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Explicit state**: the hardware identity cache is an owned object, not a static
//! - **Type-driven design**: revisions, bands and config indices are enums
//! - **Degrade, don't fail**: store errors fall back to documented defaults
//! - **Functional core, imperative shell**: table lookups and divider math are pure

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

/// Hardware Abstraction Layer
///
/// Serial control-line (TSP) bus abstraction and adapters.
pub mod hal;

/// Peripheral Drivers
///
/// Register-level drivers for external RF ICs (LMX2326).
pub mod drivers;

/// Board Support
///
/// Hardware identity, configuration selection, patches, calibration tables
/// and the RF front end.
pub mod board;

/// Persistent parameter store access
pub mod store;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// Board configuration and constants
pub mod config;

pub use board::initialize;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::board::hw_version::{IdentityResolver, SharedIdentity};
    pub use crate::board::patches::{
        apply_hardware_patches, RfGlobals, RfTimingGlobals, TimingParam,
    };
    pub use crate::board::rf_tables;
    pub use crate::board::rffe::RfFrontEnd;
    pub use crate::drivers::lmx2326::Lmx2326;
    pub use crate::error::{GainError, StoreError, StoreResult};
    #[cfg(feature = "spi")]
    pub use crate::hal::spi::SpiControlBus;
    pub use crate::hal::tsp::{ActivationLatch, ControlBus, TspLine};
    pub use crate::store::{ParameterStore, RamStore};
    pub use crate::types::*;
}
