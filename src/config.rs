//! Board configuration and hardware constants
//!
//! Compile-time constants for the TSM30 board. Store paths, parameter block
//! layout, TSP line assignments and RF timing are centralized here.

/// Path of the O&M parameter block in the flash file system
pub const OM_PARAMS_PATH: &str = "/gsm/om/params";

/// Path of the RF section header in the flash file system
pub const RF_SECTION_PATH: &str = "/gsm/rf/section";

/// Size of the O&M parameter block in bytes
pub const OM_PARAMS_SIZE: usize = 256;

/// Offset of the official hardware revision (field 33)
pub const HW_VERSION_OFFSET: usize = 33;

/// Offset of the internal hardware version (field 44)
pub const INTERNAL_VERSION_OFFSET: usize = 44;

/// Size of the RF section header: version (1) + checksum (2) + reserved (13)
pub const RF_SECTION_HEADER_SIZE: usize = 16;

/// RF section version that triggers the APC timing patch
pub const APC_PATCH_RF_VERSION: u8 = 10;

/// Default LMX2326 gain
pub const DEFAULT_GAIN: u8 = 40;

/// Highest gain accepted by the LMX2326 gain register
pub const MAX_GAIN: u8 = 127;

/// Number of power levels per band in the APC tables
pub const TX_LEVELS: usize = 16;

/// Number of entries in the full TX level calibration table
pub const TX_LEVELS_TABLE_SIZE: usize = 32;

/// Number of entries in a ramp profile set
pub const RAMP_PROFILES: usize = 16;

/// Number of entries in a PA timing table
pub const PA_TIMING_ENTRIES: usize = 16;

/// Initial AFC DAC value (0xFD00)
pub const AFC_INITIAL: i16 = -768;

/// AFC slope
pub const AFC_SLOPE: i16 = 0xA0;

/// TSP line assignments
pub mod tsp {
    //! TSPACT line numbers used by the RF section

    /// LMX2326 serial strobe (TSPACT8)
    pub const LMX2326_STROBE: u8 = 8;

    /// LMX2326 hard reset (TSPACT9)
    pub const LMX2326_RESET: u8 = 9;
}

/// RF front-end timings in quarter bits
pub mod timing {
    //! RF front-end timing parameters (quarter bits)

    /// LDO power-up lead time
    pub const LDO_ON: u16 = 0x1e0;

    /// VCO power-up lead time
    pub const VCO_ON: u16 = 0x1d0;

    /// Synthesizer power-up lead time
    pub const SYNTH_ON: u16 = 0x1c2;

    /// PA enable lead time on the low band
    pub const PA_ON_GSM: u16 = 0x22;

    /// PA enable lead time on the high band
    pub const PA_ON_DCS: u16 = 0x2d;

    /// PA disable delay
    pub const PA_OFF: u16 = 0x1e;

    /// TX path enable lead time
    pub const TX_PATH_ON: u16 = 0xa0;

    /// RX path enable lead time
    pub const RX_PATH_ON: u16 = 0xa0;

    /// RF round-trip delay
    pub const RF_ROUNDTRIP: u16 = 0x45;
}
