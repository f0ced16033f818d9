//! RF Calibration Tables
//!
//! Static calibration data for the TSM30 RF section: APC DAC power levels,
//! TX ramp profiles, PA on/off timing and AFC constants.
//!
//! All accessors are total. Unsupported bands get zero-filled power tables;
//! timing lookups for anything that is not EGSM900, DCS1800 or PCS1900 use
//! the EGSM900 tables. Ramp profiles depend only on the configuration index.

use crate::config::{
    AFC_INITIAL, AFC_SLOPE, PA_TIMING_ENTRIES, RAMP_PROFILES, TX_LEVELS, TX_LEVELS_TABLE_SIZE,
};
use crate::types::{Band, ConfigIndex};

// =============================================================================
// TX power levels
// =============================================================================

const LEVELS_LOW_BAND: [i16; TX_LEVELS] = [
    0x320, 0x290, 0x240, 0x1e0, 0x180, 0x130, 0x0f0, 0x0c0, //
    0x097, 0x077, 0x05c, 0x048, 0x039, 0x02c, 0x020, 0x000,
];

const LEVELS_HIGH_BAND: [i16; TX_LEVELS] = [
    0x330, 0x2b0, 0x240, 0x1d0, 0x170, 0x118, 0x0d9, 0x0a5, //
    0x080, 0x062, 0x04e, 0x03d, 0x02e, 0x023, 0x013, 0x00c,
];

/// APC DAC values per power level, EGSM900
pub static TX_LEVELS_900: [i16; TX_LEVELS] = LEVELS_LOW_BAND;

/// APC DAC values per power level, DCS1800
pub static TX_LEVELS_1800: [i16; TX_LEVELS] = LEVELS_HIGH_BAND;

/// APC DAC values per power level, PCS1900 (same PA as DCS1800)
pub static TX_LEVELS_1900: [i16; TX_LEVELS] = LEVELS_HIGH_BAND;

/// Zero-filled power levels for bands the RF section cannot transmit on
pub static TX_LEVELS_UNSUPPORTED: [i16; TX_LEVELS] = [0; TX_LEVELS];

/// APC DAC values for a band
#[must_use]
pub fn tx_levels(band: Band) -> &'static [i16; TX_LEVELS] {
    match band {
        Band::Egsm900 => &TX_LEVELS_900,
        Band::Dcs1800 => &TX_LEVELS_1800,
        Band::Pcs1900 => &TX_LEVELS_1900,
        Band::Gsm850 => &TX_LEVELS_UNSUPPORTED,
        _ => &TX_LEVELS_900,
    }
}

/// One entry of the full TX level calibration table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TxLevel {
    /// APC DAC value
    pub apc: i16,
    /// Index into the ramp table
    pub ramp_index: u8,
    /// Index into the channel calibration table
    pub chan_cal_index: u8,
}

/// Expand 16 power levels into the 32-entry layer 1 table
///
/// Levels past the last calibrated one repeat its APC value.
const fn expand_levels(levels: &[i16; TX_LEVELS]) -> [TxLevel; TX_LEVELS_TABLE_SIZE] {
    let mut table = [TxLevel {
        apc: 0,
        ramp_index: 0,
        chan_cal_index: 0,
    }; TX_LEVELS_TABLE_SIZE];
    let mut i = 0;
    while i < TX_LEVELS_TABLE_SIZE {
        let src = if i < TX_LEVELS { i } else { TX_LEVELS - 1 };
        table[i].apc = levels[src];
        i += 1;
    }
    table
}

/// Full TX level table, EGSM900
pub static TX_LEVEL_TABLE_900: [TxLevel; TX_LEVELS_TABLE_SIZE] = expand_levels(&LEVELS_LOW_BAND);

/// Full TX level table, DCS1800
pub static TX_LEVEL_TABLE_1800: [TxLevel; TX_LEVELS_TABLE_SIZE] =
    expand_levels(&LEVELS_HIGH_BAND);

/// Full TX level table, PCS1900
pub static TX_LEVEL_TABLE_1900: [TxLevel; TX_LEVELS_TABLE_SIZE] =
    expand_levels(&LEVELS_HIGH_BAND);

/// Zero-filled TX level table for unsupported bands
pub static TX_LEVEL_TABLE_UNSUPPORTED: [TxLevel; TX_LEVELS_TABLE_SIZE] = [TxLevel {
    apc: 0,
    ramp_index: 0,
    chan_cal_index: 0,
}; TX_LEVELS_TABLE_SIZE];

/// Full TX level table for a band
#[must_use]
pub fn tx_level_table(band: Band) -> &'static [TxLevel; TX_LEVELS_TABLE_SIZE] {
    match band {
        Band::Egsm900 => &TX_LEVEL_TABLE_900,
        Band::Dcs1800 => &TX_LEVEL_TABLE_1800,
        Band::Pcs1900 => &TX_LEVEL_TABLE_1900,
        Band::Gsm850 => &TX_LEVEL_TABLE_UNSUPPORTED,
        _ => &TX_LEVEL_TABLE_900,
    }
}

// =============================================================================
// Ramp profiles
// =============================================================================

/// Encoded APC ramp word: `((down << 5) | up) << 6`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RampWord(u16);

impl RampWord {
    /// Wrap a raw ramp word
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Encode ramp-up and ramp-down values (5 bits each)
    #[must_use]
    pub const fn new(up: u8, down: u8) -> Self {
        Self((((down as u16 & 0x1F) << 5) | (up as u16 & 0x1F)) << 6)
    }

    /// Raw ramp word
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Ramp-up value
    #[must_use]
    pub const fn up(self) -> u8 {
        ((self.0 >> 6) & 0x1F) as u8
    }

    /// Ramp-down value
    #[must_use]
    pub const fn down(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }
}

const fn ramp_set(raw: [u16; RAMP_PROFILES]) -> [RampWord; RAMP_PROFILES] {
    let mut set = [RampWord(0); RAMP_PROFILES];
    let mut i = 0;
    while i < RAMP_PROFILES {
        set[i] = RampWord(raw[i]);
        i += 1;
    }
    set
}

/// Ramp profiles for the primary configuration
pub static RAMP_PRIMARY: [RampWord; RAMP_PROFILES] = ramp_set([
    0x1b00, 0x2800, 0x1e80, 0x1e00, 0x2280, 0x1a00, 0x3680, 0x3000, //
    0x3480, 0x3680, 0x3680, 0x3680, 0x3200, 0x2e00, 0x3480, 0x3a80,
]);

/// Ramp profiles for the alternative configuration
pub static RAMP_ALT: [RampWord; RAMP_PROFILES] = ramp_set([
    0x0a80, 0x1e00, 0x2a80, 0x2e00, 0x2a80, 0x1c00, 0x0a00, 0x0000, //
    0x0000, 0x0000, 0x0000, 0x0080, 0x3400, 0x3e00, 0x3400, 0x1a80,
]);

/// Ramp profiles used by the variant configuration
///
/// No variant-specific set has been measured yet, so this points at
/// [`RAMP_ALT`]. Replace the target here once one exists.
pub static RAMP_VARIANT_FALLBACK: &[RampWord; RAMP_PROFILES] = &RAMP_ALT;

/// Ramp profiles for a configuration
#[must_use]
pub fn ramp_profiles(config: ConfigIndex) -> &'static [RampWord; RAMP_PROFILES] {
    match config {
        ConfigIndex::Primary => &RAMP_PRIMARY,
        ConfigIndex::Alt => &RAMP_ALT,
        ConfigIndex::Variant => RAMP_VARIANT_FALLBACK,
    }
}

// =============================================================================
// PA timing (quarter bits)
// =============================================================================

/// PA on time, EGSM900
pub static PA_ON_TIME_900: [u8; PA_TIMING_ENTRIES] =
    [21, 22, 21, 21, 21, 23, 23, 23, 23, 25, 25, 25, 25, 25, 25, 21];

/// PA on time, DCS1800
pub static PA_ON_TIME_1800: [u8; PA_TIMING_ENTRIES] =
    [21, 22, 21, 21, 21, 23, 23, 23, 23, 25, 25, 25, 25, 25, 25, 25];

/// PA on time, PCS1900
pub static PA_ON_TIME_1900: [u8; PA_TIMING_ENTRIES] = [10; PA_TIMING_ENTRIES];

/// PA off time, EGSM900
pub static PA_OFF_TIME_900: [u8; PA_TIMING_ENTRIES] =
    [30, 30, 30, 30, 30, 30, 30, 30, 30, 25, 25, 25, 25, 25, 25, 25];

/// PA off time, DCS1800
pub static PA_OFF_TIME_1800: [u8; PA_TIMING_ENTRIES] =
    [30, 30, 30, 30, 30, 30, 30, 30, 30, 25, 25, 25, 25, 25, 25, 25];

/// PA off time, PCS1900
pub static PA_OFF_TIME_1900: [u8; PA_TIMING_ENTRIES] =
    [30, 30, 30, 30, 30, 30, 30, 30, 30, 25, 25, 25, 25, 25, 25, 25];

/// PA on timing for a band
#[must_use]
pub fn pa_on_time(band: Band) -> &'static [u8; PA_TIMING_ENTRIES] {
    match band {
        Band::Dcs1800 => &PA_ON_TIME_1800,
        Band::Pcs1900 => &PA_ON_TIME_1900,
        _ => &PA_ON_TIME_900,
    }
}

/// PA off timing for a band
#[must_use]
pub fn pa_off_time(band: Band) -> &'static [u8; PA_TIMING_ENTRIES] {
    match band {
        Band::Dcs1800 => &PA_OFF_TIME_1800,
        Band::Pcs1900 => &PA_OFF_TIME_1900,
        _ => &PA_OFF_TIME_900,
    }
}

// =============================================================================
// AFC
// =============================================================================

/// AFC calibration constants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AfcParams {
    /// Initial DAC value
    pub initial: i16,
    /// DAC slope
    pub slope: i16,
}

/// TSM30 AFC calibration
pub const AFC: AfcParams = AfcParams {
    initial: AFC_INITIAL,
    slope: AFC_SLOPE,
};
