//! Calibration Table Tests
//!
//! Tests for TX level, ramp, PA timing and AFC tables.
//! Run with: cargo test --test rf_tables_tests

use tsm30_rf::board::rf_tables::*;
use tsm30_rf::config::{TX_LEVELS, TX_LEVELS_TABLE_SIZE};
use tsm30_rf::types::{Band, ConfigIndex};

const ALL_BANDS: [Band; 8] = [
    Band::Gsm450,
    Band::Gsm480,
    Band::Gsm750,
    Band::Gsm810,
    Band::Gsm850,
    Band::Egsm900,
    Band::Dcs1800,
    Band::Pcs1900,
];

// =============================================================================
// Ramp profiles
// =============================================================================

#[test]
fn test_primary_ramp_profiles() {
    let ramps = ramp_profiles(ConfigIndex::Primary);
    assert_eq!(ramps[0].raw(), 0x1b00);
    assert_eq!(ramps[15].raw(), 0x3a80);
    assert!(core::ptr::eq(ramps, &RAMP_PRIMARY));
}

#[test]
fn test_alt_and_variant_share_ramp_profiles() {
    let alt = ramp_profiles(ConfigIndex::Alt);
    let variant = ramp_profiles(ConfigIndex::Variant);

    assert_eq!(alt, variant);
    assert!(core::ptr::eq(alt, variant));
    assert!(core::ptr::eq(variant, RAMP_VARIANT_FALLBACK));
    assert_ne!(alt, ramp_profiles(ConfigIndex::Primary));
}

#[test]
fn test_ramp_words_decode() {
    // 0x1b00 = ((3 << 5) | 12) << 6
    let word = RAMP_PRIMARY[0];
    assert_eq!(word.up(), 12);
    assert_eq!(word.down(), 3);
    assert_eq!(RampWord::new(word.up(), word.down()), word);
    assert_eq!(RampWord::from_raw(0).up(), 0);
}

// =============================================================================
// TX levels
// =============================================================================

#[test]
fn test_tx_levels_per_band() {
    assert_eq!(tx_levels(Band::Egsm900)[0], 0x320);
    assert_eq!(tx_levels(Band::Dcs1800)[0], 0x330);
    assert_eq!(tx_levels(Band::Pcs1900), tx_levels(Band::Dcs1800));
    assert_eq!(tx_levels(Band::Egsm900)[TX_LEVELS - 1], 0);
}

#[test]
fn test_gsm850_tables_are_zero_filled() {
    assert!(tx_levels(Band::Gsm850).iter().all(|&apc| apc == 0));
    assert!(tx_level_table(Band::Gsm850)
        .iter()
        .all(|level| *level == TxLevel::default()));
}

#[test]
fn test_tx_level_table_layout() {
    for band in [Band::Egsm900, Band::Dcs1800, Band::Pcs1900] {
        let table = tx_level_table(band);
        let levels = tx_levels(band);
        assert_eq!(table.len(), TX_LEVELS_TABLE_SIZE);

        for (i, level) in table.iter().enumerate() {
            let expected = levels[i.min(TX_LEVELS - 1)];
            assert_eq!(level.apc, expected, "{band} level {i}");
            assert_eq!(level.ramp_index, 0);
            assert_eq!(level.chan_cal_index, 0);
        }
    }
}

#[test]
fn test_every_band_has_tables() {
    for band in ALL_BANDS {
        assert_eq!(tx_levels(band).len(), TX_LEVELS);
        assert_eq!(pa_on_time(band).len(), 16);
        assert_eq!(pa_off_time(band).len(), 16);
    }
}

// =============================================================================
// PA timing
// =============================================================================

#[test]
fn test_pa_on_time_per_band() {
    assert_eq!(pa_on_time(Band::Egsm900)[15], 21);
    assert_eq!(pa_on_time(Band::Dcs1800)[15], 25);
    assert!(pa_on_time(Band::Pcs1900).iter().all(|&t| t == 10));
    assert_eq!(pa_on_time(Band::Egsm900)[..15], pa_on_time(Band::Dcs1800)[..15]);
}

#[test]
fn test_pa_off_time_per_band() {
    for band in [Band::Egsm900, Band::Dcs1800, Band::Pcs1900] {
        let off = pa_off_time(band);
        assert!(off[..9].iter().all(|&t| t == 30));
        assert!(off[9..].iter().all(|&t| t == 25));
    }
}

#[test]
fn test_unsupported_bands_use_egsm_timing() {
    for band in [Band::Gsm450, Band::Gsm480, Band::Gsm750, Band::Gsm810, Band::Gsm850] {
        assert!(core::ptr::eq(pa_on_time(band), &PA_ON_TIME_900));
        assert!(core::ptr::eq(pa_off_time(band), &PA_OFF_TIME_900));
    }
}

// =============================================================================
// AFC
// =============================================================================

#[test]
fn test_afc_constants() {
    assert_eq!(AFC.initial, -768);
    assert_eq!(AFC.initial as u16, 0xFD00);
    assert_eq!(AFC.slope, 0xA0);
}
