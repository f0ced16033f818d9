//! Hardware Patches
//!
//! Some hardware/RF-section combinations need RF timing globals adjusted at
//! start-up. Each adjustment is one row in [`PATCH_RULES`]; adding a patch
//! means adding a row.

use core::fmt;

use super::hw_version::IdentityResolver;
use crate::config::APC_PATCH_RF_VERSION;
use crate::store::ParameterStore;
use crate::types::{ConfigIndex, MaybeVersion};

/// Rows (bands) in the APC disable-time table
pub const APC_BANDS: usize = 3;

/// Columns (timing slots) per band in the APC disable-time table
pub const APC_SLOTS: usize = 4;

/// Stock APC disable time (quarter bits)
pub const DEFAULT_APC_DISABLE_TIME: u16 = 0x18;

/// An addressable entry in the RF timing globals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimingParam {
    /// `ApcDisableTime[band][slot]`
    ApcDisableTime {
        /// Band row
        band: usize,
        /// Timing slot
        slot: usize,
    },
}

impl fmt::Display for TimingParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApcDisableTime { band, slot } => write!(f, "ApcDisableTime[{band}][{slot}]"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TimingParam {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ApcDisableTime { band, slot } => {
                defmt::write!(f, "ApcDisableTime[{}][{}]", band, slot);
            }
        }
    }
}

/// Layer 1 RF timing globals written by the patch step
pub trait RfGlobals {
    /// Overwrite one timing entry
    fn write_timing(&mut self, param: TimingParam, value: u16);
}

/// RF timing globals held in RAM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RfTimingGlobals {
    /// APC disable times per band and slot
    pub apc_disable_time: [[u16; APC_SLOTS]; APC_BANDS],
}

impl RfTimingGlobals {
    /// Stock timing values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            apc_disable_time: [[DEFAULT_APC_DISABLE_TIME; APC_SLOTS]; APC_BANDS],
        }
    }

    /// Read one timing entry
    #[must_use]
    pub fn read_timing(&self, param: TimingParam) -> Option<u16> {
        match param {
            TimingParam::ApcDisableTime { band, slot } => {
                self.apc_disable_time.get(band)?.get(slot).copied()
            }
        }
    }
}

impl Default for RfTimingGlobals {
    fn default() -> Self {
        Self::new()
    }
}

impl RfGlobals for RfTimingGlobals {
    fn write_timing(&mut self, param: TimingParam, value: u16) {
        match param {
            TimingParam::ApcDisableTime { band, slot } => {
                if let Some(entry) = self
                    .apc_disable_time
                    .get_mut(band)
                    .and_then(|row| row.get_mut(slot))
                {
                    *entry = value;
                } else {
                    error!("TSM30: timing entry {} out of range", param);
                }
            }
        }
    }
}

/// One conditional timing override
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchRule {
    /// Short name for logs
    pub name: &'static str,
    /// Configurations the rule applies to
    pub configs: &'static [ConfigIndex],
    /// RF section version the rule applies to
    pub rf_version: u8,
    /// Entry to overwrite
    pub param: TimingParam,
    /// New value
    pub value: u16,
}

impl PatchRule {
    /// Check the rule against a configuration and RF section version
    #[must_use]
    pub fn matches(&self, config: ConfigIndex, rf_version: Option<u8>) -> bool {
        rf_version == Some(self.rf_version) && self.configs.contains(&config)
    }
}

/// Every known patch
pub const PATCH_RULES: &[PatchRule] = &[PatchRule {
    name: "apc-disable-time",
    configs: &[ConfigIndex::Alt, ConfigIndex::Variant],
    rf_version: APC_PATCH_RF_VERSION,
    param: TimingParam::ApcDisableTime { band: 0, slot: 2 },
    value: 0x17,
}];

/// Rules matching a configuration and RF section version
pub fn matching_rules(
    config: ConfigIndex,
    rf_version: Option<u8>,
) -> impl Iterator<Item = &'static PatchRule> {
    PATCH_RULES
        .iter()
        .filter(move |rule| rule.matches(config, rf_version))
}

/// Apply every patch matching a resolved configuration and RF section version
///
/// Returns the number of patches applied. Baseline hardware is never patched.
pub fn apply_patches_for<G>(config: ConfigIndex, rf_version: Option<u8>, globals: &mut G) -> usize
where
    G: RfGlobals + ?Sized,
{
    if !config.is_patched_hardware() {
        debug!("TSM30: config {} runs stock RF timing", config);
        return 0;
    }

    info!(
        "TSM30: applying RF patches for config {}, RF version {}",
        config,
        MaybeVersion(rf_version)
    );

    let mut applied = 0;
    for rule in matching_rules(config, rf_version) {
        info!("TSM30: patch {}: {} = {}", rule.name, rule.param, rule.value);
        globals.write_timing(rule.param, rule.value);
        applied += 1;
    }
    applied
}

/// Apply every matching patch to the RF globals
///
/// Resolves the identity if needed. Returns the number of patches applied.
pub fn apply_hardware_patches<S, G>(resolver: &mut IdentityResolver<S>, globals: &mut G) -> usize
where
    S: ParameterStore,
    G: RfGlobals + ?Sized,
{
    let config = resolver.select_config_index();
    let rf_version = resolver.resolve_rf_section_version();
    apply_patches_for(config, rf_version, globals)
}
