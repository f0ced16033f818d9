//! Configuration Selector
//!
//! Maps the hardware identity onto the calibration configuration.
//!
//! | O&M field 33 | internal version | config    |
//! |--------------|------------------|-----------|
//! | rev C (0)    | known and > 0    | `Alt`     |
//! | rev C (0)    | 0 or unknown     | `Primary` |
//! | rev D (1)    | any              | `Alt`     |
//! | rev E (2)    | any              | `Variant` |
//! | other        | any              | `Primary` |
//!
//! Rev C boards exist with both the old and the new LCD; only the internal
//! version tells them apart.

use crate::types::{ConfigIndex, HwRevision};

/// Select the configuration for a hardware revision and internal version
///
/// Total over every input. Unrecognized or unresolved revisions select
/// `Primary` and log a warning.
#[must_use]
pub fn select_config_index(hw: Option<HwRevision>, internal_version: Option<u8>) -> ConfigIndex {
    match hw {
        Some(HwRevision::RevC) => match internal_version {
            Some(v) if v > 0 => ConfigIndex::Alt,
            _ => ConfigIndex::Primary,
        },
        Some(HwRevision::RevD) => ConfigIndex::Alt,
        Some(HwRevision::RevE) => ConfigIndex::Variant,
        Some(HwRevision::Unrecognized(raw)) => {
            warn!("TSM30: unknown hardware version {}, using default config", raw);
            ConfigIndex::Primary
        }
        None => {
            warn!("TSM30: hardware version unresolved, using default config");
            ConfigIndex::Primary
        }
    }
}

/// Select from raw O&M bytes
#[must_use]
pub fn select_from_raw(hw_version: u8, internal_version: Option<u8>) -> ConfigIndex {
    select_config_index(Some(HwRevision::from_raw(hw_version)), internal_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rev_c_splits_on_internal_version() {
        assert_eq!(select_from_raw(0, None), ConfigIndex::Primary);
        assert_eq!(select_from_raw(0, Some(0)), ConfigIndex::Primary);
        assert_eq!(select_from_raw(0, Some(1)), ConfigIndex::Alt);
    }

    #[test]
    fn later_revisions_ignore_internal_version() {
        assert_eq!(select_from_raw(1, None), ConfigIndex::Alt);
        assert_eq!(select_from_raw(1, Some(0)), ConfigIndex::Alt);
        assert_eq!(select_from_raw(2, Some(9)), ConfigIndex::Variant);
    }

    #[test]
    fn unresolved_is_primary() {
        assert_eq!(select_config_index(None, Some(5)), ConfigIndex::Primary);
    }
}
