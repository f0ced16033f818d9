//! Board Support
//!
//! TSM30 identity, configuration selection, start-up patches, calibration
//! tables and RF front end, plus the start-up sequence tying them together.

pub mod hw_version;
pub mod patches;
pub mod rf_tables;
pub mod rffe;
pub mod selector;

use self::hw_version::IdentityResolver;
use self::patches::{apply_patches_for, RfGlobals};
use crate::store::ParameterStore;
use crate::types::{ConfigIndex, MaybeVersion};

/// Board start-up: identity, RF section, then patches
///
/// Must run before layer 1 reads the RF timing globals. Returns the selected
/// configuration so the caller can pick its calibration tables.
pub fn initialize<S, G>(resolver: &mut IdentityResolver<S>, globals: &mut G) -> ConfigIndex
where
    S: ParameterStore,
    G: RfGlobals + ?Sized,
{
    let hw_version = resolver.resolve_hw_version();
    let rf_version = resolver.resolve_rf_section_version();
    let config = resolver.select_config_index();
    let applied = apply_patches_for(config, rf_version, globals);

    info!(
        "TSM30: board init hw {} rf {} config {} ({} patches)",
        hw_version,
        MaybeVersion(rf_version),
        config,
        applied
    );

    config
}
