//! Hardware Identity Resolver
//!
//! Reads the board's hardware revision, internal version and RF section
//! version from the flash file system, once, and caches the result.
//!
//! The revision and internal version come from one O&M parameter block and
//! are resolved together: either both are known or neither is. The RF
//! section version comes from a separate header and is cached on its own.
//! Read failures never propagate; the identity degrades to rev C with an
//! unknown internal version (or an unknown RF version) and the failure is
//! logged.

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;

use super::selector::select_config_index;
use crate::config::{
    HW_VERSION_OFFSET, INTERNAL_VERSION_OFFSET, OM_PARAMS_PATH, OM_PARAMS_SIZE,
    RF_SECTION_HEADER_SIZE, RF_SECTION_PATH,
};
use crate::error::StoreError;
use crate::store::ParameterStore;
use crate::types::{ConfigIndex, HwRevision};

/// Outcome of reading the O&M parameter block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OmParams {
    /// Not read yet
    #[default]
    Unread,
    /// Read failed; revision defaults to rev C, internal version unknown
    Fallback,
    /// Read succeeded
    Resolved {
        /// Official hardware revision byte (field 33)
        hw_version: u8,
        /// Internal version byte (field 44)
        internal_version: u8,
    },
}

impl OmParams {
    /// Hardware revision byte, if the block has been looked at
    #[must_use]
    pub const fn hw_version(self) -> Option<u8> {
        match self {
            Self::Unread => None,
            Self::Fallback => Some(HwRevision::RevC.raw()),
            Self::Resolved { hw_version, .. } => Some(hw_version),
        }
    }

    /// Internal version byte, known only after a successful read
    #[must_use]
    pub const fn internal_version(self) -> Option<u8> {
        match self {
            Self::Resolved {
                internal_version, ..
            } => Some(internal_version),
            Self::Unread | Self::Fallback => None,
        }
    }
}

/// RF section header: version, checksum, 13 reserved bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RfSectionHeader {
    /// RF calibration section version
    pub version: u8,
    /// Stored checksum (not verified)
    pub checksum: u16,
}

impl RfSectionHeader {
    /// Decode a raw header (checksum little-endian)
    #[must_use]
    pub const fn parse(raw: &[u8; RF_SECTION_HEADER_SIZE]) -> Self {
        Self {
            version: raw[0],
            checksum: u16::from_le_bytes([raw[1], raw[2]]),
        }
    }
}

/// Outcome of reading the RF section header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RfSection {
    /// Not read yet
    #[default]
    Unread,
    /// Read failed; version unknown
    Missing,
    /// Read succeeded
    Read(RfSectionHeader),
}

impl RfSection {
    /// RF section version, if known
    #[must_use]
    pub const fn version(self) -> Option<u8> {
        match self {
            Self::Read(header) => Some(header.version),
            Self::Unread | Self::Missing => None,
        }
    }
}

/// Snapshot of the resolved hardware identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HardwareIdentity {
    /// O&M-derived revision and internal version
    pub om: OmParams,
    /// RF section header
    pub rf: RfSection,
}

impl HardwareIdentity {
    /// Identity with a successfully read O&M block and no RF section info
    #[must_use]
    pub const fn resolved(hw_version: u8, internal_version: u8) -> Self {
        Self {
            om: OmParams::Resolved {
                hw_version,
                internal_version,
            },
            rf: RfSection::Unread,
        }
    }

    /// Same identity with the given RF section version
    #[must_use]
    pub const fn with_rf_version(self, version: u8) -> Self {
        Self {
            om: self.om,
            rf: RfSection::Read(RfSectionHeader {
                version,
                checksum: 0,
            }),
        }
    }

    /// Hardware revision byte
    #[must_use]
    pub const fn hw_version(&self) -> Option<u8> {
        self.om.hw_version()
    }

    /// Decoded hardware revision
    #[must_use]
    pub const fn hw_revision(&self) -> Option<HwRevision> {
        match self.om.hw_version() {
            Some(raw) => Some(HwRevision::from_raw(raw)),
            None => None,
        }
    }

    /// Internal version byte
    #[must_use]
    pub const fn internal_version(&self) -> Option<u8> {
        self.om.internal_version()
    }

    /// RF section version
    #[must_use]
    pub const fn rf_section_version(&self) -> Option<u8> {
        self.rf.version()
    }

    /// Configuration index for this identity, recomputed on every call
    #[must_use]
    pub fn config_index(&self) -> ConfigIndex {
        select_config_index(self.hw_revision(), self.internal_version())
    }
}

impl fmt::Display for HardwareIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hw_revision() {
            Some(rev) => write!(f, "hw {rev}")?,
            None => write!(f, "hw ?")?,
        }
        match self.internal_version() {
            Some(v) => write!(f, ", internal {v}")?,
            None => write!(f, ", internal ?")?,
        }
        match self.rf_section_version() {
            Some(v) => write!(f, ", rf {v}"),
            None => write!(f, ", rf ?"),
        }
    }
}

/// Lazily-resolving, caching hardware identity
///
/// Each source is read at most once per resolver. There is no invalidation;
/// build a new resolver to read again.
pub struct IdentityResolver<S> {
    store: S,
    identity: HardwareIdentity,
}

impl<S: ParameterStore> IdentityResolver<S> {
    /// Create a resolver; nothing is read until a value is requested
    pub const fn new(store: S) -> Self {
        Self {
            store,
            identity: HardwareIdentity {
                om: OmParams::Unread,
                rf: RfSection::Unread,
            },
        }
    }

    /// Hardware revision byte (field 33), reading the O&M block if needed
    ///
    /// A failed or short read yields rev C (0) and is cached like a success.
    pub fn resolve_hw_version(&mut self) -> u8 {
        self.resolve_om().hw_version().unwrap_or(HwRevision::RevC.raw())
    }

    /// Decoded hardware revision
    pub fn resolve_hw_revision(&mut self) -> HwRevision {
        HwRevision::from_raw(self.resolve_hw_version())
    }

    /// Internal version byte (field 44)
    ///
    /// Triggers the O&M read if needed. Unknown if that read failed.
    pub fn resolve_internal_version(&mut self) -> Option<u8> {
        self.resolve_om().internal_version()
    }

    /// RF section version, reading the section header if needed
    pub fn resolve_rf_section_version(&mut self) -> Option<u8> {
        self.resolve_rf().version()
    }

    /// RF section header, reading it if needed
    pub fn resolve_rf_section(&mut self) -> RfSection {
        self.resolve_rf()
    }

    /// Configuration index, resolving the O&M block if needed
    ///
    /// Not cached; recomputed from the cached identity on each call.
    pub fn select_config_index(&mut self) -> ConfigIndex {
        self.resolve_om();
        self.identity.config_index()
    }

    /// Current identity without triggering any read
    #[must_use]
    pub const fn identity(&self) -> HardwareIdentity {
        self.identity
    }

    /// Release the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    fn resolve_om(&mut self) -> OmParams {
        if self.identity.om == OmParams::Unread {
            self.identity.om = self.read_om_params();
        }
        self.identity.om
    }

    fn resolve_rf(&mut self) -> RfSection {
        if self.identity.rf == RfSection::Unread {
            self.identity.rf = self.read_rf_section();
        }
        self.identity.rf
    }

    fn read_om_params(&mut self) -> OmParams {
        let mut block = [0u8; OM_PARAMS_SIZE];

        match self.store.read_exact(OM_PARAMS_PATH, &mut block) {
            Ok(()) => {
                let hw_version = block[HW_VERSION_OFFSET];
                let internal_version = block[INTERNAL_VERSION_OFFSET];
                info!(
                    "TSM30: hardware version {} (internal {})",
                    hw_version, internal_version
                );
                OmParams::Resolved {
                    hw_version,
                    internal_version,
                }
            }
            Err(err) => {
                log_read_failure(OM_PARAMS_PATH, err);
                OmParams::Fallback
            }
        }
    }

    fn read_rf_section(&mut self) -> RfSection {
        let mut raw = [0u8; RF_SECTION_HEADER_SIZE];

        match self.store.read_exact(RF_SECTION_PATH, &mut raw) {
            Ok(()) => {
                let header = RfSectionHeader::parse(&raw);
                info!(
                    "TSM30: RF section version {} (checksum {})",
                    header.version, header.checksum
                );
                RfSection::Read(header)
            }
            Err(err) => {
                log_read_failure(RF_SECTION_PATH, err);
                RfSection::Missing
            }
        }
    }
}

fn log_read_failure(path: &str, err: StoreError) {
    warn!("TSM30: failed to read {}: {}", path, err);
}

/// Resolver shared between execution contexts
///
/// Every access runs inside a critical section, so an interrupt can never
/// observe a half-resolved identity.
pub struct SharedIdentity<S> {
    inner: Mutex<RefCell<IdentityResolver<S>>>,
}

impl<S: ParameterStore> SharedIdentity<S> {
    /// Wrap a store; nothing is read until a value is requested
    pub const fn new(store: S) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(IdentityResolver::new(store))),
        }
    }

    /// Run `f` with exclusive access to the resolver
    pub fn with<R>(&self, f: impl FnOnce(&mut IdentityResolver<S>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    /// See [`IdentityResolver::resolve_hw_version`]
    pub fn resolve_hw_version(&self) -> u8 {
        self.with(IdentityResolver::resolve_hw_version)
    }

    /// See [`IdentityResolver::resolve_internal_version`]
    pub fn resolve_internal_version(&self) -> Option<u8> {
        self.with(IdentityResolver::resolve_internal_version)
    }

    /// See [`IdentityResolver::resolve_rf_section_version`]
    pub fn resolve_rf_section_version(&self) -> Option<u8> {
        self.with(IdentityResolver::resolve_rf_section_version)
    }

    /// See [`IdentityResolver::select_config_index`]
    pub fn select_config_index(&self) -> ConfigIndex {
        self.with(IdentityResolver::select_config_index)
    }

    /// Current identity without triggering any read
    pub fn identity(&self) -> HardwareIdentity {
        self.with(|resolver| resolver.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rf_header_checksum_is_little_endian() {
        let mut raw = [0u8; RF_SECTION_HEADER_SIZE];
        raw[0] = 10;
        raw[1] = 0x34;
        raw[2] = 0x12;
        let header = RfSectionHeader::parse(&raw);
        assert_eq!(header.version, 10);
        assert_eq!(header.checksum, 0x1234);
    }

    #[test]
    fn fallback_reports_rev_c_without_internal_version() {
        assert_eq!(OmParams::Fallback.hw_version(), Some(0));
        assert_eq!(OmParams::Fallback.internal_version(), None);
        assert_eq!(OmParams::Unread.hw_version(), None);
    }
}
