//! Shared types used across the board support crate
//!
//! Domain-specific types for channels, bands, hardware revisions and
//! configuration indices.

use core::fmt;

/// ARFCN flag marking a PCS1900 channel
pub const ARFCN_PCS: u16 = 0x8000;

/// ARFCN flag marking an uplink channel
pub const ARFCN_UPLINK: u16 = 0x4000;

/// Mask of all ARFCN flag bits
pub const ARFCN_FLAG_MASK: u16 = 0xF000;

/// GSM frequency band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// GSM 450
    Gsm450,
    /// GSM 480
    Gsm480,
    /// GSM 750
    Gsm750,
    /// GSM 810
    Gsm810,
    /// GSM 850
    Gsm850,
    /// Extended GSM 900
    Egsm900,
    /// DCS 1800
    Dcs1800,
    /// PCS 1900
    Pcs1900,
}

impl Band {
    /// Derive the band from a channel number, including its flag bits
    ///
    /// Channels outside every known range are reported as DCS1800.
    #[must_use]
    pub const fn from_arfcn(arfcn: u16) -> Self {
        let is_pcs = arfcn & ARFCN_PCS != 0;
        let arfcn = arfcn & !ARFCN_FLAG_MASK;

        if is_pcs {
            Self::Pcs1900
        } else if arfcn <= 124 || (arfcn >= 955 && arfcn <= 1023) {
            Self::Egsm900
        } else if arfcn >= 128 && arfcn <= 251 {
            Self::Gsm850
        } else if arfcn >= 512 && arfcn <= 885 {
            Self::Dcs1800
        } else if arfcn >= 259 && arfcn <= 293 {
            Self::Gsm450
        } else if arfcn >= 306 && arfcn <= 340 {
            Self::Gsm480
        } else if arfcn >= 350 && arfcn <= 425 {
            Self::Gsm810
        } else if arfcn >= 438 && arfcn <= 511 {
            Self::Gsm750
        } else {
            Self::Dcs1800
        }
    }

    /// Check if the TSM30 RF section supports this band
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Egsm900 | Self::Dcs1800 | Self::Pcs1900)
    }

    /// Check if this is a high band (DCS/PCS) for PA and switch selection
    #[must_use]
    pub const fn is_high_band(self) -> bool {
        matches!(self, Self::Dcs1800 | Self::Pcs1900)
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Gsm450 => "GSM450",
            Self::Gsm480 => "GSM480",
            Self::Gsm750 => "GSM750",
            Self::Gsm810 => "GSM810",
            Self::Gsm850 => "GSM850",
            Self::Egsm900 => "EGSM900",
            Self::Dcs1800 => "DCS1800",
            Self::Pcs1900 => "PCS1900",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// Link direction for synthesizer programming
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Base station to handset (receive)
    #[default]
    Downlink,
    /// Handset to base station (transmit)
    Uplink,
}

impl Direction {
    /// Map a boolean uplink flag to a direction
    #[must_use]
    pub const fn from_uplink(uplink: bool) -> Self {
        if uplink {
            Self::Uplink
        } else {
            Self::Downlink
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downlink => f.write_str("DL"),
            Self::Uplink => f.write_str("UL"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Downlink => defmt::write!(f, "DL"),
            Self::Uplink => defmt::write!(f, "UL"),
        }
    }
}

/// Official hardware revision (O&M field 33)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HwRevision {
    /// Rev C, old or new LCD depending on the internal version
    RevC,
    /// Rev D, new LCD
    RevD,
    /// Rev E
    RevE,
    /// Any other stored value
    Unrecognized(u8),
}

impl HwRevision {
    /// Decode a stored revision byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::RevC,
            1 => Self::RevD,
            2 => Self::RevE,
            other => Self::Unrecognized(other),
        }
    }

    /// The stored revision byte
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::RevC => 0,
            Self::RevD => 1,
            Self::RevE => 2,
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for HwRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevC => f.write_str("rev C"),
            Self::RevD => f.write_str("rev D"),
            Self::RevE => f.write_str("rev E"),
            Self::Unrecognized(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for HwRevision {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::RevC => defmt::write!(f, "rev C"),
            Self::RevD => defmt::write!(f, "rev D"),
            Self::RevE => defmt::write!(f, "rev E"),
            Self::Unrecognized(raw) => defmt::write!(f, "unknown ({})", raw),
        }
    }
}

/// Calibration configuration selected from the hardware identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConfigIndex {
    /// Default configuration
    #[default]
    Primary,
    /// Alternative configuration (new LCD hardware)
    Alt,
    /// Variant configuration (rev E)
    Variant,
}

impl ConfigIndex {
    /// Check if this is anything other than the baseline configuration
    #[must_use]
    pub const fn is_patched_hardware(self) -> bool {
        !matches!(self, Self::Primary)
    }
}

impl fmt::Display for ConfigIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Alt => f.write_str("alt"),
            Self::Variant => f.write_str("variant"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigIndex {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Primary => defmt::write!(f, "primary"),
            Self::Alt => defmt::write!(f, "alt"),
            Self::Variant => defmt::write!(f, "variant"),
        }
    }
}

/// A version byte that may not have been read, for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaybeVersion(pub Option<u8>);

impl fmt::Display for MaybeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("unknown"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for MaybeVersion {
    fn format(&self, f: defmt::Formatter) {
        match self.0 {
            Some(v) => defmt::write!(f, "{}", v),
            None => defmt::write!(f, "unknown"),
        }
    }
}
