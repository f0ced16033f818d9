//! `LMX2326` RF Synthesizer Driver
//!
//! Programs the TSM30 synthesizer over a TSP strobe line. Registers are
//! either 8 bits wide (one 16-bit transfer carrying register and value) or
//! 24 bits wide (three 8-bit transfers, most significant byte first).
//!
//! The wideband PLL N-counter is computed per band and direction from the
//! channel number; see [`n_counter`].

use crate::config::{tsp, DEFAULT_GAIN, MAX_GAIN};
use crate::error::GainError;
use crate::hal::tsp::{ControlBus, Transfer, TspLine};
use crate::types::{Band, Direction};

/// `LMX2326` register addresses
pub mod reg {
    /// Power control (8-bit)
    pub const POWER_CTRL: u8 = 0;
    /// Gain control (8-bit)
    pub const GAIN_CTRL: u8 = 1;
    /// Misc control, including crystal tuning (24-bit)
    pub const MISC: u8 = 2;
    /// Wideband PLL N-counter (24-bit)
    pub const WB_PLL: u8 = 3;
    /// Reference divider (24-bit)
    pub const R_COUNTER: u8 = 4;
    /// IF PLL (24-bit)
    pub const IF_PLL: u8 = 5;
    /// Test register (24-bit)
    pub const TEST: u8 = 6;
}

/// Register constants written during initialization
pub mod consts {
    /// Power control after reset
    pub const POWER_CTRL: u8 = 0x00;
    /// Power control with every block enabled
    pub const POWER_CTRL_ON: u8 = 0xFF;
    /// Gain control after reset
    pub const GAIN_CTRL_RESET: u8 = 0x00;
    /// Misc control after reset (`XtalTuning` = 0x10)
    pub const MISC_CTL_RESET: u32 = 0x30_7F7E;
    /// Fixed bits of the wideband PLL register
    pub const WB_PLL: u32 = 0x00_4005;
    /// Phase detector polarity for EGSM
    pub const WB_PD_POS_EGSM: u32 = 0x00_0000;
    /// Phase detector polarity for DCS/PCS
    pub const WB_PD_POS_DCS: u32 = 0x00_0000;
    /// Fixed bits of the R-counter register
    pub const RCNT_PLL: u32 = 0x80_0000;
    /// R-counter GSM reference division
    pub const RCNT_PLL_GSM_DIV: u32 = 0x00_0000;
    /// Fixed bits of the IF PLL register
    pub const IF_PLL: u32 = 0x00_0000;
    /// IF PLL receive mode
    pub const IF_PLL_RX: u32 = 0x00_0000;
    /// IF PLL transmit mode
    pub const IF_PLL_TX: u32 = 0x00_0000;
    /// Test register initial value
    pub const TEST_INIT: u32 = 0x00_000F;
}

/// Mask of a 24-bit register value
const VALUE_MASK_24: u32 = 0x00FF_FFFF;

/// A single logical register write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterWrite {
    /// 8-bit register
    Short {
        /// Register address (0-7)
        reg: u8,
        /// Register value
        value: u8,
    },
    /// 24-bit register
    Long {
        /// Register address (0-7)
        reg: u8,
        /// Register value (low 24 bits used)
        value: u32,
    },
}

/// Serialized form of a [`RegisterWrite`]
///
/// An 8-bit write is a single transfer; a 24-bit write is three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    transfers: [Transfer; 3],
    len: usize,
}

impl Frame {
    /// Transfers in bus order
    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers[..self.len]
    }
}

impl RegisterWrite {
    /// Encode into strobe transfers
    ///
    /// 8-bit: one 16-bit unit `(reg & 7) << 8 | value`.
    /// 24-bit: the unit `(reg & 7) << 24 | (value & 0xFFFFFF)` is sent as
    /// bits [23:16], [15:8], [7:0]. The register address lives above bit 23
    /// and is never shifted out.
    #[must_use]
    pub const fn encode(self) -> Frame {
        match self {
            Self::Short { reg, value } => {
                let unit = ((reg as u16 & 0x07) << 8) | value as u16;
                Frame {
                    transfers: [Transfer::Word(unit), Transfer::Byte(0), Transfer::Byte(0)],
                    len: 1,
                }
            }
            Self::Long { reg, value } => {
                let unit = ((reg as u32 & 0x07) << 24) | (value & VALUE_MASK_24);
                Frame {
                    transfers: [
                        Transfer::Byte(((unit >> 16) & 0xFF) as u8),
                        Transfer::Byte(((unit >> 8) & 0xFF) as u8),
                        Transfer::Byte((unit & 0xFF) as u8),
                    ],
                    len: 3,
                }
            }
        }
    }
}

/// Compute the wideband PLL N-counter for a channel
///
/// ```text
/// EGSM900 UL:  2082*5 + 2*ch
/// EGSM900 DL:  2052*5 + (4*ch - ch)
/// DCS1800 UL:  2036*5 + (ch - 174)
/// DCS1800 DL:  2046*5 + (ch - 174)
/// other:       EGSM900 DL
/// ```
///
/// `channel` is the raw channel number including any flag bits.
#[must_use]
pub const fn n_counter(channel: u16, band: Band, direction: Direction) -> u32 {
    let ch = channel as i32;
    let ncnt = match (band, direction) {
        (Band::Egsm900, Direction::Uplink) => (2082 * 5) + (ch << 1),
        (Band::Egsm900, Direction::Downlink) => (2052 * 5) + ((ch << 2) - ch),
        (Band::Dcs1800, Direction::Uplink) => (2036 * 5) + (ch - 174),
        (Band::Dcs1800, Direction::Downlink) => (2046 * 5) + (ch - 174),
        _ => (2052 * 5) + ((ch << 2) - ch),
    };
    // Every band's result is positive for a 16-bit channel.
    ncnt as u32
}

/// Band-dependent phase detector bits for the wideband PLL register
#[must_use]
pub const fn wb_pd_pos(band: Band) -> u32 {
    match band {
        Band::Egsm900 => consts::WB_PD_POS_EGSM,
        _ => consts::WB_PD_POS_DCS,
    }
}

/// Full wideband PLL register value for a channel
#[must_use]
pub const fn wb_pll_word(channel: u16, direction: Direction) -> u32 {
    let band = Band::from_arfcn(channel);
    (consts::WB_PLL | wb_pd_pos(band) | n_counter(channel, band, direction)) & VALUE_MASK_24
}

/// `LMX2326` driver
pub struct Lmx2326<B> {
    bus: B,
    strobe: TspLine,
    reset: TspLine,
    gain: u8,
}

impl<B: ControlBus> Lmx2326<B> {
    /// Create and initialize the synthesizer on the given lines
    ///
    /// Pulses reset, then replays the fixed seven-register init sequence.
    pub fn init(bus: B, strobe: TspLine, reset: TspLine) -> Self {
        let mut synth = Self {
            bus,
            strobe,
            reset,
            gain: DEFAULT_GAIN,
        };
        synth.reset_and_configure();
        synth
    }

    /// Create on the TSM30 default lines (strobe TSPACT8, reset TSPACT9)
    pub fn init_default(bus: B) -> Self {
        Self::init(
            bus,
            TspLine::new(tsp::LMX2326_STROBE),
            TspLine::new(tsp::LMX2326_RESET),
        )
    }

    fn reset_and_configure(&mut self) {
        debug!("LMX2326: init strobe={} reset={}", self.strobe, self.reset);

        self.bus.toggle(self.reset);

        // Order matters: WB_PLL is overwritten by the first set_channel().
        self.write_8bit(reg::POWER_CTRL, consts::POWER_CTRL);
        self.write_8bit(reg::GAIN_CTRL, consts::GAIN_CTRL_RESET);
        self.write_24bit(reg::MISC, consts::MISC_CTL_RESET);
        self.write_24bit(reg::WB_PLL, consts::WB_PLL | consts::WB_PD_POS_EGSM);
        self.write_24bit(reg::R_COUNTER, consts::RCNT_PLL | consts::RCNT_PLL_GSM_DIV);
        self.write_24bit(reg::IF_PLL, consts::IF_PLL | consts::IF_PLL_RX);
        self.write_24bit(reg::TEST, consts::TEST_INIT);
    }

    /// Strobe line in use
    #[must_use]
    pub const fn strobe(&self) -> TspLine {
        self.strobe
    }

    /// Reset line in use
    #[must_use]
    pub const fn reset_line(&self) -> TspLine {
        self.reset
    }

    /// Enable all synthesizer blocks
    pub fn power_on(&mut self) {
        self.write_8bit(reg::POWER_CTRL, consts::POWER_CTRL_ON);
    }

    /// Disable all synthesizer blocks
    pub fn power_off(&mut self) {
        self.write_8bit(reg::POWER_CTRL, consts::POWER_CTRL);
    }

    /// Tune the wideband PLL to a channel
    pub fn set_channel(&mut self, channel: u16, uplink: bool) {
        let direction = Direction::from_uplink(uplink);
        let word = wb_pll_word(channel, direction);
        trace!(
            "LMX2326: ch {} {} ({}) wb_pll={}",
            channel,
            direction,
            Band::from_arfcn(channel),
            word
        );
        self.write_24bit(reg::WB_PLL, word);
    }

    /// Set the gain (0-127)
    ///
    /// # Errors
    ///
    /// Returns [`GainError::OutOfRange`] for values above 127; nothing is
    /// written and the cached gain is unchanged.
    pub fn set_gain(&mut self, gain: u8) -> Result<(), GainError> {
        if gain > MAX_GAIN {
            warn!("LMX2326: rejected gain {}", gain);
            return Err(GainError::OutOfRange(gain));
        }

        self.gain = gain;
        self.write_8bit(reg::GAIN_CTRL, gain);
        Ok(())
    }

    /// Last accepted gain
    #[must_use]
    pub const fn gain(&self) -> u8 {
        self.gain
    }

    /// Whether I and Q are swapped for this channel and direction
    ///
    /// The TSM30 RF section never swaps.
    #[must_use]
    pub const fn iq_swapped(&self, _channel: u16, _tx: bool) -> bool {
        false
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    pub(crate) fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub(crate) const fn bus(&self) -> &B {
        &self.bus
    }

    fn write_8bit(&mut self, reg: u8, value: u8) {
        self.write(RegisterWrite::Short { reg, value });
    }

    fn write_24bit(&mut self, reg: u8, value: u32) {
        self.write(RegisterWrite::Long { reg, value });
    }

    fn write(&mut self, write: RegisterWrite) {
        for transfer in write.encode().transfers() {
            self.bus.update(self.strobe, *transfer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_write_packs_register_above_value() {
        let frame = RegisterWrite::Short { reg: 1, value: 40 }.encode();
        assert_eq!(frame.transfers(), &[Transfer::Word(0x0128)]);
    }

    #[test]
    fn short_write_masks_register() {
        let frame = RegisterWrite::Short { reg: 0x0F, value: 0 }.encode();
        assert_eq!(frame.transfers(), &[Transfer::Word(0x0700)]);
    }

    #[test]
    fn long_write_sends_value_bytes() {
        let frame = RegisterWrite::Long {
            reg: 3,
            value: 0x00_4005,
        }
        .encode();
        assert_eq!(
            frame.transfers(),
            &[Transfer::Byte(0x00), Transfer::Byte(0x40), Transfer::Byte(0x05)]
        );
    }

    #[test]
    fn long_write_masks_value_above_24_bits() {
        let frame = RegisterWrite::Long {
            reg: 4,
            value: 0xAB12_3456,
        }
        .encode();
        assert_eq!(
            frame.transfers(),
            &[Transfer::Byte(0x12), Transfer::Byte(0x34), Transfer::Byte(0x56)]
        );
    }

    #[test]
    fn n_counter_fallback_uses_egsm_downlink() {
        assert_eq!(
            n_counter(0x8000 | 600, Band::Pcs1900, Direction::Uplink),
            n_counter(0x8000 | 600, Band::Egsm900, Direction::Downlink)
        );
    }
}
