//! RF Front End
//!
//! Drives the TSM30 RF switches and PA enables through the TSPACT output
//! word, and owns the [`Lmx2326`] synthesizer.
//!
//! Transmit switching is only compiled in with the `tx` feature. Without it
//! every mode change leaves the front end in receive.

use crate::drivers::lmx2326::Lmx2326;
use crate::error::GainError;
use crate::hal::tsp::{ActivationLatch, ControlBus};
use crate::types::Band;

/// TSPACT signals owned by the front end
pub mod signal {
    /// VCO enable
    pub const VCO_ON: u16 = 1 << 1;
    /// PA enable
    pub const PA_ON: u16 = 1 << 2;
    /// Antenna switch control
    pub const SWITCH_CTL: u16 = 1 << 3;
    /// Low-band TX antenna path
    pub const RF_SWITCH: u16 = 1 << 4;
    /// Ramp DAC enable
    pub const RAMP_DAC: u16 = 1 << 8;
    /// Receive antenna path (active low TX switch)
    pub const NRF_SWITCH: u16 = 1 << 9;
    /// High-band PA select
    pub const PCS_ON: u16 = 1 << 10;
}

/// Front-end ports reported to layer 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Port {
    /// Low-band path
    Lo = 0,
    /// High-band path
    Hi = 1,
    /// GSM850 path
    Gsm850 = 2,
    /// EGSM900 path
    Gsm900 = 3,
    /// DCS1800 path
    Dcs1800 = 4,
    /// PCS1900 path
    Pcs1900 = 5,
}

impl Port {
    /// Bit of this port in a port mask
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Ports wired for receive
pub const RX_PORTS: u8 = Port::Lo.bit() | Port::Dcs1800.bit();

/// Ports wired for transmit
pub const TX_PORTS: u8 = Port::Lo.bit() | Port::Hi.bit();

/// Signals cleared on every mode change
const MODE_MASK: u16 = signal::PA_ON | signal::RF_SWITCH | signal::PCS_ON;

/// TSPACT word for a band and direction
///
/// Keeps every bit outside the front-end's own signals. Transmit is honored
/// only when `tx_enabled` is set.
#[must_use]
pub const fn mode_bits_with(current: u16, band: Band, tx: bool, tx_enabled: bool) -> u16 {
    let mut bits = (current & !MODE_MASK) | signal::NRF_SWITCH;

    if tx && tx_enabled {
        bits &= !signal::NRF_SWITCH;
        bits |= signal::PA_ON;
        if band.is_high_band() {
            bits |= signal::PCS_ON;
        } else if band.is_supported() {
            bits |= signal::RF_SWITCH;
        }
    }

    bits
}

/// TSPACT word for a band and direction, as built
#[must_use]
pub const fn mode_bits(current: u16, band: Band, tx: bool) -> u16 {
    mode_bits_with(current, band, tx, cfg!(feature = "tx"))
}

/// TSM30 RF front end
pub struct RfFrontEnd<B> {
    synth: Lmx2326<B>,
}

impl<B: ControlBus + ActivationLatch> RfFrontEnd<B> {
    /// Initialize the synthesizer on its default lines and take the bus
    pub fn new(bus: B) -> Self {
        Self {
            synth: Lmx2326::init_default(bus),
        }
    }

    /// Switch antenna path and PA for a band and direction
    pub fn set_mode(&mut self, band: Band, tx: bool) {
        if !band.is_supported() {
            warn!("RFFE: {} not wired, antenna path unchanged", band);
        }
        let bus = self.synth.bus_mut();
        let bits = mode_bits(bus.act_state(), band, tx);
        debug!("RFFE: {} {} -> {}", band, if tx { "TX" } else { "RX" }, bits);
        bus.act_update(bits);
    }

    /// Current TSPACT output word
    #[must_use]
    pub fn tspact(&self) -> u16 {
        self.synth.bus().act_state()
    }

    /// Ports usable for receive
    #[must_use]
    pub const fn rx_ports(&self) -> u8 {
        RX_PORTS
    }

    /// Ports usable for transmit
    #[must_use]
    pub const fn tx_ports(&self) -> u8 {
        TX_PORTS
    }

    /// Whether I and Q are swapped for a channel and direction
    #[must_use]
    pub const fn iq_swapped(&self, channel: u16, tx: bool) -> bool {
        self.synth.iq_swapped(channel, tx)
    }

    /// Set the receive gain
    ///
    /// # Errors
    ///
    /// See [`Lmx2326::set_gain`].
    pub fn set_gain(&mut self, gain: u8) -> Result<(), GainError> {
        self.synth.set_gain(gain)
    }

    /// Last accepted gain
    #[must_use]
    pub const fn gain(&self) -> u8 {
        self.synth.gain()
    }

    /// Synthesizer
    pub fn synth(&mut self) -> &mut Lmx2326<B> {
        &mut self.synth
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.synth.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_keeps_foreign_bits() {
        let current = signal::VCO_ON | signal::PA_ON | signal::PCS_ON | 0x8000;
        let bits = mode_bits_with(current, Band::Dcs1800, false, true);
        assert_eq!(bits, signal::VCO_ON | signal::NRF_SWITCH | 0x8000);
    }

    #[test]
    fn transmit_needs_tx_enabled() {
        assert_eq!(
            mode_bits_with(0, Band::Egsm900, true, false),
            signal::NRF_SWITCH
        );
        assert_eq!(
            mode_bits_with(0, Band::Egsm900, true, true),
            signal::PA_ON | signal::RF_SWITCH
        );
    }

    #[test]
    fn port_masks() {
        assert_eq!(RX_PORTS, 0b1_0001);
        assert_eq!(TX_PORTS, 0b0_0011);
    }
}
