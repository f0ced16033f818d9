//! SPI Control Bus
//!
//! Runs the synthesizer's serial strobe line over an `embedded-hal` SPI
//! device, with chip select standing in for the strobe, and the hard reset
//! on a GPIO. Boards without a TSP can drive the `LMX2326` this way.
//!
//! [`ControlBus`] cannot fail, so bus errors are logged and counted.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::tsp::{ControlBus, Transfer, TspLine};

/// [`ControlBus`] over an SPI device and a reset pin
pub struct SpiControlBus<SPI, RST> {
    spi: SPI,
    reset: RST,
    strobe_line: TspLine,
    reset_line: TspLine,
    errors: u32,
}

impl<SPI, RST> SpiControlBus<SPI, RST>
where
    SPI: SpiDevice<u8>,
    RST: OutputPin,
{
    /// Map `strobe_line` onto the SPI device and `reset_line` onto the pin
    pub const fn new(spi: SPI, reset: RST, strobe_line: TspLine, reset_line: TspLine) -> Self {
        Self {
            spi,
            reset,
            strobe_line,
            reset_line,
            errors: 0,
        }
    }

    /// Failed bus operations so far
    #[must_use]
    pub const fn errors(&self) -> u32 {
        self.errors
    }

    /// Release the SPI device and reset pin
    pub fn release(self) -> (SPI, RST) {
        (self.spi, self.reset)
    }

    fn record_error(&mut self, what: &str) {
        self.errors = self.errors.saturating_add(1);
        warn!("SPI bus: {} failed ({} errors)", what, self.errors);
    }
}

impl<SPI, RST> ControlBus for SpiControlBus<SPI, RST>
where
    SPI: SpiDevice<u8>,
    RST: OutputPin,
{
    fn update(&mut self, line: TspLine, transfer: Transfer) {
        if line != self.strobe_line {
            warn!("SPI bus: no strobe on {}", line);
            return;
        }

        let raw = transfer.value().to_be_bytes();
        let len = usize::from(transfer.bits() / 8);
        if self.spi.write(&raw[raw.len() - len..]).is_err() {
            self.record_error("write");
        }
    }

    fn toggle(&mut self, line: TspLine) {
        if line != self.reset_line {
            warn!("SPI bus: cannot pulse {}", line);
            return;
        }

        if self.reset.set_low().is_err() || self.reset.set_high().is_err() {
            self.record_error("reset pulse");
        }
    }
}
