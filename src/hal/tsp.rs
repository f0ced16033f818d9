//! TSP Control Lines
//!
//! The Calypso Time Serial Port drives the RF section through numbered
//! TSPACT lines. Drivers see it through two small traits: [`ControlBus`]
//! for serial strobe transfers and line pulses, and [`ActivationLatch`]
//! for the parallel TSPACT output state. Both are synchronous and cannot
//! fail at this layer.
//!
//! [`RecordingBus`] implements both and records every operation, which
//! makes it the host-side stand-in for the real port.

use core::fmt;

use heapless::Vec;

/// A TSPACT line number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TspLine(u8);

impl TspLine {
    /// Create from a line number
    #[must_use]
    pub const fn new(line: u8) -> Self {
        Self(line)
    }

    /// Get the line number
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TspLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TSPACT{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TspLine {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TSPACT{}", self.0);
    }
}

/// One serial transfer on a strobe line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// 8-bit transfer
    Byte(u8),
    /// 16-bit transfer
    Word(u16),
}

impl Transfer {
    /// Width of the transfer in bits
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Byte(_) => 8,
            Self::Word(_) => 16,
        }
    }

    /// Payload widened to 16 bits
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::Byte(b) => b as u16,
            Self::Word(w) => w,
        }
    }
}

/// Serial strobe access to the TSP
pub trait ControlBus {
    /// Shift a payload out on a strobe line
    fn update(&mut self, line: TspLine, transfer: Transfer);

    /// Pulse a line once
    fn toggle(&mut self, line: TspLine);
}

/// Parallel TSPACT output state
pub trait ActivationLatch {
    /// Current TSPACT output word
    fn act_state(&self) -> u16;

    /// Replace the TSPACT output word
    fn act_update(&mut self, state: u16);
}

impl<B: ControlBus + ?Sized> ControlBus for &mut B {
    fn update(&mut self, line: TspLine, transfer: Transfer) {
        (**self).update(line, transfer);
    }

    fn toggle(&mut self, line: TspLine) {
        (**self).toggle(line);
    }
}

impl<B: ActivationLatch + ?Sized> ActivationLatch for &mut B {
    fn act_state(&self) -> u16 {
        (**self).act_state()
    }

    fn act_update(&mut self, state: u16) {
        (**self).act_update(state);
    }
}

/// A recorded bus operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusEvent {
    /// Serial transfer on a line
    Update(TspLine, Transfer),
    /// Line pulse
    Toggle(TspLine),
}

/// Number of events a [`RecordingBus`] keeps
pub const RECORDING_CAPACITY: usize = 64;

/// Bus that records every operation
#[derive(Clone, Debug, Default)]
pub struct RecordingBus {
    events: Vec<BusEvent, RECORDING_CAPACITY>,
    dropped: usize,
    act: u16,
}

impl RecordingBus {
    /// Create an empty recording bus
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
            act: 0,
        }
    }

    /// Recorded events, oldest first
    #[must_use]
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// Events that did not fit in the recording buffer
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forget all recorded events
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Transfers sent on one line, oldest first
    pub fn transfers(&self, line: TspLine) -> impl Iterator<Item = Transfer> + '_ {
        self.events.iter().filter_map(move |event| match *event {
            BusEvent::Update(l, transfer) if l == line => Some(transfer),
            _ => None,
        })
    }

    fn record(&mut self, event: BusEvent) {
        if self.events.push(event).is_err() {
            self.dropped += 1;
        }
    }
}

impl ControlBus for RecordingBus {
    fn update(&mut self, line: TspLine, transfer: Transfer) {
        self.record(BusEvent::Update(line, transfer));
    }

    fn toggle(&mut self, line: TspLine) {
        self.record(BusEvent::Toggle(line));
    }
}

impl ActivationLatch for RecordingBus {
    fn act_state(&self) -> u16 {
        self.act
    }

    fn act_update(&mut self, state: u16) {
        self.act = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_bus_filters_by_line() {
        let mut bus = RecordingBus::new();
        let a = TspLine::new(1);
        let b = TspLine::new(2);

        bus.update(a, Transfer::Byte(0x11));
        bus.toggle(a);
        bus.update(b, Transfer::Word(0x2233));
        bus.update(a, Transfer::Byte(0x44));

        let on_a: Vec<Transfer, 8> = bus.transfers(a).collect();
        assert_eq!(on_a.as_slice(), &[Transfer::Byte(0x11), Transfer::Byte(0x44)]);
        assert_eq!(bus.events().len(), 4);
    }

    #[test]
    fn recording_bus_counts_overflow() {
        let mut bus = RecordingBus::new();
        for _ in 0..RECORDING_CAPACITY + 3 {
            bus.toggle(TspLine::new(0));
        }
        assert_eq!(bus.events().len(), RECORDING_CAPACITY);
        assert_eq!(bus.dropped(), 3);
    }
}
