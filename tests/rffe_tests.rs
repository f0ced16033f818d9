//! RF Front End Tests
//!
//! Tests for TSPACT switching, port masks and synthesizer ownership.
//! Run with: cargo test --test rffe_tests

use tsm30_rf::board::rffe::{mode_bits, mode_bits_with, signal, Port, RfFrontEnd, RX_PORTS, TX_PORTS};
use tsm30_rf::hal::tsp::{ActivationLatch, BusEvent, RecordingBus, TspLine};
use tsm30_rf::types::Band;

// =============================================================================
// Mode bits
// =============================================================================

#[test]
fn test_receive_selects_rx_path() {
    for band in [Band::Egsm900, Band::Dcs1800, Band::Pcs1900] {
        assert_eq!(mode_bits_with(0, band, false, true), signal::NRF_SWITCH);
    }
}

#[test]
fn test_transmit_low_band() {
    let bits = mode_bits_with(signal::NRF_SWITCH, Band::Egsm900, true, true);
    assert_eq!(bits, signal::PA_ON | signal::RF_SWITCH);
}

#[test]
fn test_transmit_high_band() {
    for band in [Band::Dcs1800, Band::Pcs1900] {
        let bits = mode_bits_with(0, band, true, true);
        assert_eq!(bits, signal::PA_ON | signal::PCS_ON);
    }
}

#[test]
fn test_transmit_unsupported_band_only_enables_pa() {
    assert_eq!(mode_bits_with(0, Band::Gsm850, true, true), signal::PA_ON);
}

#[test]
fn test_returning_to_receive_clears_pa() {
    let tx = mode_bits_with(signal::VCO_ON, Band::Dcs1800, true, true);
    let rx = mode_bits_with(tx, Band::Dcs1800, false, true);
    assert_eq!(rx, signal::VCO_ON | signal::NRF_SWITCH);
}

#[test]
fn test_mode_bits_follows_tx_feature() {
    let expected = mode_bits_with(0, Band::Egsm900, true, cfg!(feature = "tx"));
    assert_eq!(mode_bits(0, Band::Egsm900, true), expected);
}

// =============================================================================
// Ports
// =============================================================================

#[test]
fn test_port_masks() {
    assert_eq!(RX_PORTS, Port::Lo.bit() | Port::Dcs1800.bit());
    assert_eq!(TX_PORTS, Port::Lo.bit() | Port::Hi.bit());
    assert_eq!(Port::Pcs1900.bit(), 1 << 5);
}

// =============================================================================
// Front end
// =============================================================================

#[test]
fn test_new_initializes_synthesizer() {
    let rffe = RfFrontEnd::new(RecordingBus::new());
    assert_eq!(rffe.gain(), 40);

    let bus = rffe.release();
    assert_eq!(bus.events()[0], BusEvent::Toggle(TspLine::new(9)));
    assert_eq!(bus.transfers(TspLine::new(8)).count(), 17);
}

#[test]
fn test_set_mode_updates_latch() {
    let mut bus = RecordingBus::new();
    bus.act_update(signal::VCO_ON | signal::PCS_ON);

    let mut rffe = RfFrontEnd::new(bus);
    rffe.set_mode(Band::Egsm900, false);
    assert_eq!(rffe.tspact(), signal::VCO_ON | signal::NRF_SWITCH);

    rffe.set_mode(Band::Egsm900, true);
    assert_eq!(
        rffe.tspact(),
        mode_bits(signal::VCO_ON | signal::NRF_SWITCH, Band::Egsm900, true)
    );
}

#[test]
fn test_gain_and_iq_pass_through() {
    let mut rffe = RfFrontEnd::new(RecordingBus::new());
    assert!(rffe.set_gain(100).is_ok());
    assert_eq!(rffe.gain(), 100);
    assert!(rffe.set_gain(200).is_err());
    assert_eq!(rffe.gain(), 100);
    assert!(!rffe.iq_swapped(20, true));
    assert_eq!(rffe.rx_ports(), RX_PORTS);
    assert_eq!(rffe.tx_ports(), TX_PORTS);

    rffe.synth().set_channel(20, false);
    assert_eq!(rffe.release().transfers(TspLine::new(8)).count(), 17 + 1 + 3);
}
