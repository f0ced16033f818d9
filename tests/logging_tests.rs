//! Start-up Logging Tests
//!
//! Checks the log lines emitted by the board start-up sequence.
//! Run with: cargo test --test logging_tests

use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};
use tsm30_rf::board::hw_version::IdentityResolver;
use tsm30_rf::board::patches::{apply_hardware_patches, RfTimingGlobals};
use tsm30_rf::config::{HW_VERSION_OFFSET, OM_PARAMS_PATH, OM_PARAMS_SIZE};
use tsm30_rf::initialize;
use tsm30_rf::store::RamStore;
use tsm30_rf::types::ConfigIndex;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger that keeps each test thread's records apart
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    // Only the first call installs the logger
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
    let result = f();
    let records = RECORDS.with(|records| records.borrow_mut().drain(..).collect());
    (result, records)
}

/// Board with an O&M block but no RF section
fn board_without_rf_section(hw_version: u8) -> IdentityResolver<RamStore> {
    let mut block = [0u8; OM_PARAMS_SIZE];
    block[HW_VERSION_OFFSET] = hw_version;

    let mut store = RamStore::new();
    store.insert(OM_PARAMS_PATH, &block);
    IdentityResolver::new(store)
}

fn count_containing(records: &[(Level, String)], needle: &str) -> usize {
    records.iter().filter(|(_, msg)| msg.contains(needle)).count()
}

// =============================================================================
// Initialize Tests
// =============================================================================

#[test]
fn test_unknown_hardware_warns_once_during_initialize() {
    let mut resolver = board_without_rf_section(7);
    let mut globals = RfTimingGlobals::new();

    let (config, records) = capture(|| initialize(&mut resolver, &mut globals));

    assert_eq!(config, ConfigIndex::Primary);
    let warnings: Vec<_> = records
        .iter()
        .filter(|(level, msg)| {
            *level == Level::Warn && msg.contains("unknown hardware version 7")
        })
        .collect();
    assert_eq!(warnings.len(), 1, "{records:?}");
}

#[test]
fn test_missing_rf_section_logged_as_unknown() {
    let mut resolver = board_without_rf_section(7);
    let mut globals = RfTimingGlobals::new();

    let (_, records) = capture(|| initialize(&mut resolver, &mut globals));

    assert_eq!(count_containing(&records, "rf unknown"), 1, "{records:?}");
    assert_eq!(count_containing(&records, "rf 0"), 0, "{records:?}");
}

// =============================================================================
// Patch Tests
// =============================================================================

#[test]
fn test_patch_step_logs_unknown_rf_version() {
    let mut resolver = board_without_rf_section(1);
    let mut globals = RfTimingGlobals::new();

    let (applied, records) = capture(|| apply_hardware_patches(&mut resolver, &mut globals));

    assert_eq!(applied, 0);
    assert_eq!(count_containing(&records, "RF version unknown"), 1, "{records:?}");
    assert_eq!(count_containing(&records, "RF version 0"), 0, "{records:?}");
}

#[test]
fn test_primary_skips_patch_step() {
    let mut resolver = board_without_rf_section(0);
    let mut globals = RfTimingGlobals::new();

    let (applied, records) = capture(|| apply_hardware_patches(&mut resolver, &mut globals));

    assert_eq!(applied, 0);
    assert_eq!(count_containing(&records, "applying RF patches"), 0, "{records:?}");
    assert_eq!(count_containing(&records, "stock RF timing"), 1, "{records:?}");
}
