//! Symbol override files and configuration-driven sizing.

mod common;

use std::io::Write;

use rust_decimal_macros::dec;

use journal_calc::config::AppConfig;
use journal_calc::sizing::PositionSizer;
use journal_calc::symbols::{DEFAULT_SYMBOL_META, SymbolTable, UnitLabel};
use journal_calc::JournalError;

use common::{RISK_PCT, fixtures_dir};

#[test]
fn test_fixture_overrides_load() {
    let table = SymbolTable::load(&fixtures_dir().join("symbols.json")).unwrap();

    assert_eq!(table.override_count(), 3);

    let ger = table.resolve("GER40");
    assert_eq!(ger.lot_step, dec!(0.1));
    assert_eq!(ger.unit_label, UnitLabel::Points);

    // Keys go through the same aliases as lookups.
    assert_eq!(table.resolve("nas100").tick_size, dec!(0.1));
    assert_eq!(table.resolve("EUR/USD").min_lot, dec!(0.1));
    // Built-ins without an override are untouched.
    assert_eq!(table.resolve("gbpusd").min_lot, dec!(0.01));
}

#[test]
fn test_overrides_change_sizing() {
    let table = SymbolTable::load(&fixtures_dir().join("symbols.json")).unwrap();
    let sizer = PositionSizer::new(table, dec!(50000));

    // 100 points of risk at $1/point: 500 / 100 = 5.0 lots on a 0.1 step.
    let result = sizer.size("18000", "17900", "", "50000", RISK_PCT, "ger40");
    assert_eq!(result.lot_size.to_string(), "5.00");

    // The 0.1 step floors 1.96 EURUSD lots down to 1.90.
    let result = sizer.size("1.10000", "1.09490", "", "100000", RISK_PCT, "EURUSD");
    assert_eq!(result.stop_ticks, dec!(51));
    assert_eq!(result.lot_size.to_string(), "1.90");
}

#[test]
fn test_malformed_file_is_a_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"symbols\": [").unwrap();

    let err = SymbolTable::load(file.path()).unwrap_err();
    assert!(matches!(err, JournalError::Json(_)));
}

#[test]
fn test_non_positive_fields_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"symbols": {{"GER40": {{"tick_size": "0", "tick_value": "1",
            "min_lot": "0.1", "lot_step": "0.1", "unit_label": "points"}}}}}}"#
    )
    .unwrap();

    let err = SymbolTable::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("tick_size"), "{err}");
}

#[test]
fn test_empty_document_keeps_builtins() {
    let table = SymbolTable::from_json("{}").unwrap();
    assert_eq!(table.override_count(), 0);
    assert_eq!(table.resolve("GER40"), DEFAULT_SYMBOL_META);
    assert_eq!(table.resolve("xauusd").tick_size, dec!(0.01));
}

#[test]
fn test_config_points_sizer_at_overrides() {
    let config = AppConfig {
        default_capital: dec!(10000),
        symbols_path: Some(fixtures_dir().join("symbols.json")),
        ..AppConfig::default()
    };
    let sizer = config.sizer().unwrap();

    assert_eq!(sizer.default_capital(), dec!(10000));
    assert_eq!(sizer.symbols().override_count(), 3);

    // No capital typed: 1% of the configured 10 000.
    let result = sizer.size("18000", "17900", "", "", RISK_PCT, "GER40");
    assert_eq!(result.risk_amount, dec!(100));
    assert_eq!(result.lot_size.to_string(), "1.00");
}
