//! Shared test utilities.
#![allow(dead_code)]

use std::path::PathBuf;

use journal_calc::models::TradeForm;
use journal_calc::sizing::{PositionSizeResult, compute_position};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Risk percentage used by most tests.
pub const RISK_PCT: Decimal = dec!(1);

/// Path to the test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A complete, submittable EURUSD long: 50 pips of risk on 100 000.
pub fn eurusd_long() -> TradeForm {
    TradeForm {
        date: "2025-03-14".to_string(),
        symbol: "EURUSD".to_string(),
        direction: "Long".to_string(),
        entry: "1.10000".to_string(),
        sl: "1.09500".to_string(),
        tp: "1.11000".to_string(),
        capital: "100000".to_string(),
    }
}

/// Builds a form with the given direction and prices on top of [`eurusd_long`].
pub fn form(direction: &str, entry: &str, sl: &str, tp: &str) -> TradeForm {
    TradeForm {
        direction: direction.to_string(),
        entry: entry.to_string(),
        sl: sl.to_string(),
        tp: tp.to_string(),
        ..eurusd_long()
    }
}

/// Sizes a form with the default sizer at [`RISK_PCT`].
pub fn size(form: &TradeForm) -> PositionSizeResult {
    compute_position(
        &form.entry,
        &form.sl,
        &form.tp,
        &form.capital,
        RISK_PCT,
        &form.symbol,
    )
}
