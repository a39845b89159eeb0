//! Instrument metadata resolution.
//!
//! Traders type symbols in many shapes (`xauusd`, `EUR/USD`, `us-100`).
//! [`normalize_symbol`] folds them into the canonical key used by the
//! symbol table, and [`resolve`] returns the pricing granularity for that
//! key, falling back to [`DEFAULT_SYMBOL_META`] for anything unknown.

pub mod table;

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use table::SymbolTable;

/// Display unit for a tick move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitLabel {
    Pips,
    Points,
}

impl UnitLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitLabel::Pips => "pips",
            UnitLabel::Points => "points",
        }
    }
}

impl fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing granularity of one tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMeta {
    /// Smallest meaningful price increment.
    pub tick_size: Decimal,
    /// Account-currency value of one tick for one standard lot.
    pub tick_value: Decimal,
    /// Smallest tradable position size.
    pub min_lot: Decimal,
    /// Granularity a computed lot size is floored to.
    pub lot_step: Decimal,
    pub unit_label: UnitLabel,
}

/// Metadata used for any symbol missing from the table (standard FX lot).
pub const DEFAULT_SYMBOL_META: SymbolMeta = SymbolMeta {
    tick_size: dec!(0.0001),
    tick_value: dec!(10),
    min_lot: dec!(0.01),
    lot_step: dec!(0.01),
    unit_label: UnitLabel::Pips,
};

/// Broker aliases applied in order, each to its first occurrence.
const ALIASES: [(&str, &str); 5] = [
    ("XAUUSD", "XAU/USD"),
    ("BTCUSD", "BTC/USD"),
    ("US100", "NAS100"),
    ("DJ30", "US30"),
    ("DOW", "US30"),
];

/// Folds a free-text symbol into its canonical table key.
///
/// Trims and uppercases, strips whitespace, `/`, `-` and `_`, applies the
/// broker aliases, then splits a bare six-letter currency pair with a slash
/// (`EURUSD` becomes `EUR/USD`). Alias targets that already carry a slash
/// are left alone by the pair split.
pub fn normalize_symbol(raw: &str) -> String {
    let mut key: String = raw
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '-' | '_'))
        .collect();

    for (from, to) in ALIASES {
        key = key.replacen(from, to, 1);
    }

    if is_currency_pair(&key) {
        key.insert(3, '/');
    }

    key
}

/// Two consecutive three-letter currency codes and nothing else.
fn is_currency_pair(key: &str) -> bool {
    key.len() == 6 && key.bytes().all(|b| b.is_ascii_uppercase())
}

/// Resolves a free-text symbol against the built-in table.
///
/// Never fails: empty or unknown symbols yield [`DEFAULT_SYMBOL_META`].
pub fn resolve(symbol_raw: &str) -> SymbolMeta {
    SymbolTable::builtin().resolve(symbol_raw)
}
