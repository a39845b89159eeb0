//! Symbol metadata table and JSON overrides.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::{DEFAULT_SYMBOL_META, SymbolMeta, UnitLabel, normalize_symbol};

const FX_MAJOR: SymbolMeta = SymbolMeta {
    tick_size: dec!(0.0001),
    tick_value: dec!(10),
    min_lot: dec!(0.01),
    lot_step: dec!(0.01),
    unit_label: UnitLabel::Pips,
};

/// JPY pairs quote to two decimals; one pip is worth roughly $9.5 per lot.
const FX_JPY: SymbolMeta = SymbolMeta {
    tick_size: dec!(0.01),
    tick_value: dec!(9.5),
    min_lot: dec!(0.01),
    lot_step: dec!(0.01),
    unit_label: UnitLabel::Pips,
};

/// One lot is worth $1 per 0.01 move.
const GOLD: SymbolMeta = SymbolMeta {
    tick_size: dec!(0.01),
    tick_value: dec!(1),
    min_lot: dec!(0.01),
    lot_step: dec!(0.01),
    unit_label: UnitLabel::Points,
};

/// Indices and BTC: one lot is worth $1 per whole point.
const WHOLE_POINT: SymbolMeta = SymbolMeta {
    tick_size: dec!(1),
    tick_value: dec!(1),
    min_lot: dec!(0.01),
    lot_step: dec!(0.01),
    unit_label: UnitLabel::Points,
};

/// Built-in instruments keyed by canonical symbol.
///
/// The un-aliased keys (`XAUUSD`, `DJ30`, `US100`, ...) are unreachable
/// through [`normalize_symbol`] but kept so callers passing a pre-normalized
/// key still find them.
const BUILTIN_SYMBOLS: &[(&str, SymbolMeta)] = &[
    ("EUR/USD", FX_MAJOR),
    ("GBP/USD", FX_MAJOR),
    ("AUD/USD", FX_MAJOR),
    ("USD/CAD", FX_MAJOR),
    ("NZD/USD", FX_MAJOR),
    ("USD/JPY", FX_JPY),
    ("XAU/USD", GOLD),
    ("XAUUSD", GOLD),
    ("US30", WHOLE_POINT),
    ("DJ30", WHOLE_POINT),
    ("DOW", WHOLE_POINT),
    ("NAS100", WHOLE_POINT),
    ("US100", WHOLE_POINT),
    ("BTC/USD", WHOLE_POINT),
    ("BTCUSD", WHOLE_POINT),
];

/// On-disk shape of a symbol overrides file.
#[derive(Debug, Deserialize)]
struct OverridesFile {
    #[serde(default)]
    symbols: HashMap<String, SymbolMeta>,
}

/// Read-only symbol table: the built-in instruments plus optional overrides.
///
/// Overrides take precedence over built-in entries with the same key and
/// may add instruments the built-in table does not know.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    overrides: HashMap<String, SymbolMeta>,
}

impl SymbolTable {
    /// Returns a table holding only the built-in instruments.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Parses an overrides document (`{"symbols": {"GER40": {...}}}`).
    ///
    /// Keys are normalized the same way lookups are, so `"ger-40"` and
    /// `"GER40"` address the same entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an entry has a
    /// non-positive size, value, or lot field.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let file: OverridesFile = serde_json::from_str(json)?;
        let mut table = Self::builtin();
        for (raw_key, meta) in file.symbols {
            check_meta(&raw_key, &meta)?;
            let key = normalize_symbol(&raw_key);
            if key.is_empty() {
                tracing::debug!(raw_key = %raw_key, "skipping symbol override with empty key");
                continue;
            }
            table.overrides.insert(key, meta);
        }
        Ok(table)
    }

    /// Loads an overrides document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::JournalError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let table = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            overrides = table.overrides.len(),
            "loaded symbol overrides"
        );
        Ok(table)
    }

    /// Adds or replaces one entry.
    #[must_use]
    pub fn with_override(mut self, symbol: &str, meta: SymbolMeta) -> Self {
        self.overrides.insert(normalize_symbol(symbol), meta);
        self
    }

    /// Number of override entries layered on the built-in table.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Looks up an already-normalized key.
    pub fn get(&self, key: &str) -> Option<SymbolMeta> {
        self.overrides.get(key).copied().or_else(|| {
            BUILTIN_SYMBOLS
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, meta)| *meta)
        })
    }

    /// Resolves a free-text symbol, falling back to [`DEFAULT_SYMBOL_META`].
    pub fn resolve(&self, symbol_raw: &str) -> SymbolMeta {
        let key = normalize_symbol(symbol_raw);
        match self.get(&key) {
            Some(meta) => meta,
            None => {
                tracing::debug!(symbol = symbol_raw, key = %key, "unknown symbol, using default metadata");
                DEFAULT_SYMBOL_META
            }
        }
    }
}

fn check_meta(key: &str, meta: &SymbolMeta) -> crate::Result<()> {
    let fields = [
        ("tick_size", meta.tick_size),
        ("tick_value", meta.tick_value),
        ("min_lot", meta.min_lot),
        ("lot_step", meta.lot_step),
    ];
    for (name, value) in fields {
        if value <= Decimal::ZERO {
            return Err(crate::JournalError::Config(format!(
                "{key}: {name} must be positive, got {value}"
            )));
        }
    }
    Ok(())
}
