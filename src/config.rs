//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `JOURNAL_DEFAULT_CAPITAL`: capital assumed when a form has none
//!   (default 50000)
//! - `JOURNAL_RISK_PCT`: risk per trade in percent (default 1)
//! - `JOURNAL_SYMBOLS_PATH`: JSON file of symbol metadata overrides
//! - `JOURNAL_LOG_FILE`: where the terminal UI writes its log

use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::sizing::{DEFAULT_CAPITAL, PositionSizer, parse_field};
use crate::symbols::SymbolTable;

/// Risk percentage used when `JOURNAL_RISK_PCT` is unset.
pub const DEFAULT_RISK_PCT: Decimal = dec!(1);

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_capital: Decimal,
    pub risk_pct: Decimal,
    pub symbols_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_capital: DEFAULT_CAPITAL,
            risk_pct: DEFAULT_RISK_PCT,
            symbols_path: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Builds the position sizer described by this configuration, loading
    /// the symbol overrides file when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the overrides file cannot be read or parsed.
    pub fn sizer(&self) -> crate::Result<PositionSizer> {
        let symbols = match &self.symbols_path {
            Some(path) => SymbolTable::load(path)?,
            None => SymbolTable::builtin(),
        };
        Ok(PositionSizer::new(symbols, self.default_capital))
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`JournalError::Config`](crate::JournalError::Config) if a
/// numeric variable is set but is not a positive decimal.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let default_capital = positive_var("JOURNAL_DEFAULT_CAPITAL")?.unwrap_or(DEFAULT_CAPITAL);
    let risk_pct = positive_var("JOURNAL_RISK_PCT")?.unwrap_or(DEFAULT_RISK_PCT);
    let symbols_path = non_empty_var("JOURNAL_SYMBOLS_PATH").map(PathBuf::from);
    let log_file = non_empty_var("JOURNAL_LOG_FILE").map(PathBuf::from);

    Ok(AppConfig {
        default_capital,
        risk_pct,
        symbols_path,
        log_file,
    })
}

/// Reads a variable that must hold a positive decimal when present.
fn positive_var(name: &str) -> crate::Result<Option<Decimal>> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(None);
    };
    match parse_field(&raw) {
        Some(value) if value > Decimal::ZERO => Ok(Some(value)),
        _ => {
            tracing::warn!(name, value = %raw, "rejected configuration value");
            Err(crate::JournalError::Config(format!(
                "{name} must be a positive number, got {raw:?}"
            )))
        }
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
