//! Position sizing from an account risk budget.
//!
//! Turns the raw text of a trade form (entry, stop-loss, take-profit,
//! capital) plus a risk percentage into a lot size the broker accepts:
//! the stop distance is measured in whole ticks of the resolved symbol,
//! the risk budget is spread over it, and the exact lot is floored to the
//! symbol's lot step so the realized risk never exceeds the budget.
//!
//! Nothing here fails. Degenerate input (missing prices, identical entry and
//! stop) yields a result with [`PositionSizeResult::is_valid`] unset.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};

use crate::symbols::{SymbolMeta, SymbolTable, UnitLabel};

/// Capital assumed when the form has none (or a non-positive one).
pub const DEFAULT_CAPITAL: Decimal = dec!(50000);

/// Realized risk may exceed the budget by at most one cent before the
/// reduced-lot note is raised.
pub const RISK_TOLERANCE: Decimal = dec!(0.01);

/// Advisory attached to a sizing result when broker constraints bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotNote {
    /// The exact lot is positive but smaller than the symbol's minimum.
    BelowMinLot { min_lot: Decimal },
    /// The floored lot still exceeds the budget by more than
    /// [`RISK_TOLERANCE`]. Flooring only ever shrinks the lot, so this is
    /// not expected to fire with well-formed symbol metadata.
    ReducedToRisk,
    /// Entry and stop are closer than half a tick, so the stop rounds to
    /// zero ticks and no lot can be derived.
    StopBelowOneTick,
}

impl fmt::Display for LotNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinLot { min_lot } => write!(f, "below minimum lot {min_lot}"),
            Self::ReducedToRisk => write!(f, "lot auto-reduced (does not exceed risk)"),
            Self::StopBelowOneTick => write!(f, "stop distance is below one tick"),
        }
    }
}

impl Serialize for LotNote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sizing of one prospective trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionSizeResult {
    /// Lots to trade, always with two decimals (`0.00` when none).
    pub lot_size: Decimal,
    /// Risk budget in account currency, rounded to whole units.
    pub risk_amount: Decimal,
    /// Money at risk with [`lot_size`](Self::lot_size) if the stop is hit.
    pub realized_risk: Decimal,
    /// Reward-to-risk ratio by price distance, 0 without a take-profit.
    pub actual_rr: Decimal,
    /// Stop distance in whole ticks.
    pub stop_ticks: Decimal,
    pub lot_note: Option<LotNote>,
    pub unit_label: UnitLabel,
    /// Entry and stop are present, numeric and distinct.
    pub is_valid: bool,
}

impl PositionSizeResult {
    /// Result for incomplete or degenerate input.
    pub fn invalid() -> Self {
        Self {
            lot_size: dec!(0.00),
            risk_amount: Decimal::ZERO,
            realized_risk: Decimal::ZERO,
            actual_rr: Decimal::ZERO,
            stop_ticks: Decimal::ZERO,
            lot_note: None,
            unit_label: UnitLabel::Pips,
            is_valid: false,
        }
    }
}

/// Parses a numeric form field.
///
/// Accepts plain and scientific decimal text surrounded by whitespace.
/// Empty or unparseable text is absent.
pub fn parse_field(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parses a numeric form field, treating absent values as zero.
pub fn field_or_zero(raw: &str) -> Decimal {
    parse_field(raw).unwrap_or(Decimal::ZERO)
}

/// Position sizer bound to a symbol table and a fallback capital.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    symbols: SymbolTable,
    default_capital: Decimal,
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(SymbolTable::builtin(), DEFAULT_CAPITAL)
    }
}

impl PositionSizer {
    pub fn new(symbols: SymbolTable, default_capital: Decimal) -> Self {
        Self {
            symbols,
            default_capital,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn default_capital(&self) -> Decimal {
        self.default_capital
    }

    /// Sizes a trade from raw form text.
    ///
    /// `risk_pct` is a percentage of capital (`1` means 1 %).
    pub fn size(
        &self,
        entry: &str,
        sl: &str,
        tp: &str,
        capital: &str,
        risk_pct: Decimal,
        symbol: &str,
    ) -> PositionSizeResult {
        let entry = field_or_zero(entry);
        let sl = field_or_zero(sl);
        let tp = field_or_zero(tp);
        let capital = parse_field(capital)
            .filter(|c| *c > Decimal::ZERO)
            .unwrap_or(self.default_capital);

        if entry.is_zero() || sl.is_zero() || entry == sl {
            return PositionSizeResult::invalid();
        }

        let meta = self.symbols.resolve(symbol);
        match size_with(entry, sl, tp, capital, risk_pct, &meta) {
            Some(result) => result,
            None => {
                tracing::debug!(%entry, %sl, %capital, %risk_pct, "sizing overflowed, treating as invalid");
                PositionSizeResult::invalid()
            }
        }
    }
}

/// Sizes a trade against the built-in symbol table and [`DEFAULT_CAPITAL`].
pub fn compute_position(
    entry: &str,
    sl: &str,
    tp: &str,
    capital: &str,
    risk_pct: Decimal,
    symbol: &str,
) -> PositionSizeResult {
    PositionSizer::default().size(entry, sl, tp, capital, risk_pct, symbol)
}

/// Core arithmetic; `None` only on decimal overflow.
fn size_with(
    entry: Decimal,
    sl: Decimal,
    tp: Decimal,
    capital: Decimal,
    risk_pct: Decimal,
    meta: &SymbolMeta,
) -> Option<PositionSizeResult> {
    let price_distance = entry.checked_sub(sl)?.abs();
    // Fractional ticks are not tradable: round before sizing.
    let stop_ticks = price_distance
        .checked_div(meta.tick_size)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let risk_amount = capital.checked_mul(risk_pct)?.checked_div(dec!(100))?;

    let actual_rr = if tp.is_zero() {
        Decimal::ZERO
    } else {
        tp.checked_sub(entry)?.abs().checked_div(price_distance)?
    };

    let mut lot_size = dec!(0.00);
    let mut lot_note = None;

    let risk_per_lot = stop_ticks.checked_mul(meta.tick_value)?;
    if risk_per_lot.is_zero() {
        lot_note = Some(LotNote::StopBelowOneTick);
    } else {
        let exact_lot = risk_amount.checked_div(risk_per_lot)?;
        if exact_lot > Decimal::ZERO && exact_lot < meta.min_lot {
            lot_note = Some(LotNote::BelowMinLot {
                min_lot: meta.min_lot,
            });
        } else if exact_lot >= meta.min_lot {
            let steps = exact_lot.checked_div(meta.lot_step)?.floor();
            let mut floored = steps
                .checked_mul(meta.lot_step)?
                .round_dp_with_strategy(2, RoundingStrategy::ToZero);
            floored.rescale(2);
            lot_size = floored;

            let realized = lot_size.checked_mul(risk_per_lot)?;
            if realized > risk_amount.checked_add(RISK_TOLERANCE)? {
                lot_note = Some(LotNote::ReducedToRisk);
            }
        }
    }

    let result = PositionSizeResult {
        lot_size,
        risk_amount: risk_amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        realized_risk: lot_size.checked_mul(risk_per_lot)?,
        actual_rr,
        stop_ticks,
        lot_note,
        unit_label: meta.unit_label,
        is_valid: true,
    };
    tracing::trace!(
        lot_size = %result.lot_size,
        stop_ticks = %result.stop_ticks,
        risk_amount = %result.risk_amount,
        "sized position"
    );
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_accepts_plain_and_scientific() {
        assert_eq!(parse_field(" 1.10000 "), Some(dec!(1.10000)));
        assert_eq!(parse_field("1e3"), Some(dec!(1000)));
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("   "), None);
        assert_eq!(parse_field("abc"), None);
        assert_eq!(field_or_zero("abc"), Decimal::ZERO);
    }

    #[test]
    fn end_to_end_eurusd() {
        let r = compute_position("1.10000", "1.09500", "", "100000", dec!(1), "EURUSD");
        assert!(r.is_valid);
        assert_eq!(r.stop_ticks, dec!(50));
        assert_eq!(r.risk_amount, dec!(1000));
        assert_eq!(r.lot_size.to_string(), "2.00");
        assert_eq!(r.realized_risk, dec!(1000));
        assert_eq!(r.lot_note, None);
        assert_eq!(r.actual_rr, Decimal::ZERO);
        assert_eq!(r.unit_label, UnitLabel::Pips);
    }

    #[test]
    fn below_minimum_lot() {
        let r = compute_position("1.10000", "1.09000", "", "1000", dec!(0.5), "EURUSD");
        assert!(r.is_valid);
        assert_eq!(r.stop_ticks, dec!(100));
        assert_eq!(r.risk_amount, dec!(5));
        assert_eq!(r.lot_size.to_string(), "0.00");
        assert_eq!(
            r.lot_note,
            Some(LotNote::BelowMinLot {
                min_lot: dec!(0.01)
            })
        );
        assert_eq!(r.lot_note.unwrap().to_string(), "below minimum lot 0.01");
    }

    #[test]
    fn identical_entry_and_stop_is_invalid() {
        let r = compute_position("1.1000", "1.1000", "1.2000", "100000", dec!(1), "EURUSD");
        assert!(!r.is_valid);
        assert_eq!(r.lot_size.to_string(), "0.00");
        assert_eq!(r, PositionSizeResult::invalid());
    }

    #[test]
    fn missing_prices_are_invalid() {
        assert!(!compute_position("", "1.09", "", "", dec!(1), "EURUSD").is_valid);
        assert!(!compute_position("1.10", "", "", "", dec!(1), "EURUSD").is_valid);
        assert!(!compute_position("abc", "1.09", "", "", dec!(1), "EURUSD").is_valid);
        assert!(!compute_position("0", "1.09", "", "", dec!(1), "EURUSD").is_valid);
    }

    #[test]
    fn reward_to_risk_by_price_distance() {
        let r = compute_position("1.1000", "1.0950", "1.1100", "", dec!(1), "EURUSD");
        assert_eq!(r.actual_rr, dec!(2));
    }

    #[test]
    fn missing_capital_uses_default() {
        let r = compute_position("1.10000", "1.09500", "", "", dec!(1), "EURUSD");
        assert_eq!(r.risk_amount, dec!(500));
        assert_eq!(r.lot_size.to_string(), "1.00");

        let negative = compute_position("1.10000", "1.09500", "", "-5", dec!(1), "EURUSD");
        assert_eq!(negative.risk_amount, dec!(500));
    }

    #[test]
    fn sizer_uses_configured_default_capital() {
        let sizer = PositionSizer::new(SymbolTable::builtin(), dec!(10000));
        let r = sizer.size("1.10000", "1.09500", "", "", dec!(1), "EURUSD");
        assert_eq!(r.risk_amount, dec!(100));
        assert_eq!(r.lot_size.to_string(), "0.20");
    }

    #[test]
    fn lot_is_floored_to_step() {
        // 1000 / (30 * 10) = 3.333.. -> 3.33
        let r = compute_position("1.10000", "1.09700", "", "100000", dec!(1), "EURUSD");
        assert_eq!(r.stop_ticks, dec!(30));
        assert_eq!(r.lot_size.to_string(), "3.33");
        assert!(r.realized_risk <= dec!(1000));
        assert_eq!(r.lot_note, None);
    }

    #[test]
    fn stop_ticks_round_half_away_from_zero() {
        // 0.00125 / 0.0001 = 12.5 -> 13
        let r = compute_position("1.10000", "1.09875", "", "100000", dec!(1), "EURUSD");
        assert_eq!(r.stop_ticks, dec!(13));
    }

    #[test]
    fn stop_inside_half_tick_gets_note() {
        let r = compute_position("1.100000", "1.100040", "", "100000", dec!(1), "EURUSD");
        assert!(r.is_valid);
        assert_eq!(r.stop_ticks, Decimal::ZERO);
        assert_eq!(r.lot_size.to_string(), "0.00");
        assert_eq!(r.lot_note, Some(LotNote::StopBelowOneTick));
    }

    #[test]
    fn gold_uses_point_metadata() {
        // 10.00 / 0.01 = 1000 points; 500 / (1000 * 1) = 0.5 lots
        let r = compute_position("2000.00", "1990.00", "2030.00", "50000", dec!(1), "xau/usd");
        assert_eq!(r.stop_ticks, dec!(1000));
        assert_eq!(r.lot_size.to_string(), "0.50");
        assert_eq!(r.actual_rr, dec!(3));
        assert_eq!(r.unit_label, UnitLabel::Points);
    }

    #[test]
    fn zero_risk_pct_gives_no_lot_and_no_note() {
        let r = compute_position("1.10000", "1.09500", "", "100000", Decimal::ZERO, "EURUSD");
        assert!(r.is_valid);
        assert_eq!(r.lot_size.to_string(), "0.00");
        assert_eq!(r.lot_note, None);
    }

    #[test]
    fn overflowing_input_is_invalid_not_a_panic() {
        let r = compute_position("1", "2", "", "70000000000000000000000000000", dec!(100), "EURUSD");
        assert!(!r.is_valid);
    }

    #[test]
    fn lot_note_serializes_as_text() {
        let json = serde_json::to_string(&Some(LotNote::StopBelowOneTick)).unwrap();
        assert_eq!(json, "\"stop distance is below one tick\"");
    }
}
