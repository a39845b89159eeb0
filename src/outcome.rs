//! Profit and R-multiple of a closed trade.
//!
//! The journal stores each closed trade's profit in account currency and as
//! a percentage of capital, assuming it was sized at a fixed fraction of
//! capital on a standard-lot FX pip. These figures feed the R-based
//! statistics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::models::Direction;

/// Sizing assumptions used to reconstruct a closed trade's profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeParams {
    /// Fraction of capital risked per trade (`0.01` is 1 %).
    pub risk_fraction: Decimal,
    /// Price-to-pip multiplier (10 000 for four-digit pairs).
    pub pip_multiplier: Decimal,
    /// Account-currency value of one pip for one lot.
    pub pip_value_per_lot: Decimal,
}

impl Default for OutcomeParams {
    fn default() -> Self {
        Self {
            risk_fraction: dec!(0.01),
            pip_multiplier: dec!(10000),
            pip_value_per_lot: dec!(10),
        }
    }
}

/// Realized result of one trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TradeOutcome {
    /// Profit in account currency, two decimals; negative for a loss.
    pub profit: Decimal,
    /// Profit as a percentage of capital, two decimals.
    pub profit_pct: Decimal,
}

/// Reconstructs the profit of a closed trade.
///
/// A missing direction is treated as long. A trade without an exit, without
/// capital, or with a zero stop distance has a zero outcome.
pub fn profit_and_pct(
    exit: Option<Decimal>,
    entry: Decimal,
    direction: Option<Direction>,
    capital: Decimal,
    sl: Decimal,
    params: &OutcomeParams,
) -> TradeOutcome {
    let Some(exit) = exit else {
        return TradeOutcome::default();
    };
    if capital <= Decimal::ZERO {
        return TradeOutcome::default();
    }

    match outcome_with(exit, entry, direction, capital, sl, params) {
        Some(outcome) => outcome,
        None => {
            tracing::debug!(%exit, %entry, %sl, %capital, "outcome overflowed, reporting zero");
            TradeOutcome::default()
        }
    }
}

fn outcome_with(
    exit: Decimal,
    entry: Decimal,
    direction: Option<Direction>,
    capital: Decimal,
    sl: Decimal,
    params: &OutcomeParams,
) -> Option<TradeOutcome> {
    let stop_pips = entry.checked_sub(sl)?.abs().checked_mul(params.pip_multiplier)?;
    if stop_pips.is_zero() {
        return Some(TradeOutcome::default());
    }

    let pip_diff = exit
        .checked_sub(entry)?
        .abs()
        .checked_mul(params.pip_multiplier)?;
    let risk_amount = capital.checked_mul(params.risk_fraction)?;
    let lot_size = risk_amount.checked_div(stop_pips.checked_mul(params.pip_value_per_lot)?)?;
    let mut profit = pip_diff
        .checked_mul(lot_size)?
        .checked_mul(params.pip_value_per_lot)?;

    let losing = match direction {
        Some(Direction::Short) => exit > entry,
        _ => exit < entry,
    };
    if losing {
        profit = -profit;
    }

    let profit_pct = profit.checked_div(capital)?.checked_mul(dec!(100))?;
    Some(TradeOutcome {
        profit: profit.round_dp(2),
        profit_pct: profit_pct.round_dp(2),
    })
}

/// Profit expressed in units of the planned risk (`capital × risk_fraction`).
///
/// Zero when capital or the risk fraction is not positive.
pub fn r_multiple(profit: Decimal, capital: Decimal, risk_fraction: Decimal) -> Decimal {
    if capital <= Decimal::ZERO || risk_fraction <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    capital
        .checked_mul(risk_fraction)
        .and_then(|risk| profit.checked_div(risk))
        .unwrap_or(Decimal::ZERO)
}
