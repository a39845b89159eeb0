//! One-shot trade report printed by `journal-calc calc`.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TradeForm;
use crate::outcome::{OutcomeParams, profit_and_pct, r_multiple};
use crate::sizing::{PositionSizeResult, PositionSizer, field_or_zero};
use crate::symbols::normalize_symbol;
use crate::validation::validate;

/// Realized result of a closed trade, for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeReport {
    pub profit: Decimal,
    pub profit_pct: Decimal,
    /// Profit in units of the planned risk, two decimals.
    pub r_multiple: Decimal,
}

/// Sizing, validation problems and optional outcome of one trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalcReport {
    /// Canonical symbol key.
    pub symbol: String,
    pub position: PositionSizeResult,
    /// Validation messages; empty when validation was not requested.
    pub errors: Vec<String>,
    pub outcome: Option<OutcomeReport>,
}

impl CalcReport {
    /// Sizes `form`, validates it when `check_form` is set, and computes the
    /// closed-trade outcome when an exit price is given.
    pub fn new(
        sizer: &PositionSizer,
        form: &TradeForm,
        risk_pct: Decimal,
        check_form: bool,
        exit: Option<Decimal>,
    ) -> Self {
        let position = form.position(sizer, risk_pct);
        let errors = if check_form {
            validate(form, &position)
                .iter()
                .map(ToString::to_string)
                .collect()
        } else {
            Vec::new()
        };
        let outcome = exit.map(|exit| closed_outcome(sizer, form, exit));

        Self {
            symbol: normalize_symbol(&form.symbol),
            position,
            errors,
            outcome,
        }
    }

    /// Whether the trade sized cleanly and passed validation.
    pub fn is_success(&self) -> bool {
        self.position.is_valid && self.errors.is_empty()
    }
}

/// Outcome of the trade closed at `exit`, on the form's capital or the
/// sizer's default.
fn closed_outcome(sizer: &PositionSizer, form: &TradeForm, exit: Decimal) -> OutcomeReport {
    let params = OutcomeParams::default();
    let capital = match field_or_zero(&form.capital) {
        c if c > Decimal::ZERO => c,
        _ => sizer.default_capital(),
    };
    let outcome = profit_and_pct(
        Some(exit),
        field_or_zero(&form.entry),
        form.direction(),
        capital,
        field_or_zero(&form.sl),
        &params,
    );
    OutcomeReport {
        profit: outcome.profit,
        profit_pct: outcome.profit_pct,
        r_multiple: r_multiple(outcome.profit, capital, params.risk_fraction).round_dp(2),
    }
}

impl fmt::Display for CalcReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = &self.position;
        writeln!(f, "symbol:        {}", self.symbol)?;
        writeln!(f, "risk amount:   {}", position.risk_amount)?;
        writeln!(f, "stop distance: {} {}", position.stop_ticks, position.unit_label)?;
        writeln!(f, "lot size:      {}", position.lot_size)?;
        writeln!(f, "realized risk: {}", position.realized_risk)?;
        writeln!(f, "r:r:           {}", position.actual_rr.round_dp(2))?;
        if let Some(note) = position.lot_note {
            writeln!(f, "note:          {note}")?;
        }
        if !position.is_valid {
            writeln!(f, "invalid: entry and stop must be distinct prices")?;
        }
        for error in &self.errors {
            writeln!(f, "error: {error}")?;
        }
        if let Some(outcome) = self.outcome {
            writeln!(f, "profit:        {} ({}%)", outcome.profit, outcome.profit_pct)?;
            writeln!(f, "r-multiple:    {}", outcome.r_multiple)?;
        }
        Ok(())
    }
}
