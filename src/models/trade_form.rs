//! Trade entry form and the record submitted to the journal backend.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::sizing::{PositionSizeResult, PositionSizer, field_or_zero, parse_field};
use crate::validation::{TradeFormError, validate};

/// Raw text of the trade entry form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeForm {
    pub date: String,
    pub symbol: String,
    /// `"Long"`, `"Short"`, or empty until chosen.
    pub direction: String,
    pub entry: String,
    pub sl: String,
    #[serde(default)]
    pub tp: String,
    pub capital: String,
}

impl TradeForm {
    /// Returns the chosen direction, if the field holds a known one.
    pub fn direction(&self) -> Option<Direction> {
        self.direction.parse().ok()
    }

    /// Sizes the position described by this form.
    pub fn position(&self, sizer: &PositionSizer, risk_pct: Decimal) -> PositionSizeResult {
        sizer.size(
            &self.entry,
            &self.sl,
            &self.tp,
            &self.capital,
            risk_pct,
            &self.symbol,
        )
    }

    /// Builds the backend record once the form validates cleanly.
    ///
    /// # Errors
    ///
    /// Returns every validation failure when the form is not submittable.
    pub fn submission(&self, position: &PositionSizeResult) -> Result<NewTrade, Vec<TradeFormError>> {
        let errors = validate(self, position);
        if !errors.is_empty() {
            return Err(errors);
        }
        // A clean form guarantees a direction; the fallback is unreachable.
        let direction = self.direction().ok_or_else(|| vec![TradeFormError::MissingDirection])?;

        Ok(NewTrade {
            date: self.date.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            direction,
            entry: field_or_zero(&self.entry),
            sl: field_or_zero(&self.sl),
            tp: parse_field(&self.tp).filter(|tp| !tp.is_zero()),
            capital: field_or_zero(&self.capital),
            rr: position
                .actual_rr
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        })
    }
}

/// Trade record handed to the journal backend.
///
/// Only the fields this crate derives or validates; free-text journal
/// fields are attached by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrade {
    pub date: String,
    pub symbol: String,
    pub direction: Direction,
    pub entry: Decimal,
    pub sl: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp: Option<Decimal>,
    pub capital: Decimal,
    /// Planned reward-to-risk ratio, two decimals.
    pub rr: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn long_form() -> TradeForm {
        TradeForm {
            date: "2025-03-14".to_string(),
            symbol: "eurusd".to_string(),
            direction: "Long".to_string(),
            entry: "1.10000".to_string(),
            sl: "1.09500".to_string(),
            tp: "1.11000".to_string(),
            capital: "100000".to_string(),
        }
    }

    #[test]
    fn direction_parses_known_values_only() {
        assert_eq!(long_form().direction(), Some(Direction::Long));
        let form = TradeForm {
            direction: "sideways".to_string(),
            ..long_form()
        };
        assert_eq!(form.direction(), None);
    }

    #[test]
    fn submission_carries_rr() {
        let form = long_form();
        let position = form.position(&PositionSizer::default(), dec!(1));
        let trade = form.submission(&position).unwrap();
        assert_eq!(trade.direction, Direction::Long);
        assert_eq!(trade.entry, dec!(1.10000));
        assert_eq!(trade.tp, Some(dec!(1.11000)));
        assert_eq!(trade.rr, dec!(2));
    }

    #[test]
    fn submission_rejects_invalid_form() {
        let form = TradeForm {
            sl: "1.10500".to_string(),
            ..long_form()
        };
        let position = form.position(&PositionSizer::default(), dec!(1));
        let errors = form.submission(&position).unwrap_err();
        assert!(errors.contains(&TradeFormError::LongStopNotBelowEntry));
    }

    #[test]
    fn new_trade_omits_missing_tp() {
        let form = TradeForm {
            tp: String::new(),
            ..long_form()
        };
        let position = form.position(&PositionSizer::default(), dec!(1));
        let trade = form.submission(&position).unwrap();
        let json = serde_json::to_value(&trade).unwrap();
        assert!(json.get("tp").is_none());
        assert_eq!(json["direction"], "Long");
        assert_eq!(json["rr"], "0");
    }
}
