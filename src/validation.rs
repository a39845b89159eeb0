//! Trade form validation.
//!
//! [`validate`] reports every reason a trade form is not yet submittable,
//! in a fixed order, rather than stopping at the first one. It never blocks
//! anything itself; the caller decides what to do with the list.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Direction, TradeForm};
use crate::sizing::{PositionSizeResult, parse_field};

/// Entry and stop closer than this are treated as equal.
pub const MIN_STOP_DISTANCE: Decimal = dec!(0.00001);

/// One reason a trade form cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeFormError {
    MissingDate,
    MissingSymbol,
    MissingDirection,
    InvalidEntry,
    InvalidStopLoss,
    InvalidCapital,
    EntryEqualsStop,
    LongStopNotBelowEntry,
    LongTargetNotAboveEntry,
    ShortStopNotAboveEntry,
    ShortTargetNotBelowEntry,
    /// The sizer flagged the result invalid. Overlaps with the entry/stop
    /// checks on purpose; both may appear together.
    LotSizeUncomputable,
}

impl fmt::Display for TradeFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingDate => "Date is required",
            Self::MissingSymbol => "Symbol is required",
            Self::MissingDirection => "Choose a direction (Long/Short)",
            Self::InvalidEntry => "Entry must be a positive number",
            Self::InvalidStopLoss => "Stop Loss must be a positive number",
            Self::InvalidCapital => "Capital must be a positive number",
            Self::EntryEqualsStop => "Entry and SL must not be equal",
            Self::LongStopNotBelowEntry => "Long trade: SL must be below Entry",
            Self::LongTargetNotAboveEntry => "Long trade: TP must be above Entry",
            Self::ShortStopNotAboveEntry => "Short trade: SL must be above Entry",
            Self::ShortTargetNotBelowEntry => "Short trade: TP must be below Entry",
            Self::LotSizeUncomputable => "Entry and SL are invalid, cannot compute lot size",
        };
        f.write_str(message)
    }
}

impl std::error::Error for TradeFormError {}

/// Parsed, non-zero value of a price field.
fn nonzero(raw: &str) -> Option<Decimal> {
    parse_field(raw).filter(|v| !v.is_zero())
}

fn is_positive(raw: &str) -> bool {
    parse_field(raw).is_some_and(|v| v > Decimal::ZERO)
}

/// Validates a trade form against its sizing result.
///
/// Checks run in this order and all of them run: date, symbol, direction,
/// entry, stop-loss, capital, entry/stop distance, directional placement of
/// stop and target, and finally the sizer's validity flag. An empty list
/// means the form can be submitted.
pub fn validate(form: &TradeForm, position: &PositionSizeResult) -> Vec<TradeFormError> {
    let mut errors = Vec::new();

    if form.date.trim().is_empty() {
        errors.push(TradeFormError::MissingDate);
    }
    if form.symbol.trim().is_empty() {
        errors.push(TradeFormError::MissingSymbol);
    }
    let direction = form.direction();
    if direction.is_none() {
        errors.push(TradeFormError::MissingDirection);
    }

    if !is_positive(&form.entry) {
        errors.push(TradeFormError::InvalidEntry);
    }
    if !is_positive(&form.sl) {
        errors.push(TradeFormError::InvalidStopLoss);
    }
    if !is_positive(&form.capital) {
        errors.push(TradeFormError::InvalidCapital);
    }

    let entry = nonzero(&form.entry);
    let sl = nonzero(&form.sl);
    let tp = nonzero(&form.tp);

    if let (Some(entry), Some(sl)) = (entry, sl) {
        // A distance too large to represent is certainly not equal.
        if entry
            .checked_sub(sl)
            .is_some_and(|distance| distance.abs() < MIN_STOP_DISTANCE)
        {
            errors.push(TradeFormError::EntryEqualsStop);
        }
        if let Some(direction) = direction {
            errors.extend(directional_errors(direction, entry, sl, tp));
        }
    }

    if !position.is_valid {
        errors.push(TradeFormError::LotSizeUncomputable);
    }

    errors
}

/// Stop and target placement errors for one direction.
fn directional_errors(
    direction: Direction,
    entry: Decimal,
    sl: Decimal,
    tp: Option<Decimal>,
) -> Vec<TradeFormError> {
    let mut errors = Vec::new();
    match direction {
        Direction::Long => {
            if sl >= entry {
                errors.push(TradeFormError::LongStopNotBelowEntry);
            }
            if tp.is_some_and(|tp| tp <= entry) {
                errors.push(TradeFormError::LongTargetNotAboveEntry);
            }
        }
        Direction::Short => {
            if sl <= entry {
                errors.push(TradeFormError::ShortStopNotAboveEntry);
            }
            if tp.is_some_and(|tp| tp >= entry) {
                errors.push(TradeFormError::ShortTargetNotBelowEntry);
            }
        }
    }
    errors
}

/// Live hint for the stop-loss field.
///
/// Only produced once a direction is chosen and both entry and stop are
/// positive, so a half-typed form does not light up.
pub fn sl_hint(form: &TradeForm) -> Option<TradeFormError> {
    let direction = form.direction()?;
    let entry = parse_field(&form.entry).filter(|v| *v > Decimal::ZERO)?;
    let sl = parse_field(&form.sl).filter(|v| *v > Decimal::ZERO)?;
    match direction {
        Direction::Long if sl >= entry => Some(TradeFormError::LongStopNotBelowEntry),
        Direction::Short if sl <= entry => Some(TradeFormError::ShortStopNotAboveEntry),
        _ => None,
    }
}

/// Live hint for the take-profit field. Same gating as [`sl_hint`].
pub fn tp_hint(form: &TradeForm) -> Option<TradeFormError> {
    let direction = form.direction()?;
    let entry = parse_field(&form.entry).filter(|v| *v > Decimal::ZERO)?;
    let tp = parse_field(&form.tp).filter(|v| *v > Decimal::ZERO)?;
    match direction {
        Direction::Long if tp <= entry => Some(TradeFormError::LongTargetNotAboveEntry),
        Direction::Short if tp >= entry => Some(TradeFormError::ShortTargetNotBelowEntry),
        _ => None,
    }
}
