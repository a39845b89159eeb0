//! Trade form validation over the public API.

mod common;

use rust_decimal_macros::dec;

use journal_calc::models::{Direction, TradeForm};
use journal_calc::validation::{TradeFormError, sl_hint, tp_hint, validate};

use common::{eurusd_long, form, size};

fn check(form: &TradeForm) -> Vec<TradeFormError> {
    validate(form, &size(form))
}

#[test]
fn test_complete_long_is_clean() {
    assert!(check(&eurusd_long()).is_empty());
}

#[test]
fn test_empty_form_lists_every_problem_in_order() {
    let errors = check(&TradeForm::default());
    assert_eq!(
        errors,
        vec![
            TradeFormError::MissingDate,
            TradeFormError::MissingSymbol,
            TradeFormError::MissingDirection,
            TradeFormError::InvalidEntry,
            TradeFormError::InvalidStopLoss,
            TradeFormError::InvalidCapital,
            TradeFormError::LotSizeUncomputable,
        ]
    );
}

#[test]
fn test_long_with_stop_above_entry() {
    let errors = check(&form("Long", "1.1000", "1.1050", "1.1200"));
    assert_eq!(errors, vec![TradeFormError::LongStopNotBelowEntry]);
    assert_eq!(errors[0].to_string(), "Long trade: SL must be below Entry");
}

#[test]
fn test_long_with_target_below_entry() {
    let errors = check(&form("Long", "1.1000", "1.0950", "1.0900"));
    assert_eq!(errors, vec![TradeFormError::LongTargetNotAboveEntry]);
}

#[test]
fn test_short_mirrors_long() {
    assert!(check(&form("Short", "1.1000", "1.1050", "1.0900")).is_empty());

    let errors = check(&form("Short", "1.1000", "1.0950", "1.1100"));
    assert_eq!(
        errors,
        vec![
            TradeFormError::ShortStopNotAboveEntry,
            TradeFormError::ShortTargetNotBelowEntry,
        ]
    );
    assert_eq!(errors[1].to_string(), "Short trade: TP must be below Entry");
}

#[test]
fn test_take_profit_is_optional() {
    assert!(check(&form("Long", "1.1000", "1.0950", "")).is_empty());
    assert!(check(&form("Short", "1.1000", "1.1050", "0")).is_empty());
}

#[test]
fn test_equal_entry_and_stop() {
    let errors = check(&form("Long", "1.1000", "1.1000", ""));
    assert_eq!(
        errors,
        vec![
            TradeFormError::EntryEqualsStop,
            TradeFormError::LongStopNotBelowEntry,
            TradeFormError::LotSizeUncomputable,
        ]
    );
}

#[test]
fn test_prices_at_decimal_limits_do_not_panic() {
    let trade = form(
        "Long",
        "79228162514264337593543950335",
        "-79228162514264337593543950335",
        "",
    );
    let position = size(&trade);

    assert!(!position.is_valid);
    let errors = validate(&trade, &position);
    assert!(!errors.contains(&TradeFormError::EntryEqualsStop));
    assert!(errors.contains(&TradeFormError::InvalidStopLoss));
    assert!(errors.contains(&TradeFormError::LotSizeUncomputable));
}

#[test]
fn test_capital_must_be_positive_even_though_sizing_defaults_it() {
    let mut trade = eurusd_long();
    trade.capital = "-100".to_string();
    let position = size(&trade);

    assert!(position.is_valid);
    assert_eq!(validate(&trade, &position), vec![TradeFormError::InvalidCapital]);
}

#[test]
fn test_unknown_direction_text_is_missing() {
    let errors = check(&form("long", "1.1000", "1.0950", ""));
    assert_eq!(errors, vec![TradeFormError::MissingDirection]);
}

#[test]
fn test_hints_follow_direction() {
    let trade = form("Short", "1.1000", "1.0950", "1.1100");
    assert_eq!(sl_hint(&trade), Some(TradeFormError::ShortStopNotAboveEntry));
    assert_eq!(tp_hint(&trade), Some(TradeFormError::ShortTargetNotBelowEntry));

    let trade = form("", "1.1000", "1.0950", "1.1100");
    assert_eq!(sl_hint(&trade), None);
    assert_eq!(tp_hint(&trade), None);
}

#[test]
fn test_submission_builds_backend_record() {
    let trade = eurusd_long();
    let record = trade.submission(&size(&trade)).unwrap();

    assert_eq!(record.direction, Direction::Long);
    assert_eq!(record.entry, dec!(1.1));
    assert_eq!(record.tp, Some(dec!(1.11)));
    assert_eq!(record.capital, dec!(100000));
    assert_eq!(record.rr, dec!(2));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["direction"], "Long");
    assert_eq!(json["symbol"], "EURUSD");
}
