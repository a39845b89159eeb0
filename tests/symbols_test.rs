//! Symbol normalization and resolution tests.

use rust_decimal_macros::dec;

use journal_calc::symbols::{DEFAULT_SYMBOL_META, UnitLabel, normalize_symbol, resolve};

#[test]
fn test_resolution_is_total() {
    for raw in ["", "   ", "???", "GER40", "eur", "Ω", "123456", "EURUSDX"] {
        assert_eq!(resolve(raw), DEFAULT_SYMBOL_META, "{raw:?}");
    }
}

#[test]
fn test_gold_spellings_resolve_identically() {
    let gold = resolve("XAUUSD");
    for raw in ["xauusd", "xau/usd", "Xau-Usd", " XAU_USD ", "xau usd"] {
        assert_eq!(normalize_symbol(raw), "XAU/USD", "{raw:?}");
        assert_eq!(resolve(raw), gold, "{raw:?}");
    }
    assert_eq!(gold.tick_size, dec!(0.01));
    assert_eq!(gold.unit_label, UnitLabel::Points);
}

#[test]
fn test_six_letter_pairs_are_split() {
    assert_eq!(normalize_symbol("gbpusd"), "GBP/USD");
    assert_eq!(normalize_symbol("USDJPY"), "USD/JPY");
    // Unknown pairs are split too, but still fall back to the default.
    assert_eq!(normalize_symbol("chfsek"), "CHF/SEK");
    assert_eq!(resolve("chfsek"), DEFAULT_SYMBOL_META);
}

#[test]
fn test_non_pair_keys_are_not_split() {
    assert_eq!(normalize_symbol("nas100"), "NAS100");
    assert_eq!(normalize_symbol("eurusdx"), "EURUSDX");
    assert_eq!(normalize_symbol("eur"), "EUR");
}

#[test]
fn test_index_aliases_share_metadata() {
    let us30 = resolve("US30");
    assert_eq!(resolve("dow"), us30);
    assert_eq!(resolve("dj30"), us30);
    assert_eq!(resolve("us100"), resolve("NAS100"));
    assert_eq!(us30.tick_size, dec!(1));
}

#[test]
fn test_jpy_pair_uses_two_decimal_pips() {
    let jpy = resolve("usd/jpy");
    assert_eq!(jpy.tick_size, dec!(0.01));
    assert_eq!(jpy.tick_value, dec!(9.5));
    assert_eq!(jpy.unit_label, UnitLabel::Pips);
}

#[test]
fn test_normalization_is_idempotent() {
    for raw in ["xauusd", "btc-usd", "eur/usd", "us100", "dow", "ger40"] {
        let once = normalize_symbol(raw);
        assert_eq!(normalize_symbol(&once), once, "{raw:?}");
    }
}
