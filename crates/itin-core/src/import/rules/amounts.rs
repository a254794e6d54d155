//! Amount parsing and cost splitting.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// Parse an amount such as "1,234.56" or "$ 302".
///
/// Thousands-separator commas, whitespace and currency symbols are dropped.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// [`parse_amount`], or zero when the text is not a number.
pub fn amount_or_zero(s: &str) -> Decimal {
    parse_amount(s).unwrap_or_else(|| {
        warn!("Unreadable amount {:?}, using 0", s);
        Decimal::ZERO
    })
}

/// Split `total` into `parts` shares rounded to cents; the last share takes
/// the rounding residual so the shares sum to `total` exactly.
pub fn split_evenly(total: Decimal, parts: usize) -> Vec<Decimal> {
    if parts == 0 {
        return Vec::new();
    }

    let share = (total / Decimal::from(parts)).round_dp(2);
    let mut shares = vec![share; parts - 1];
    let assigned: Decimal = shares.iter().copied().sum();
    shares.push(total - assigned);
    shares
}

/// ISO code for a currency symbol or code as printed on a receipt.
pub fn currency_from_symbol(symbol: &str) -> Option<&'static str> {
    match symbol.trim().to_uppercase().as_str() {
        "$" | "US$" | "USD" => Some("USD"),
        "€" | "EUR" => Some("EUR"),
        "£" | "GBP" => Some("GBP"),
        "CHF" | "FR." => Some("CHF"),
        _ => None,
    }
}
