//! Display formatting shared by the report views.
//!
//! Downstream renderers compare these strings verbatim, so the rules here are
//! fixed: durations are `"Xh Ymin"` with zero parts dropped, money is pt-BR
//! BRL with a non-breaking space after the symbol.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};


/// Non-breaking space emitted between `R$` and the amount.
const NBSP: char = '\u{a0}';

/// Formats a non-negative minute count.
///
/// # Examples
///
/// ```
/// use ponto_engine::format::format_minutes;
///
/// assert_eq!(format_minutes(125), "2h 5min");
/// assert_eq!(format_minutes(60), "1h");
/// assert_eq!(format_minutes(45), "45min");
/// assert_eq!(format_minutes(0), "0min");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        format!("{}min", mins)
    } else if mins == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}min", hours, mins)
    }
}

/// Formats a minute balance, prefixing `-` when negative.
///
/// ```
/// use ponto_engine::format::format_signed_minutes;
///
/// assert_eq!(format_signed_minutes(-125), "-2h 5min");
/// assert_eq!(format_signed_minutes(90), "1h 30min");
/// ```
pub fn format_signed_minutes(minutes: i64) -> String {
    if minutes < 0 {
        format!("-{}", format_minutes(minutes.saturating_abs()))
    } else {
        format_minutes(minutes)
    }
}

/// Formats fractional hours as a duration, rounded to the nearest minute.
///
/// Hour figures are stored to two decimals, which is within half a minute
/// of the exact value, so whole-minute totals display unchanged.
///
/// ```
/// use ponto_engine::format::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(33, 2)), "20min");
/// assert_eq!(format_hours(Decimal::new(733, 2)), "7h 20min");
/// ```
pub fn format_hours(hours: Decimal) -> String {
    let minutes = (hours * Decimal::from(60))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    format_signed_minutes(minutes)
}

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// ```
/// use ponto_engine::format::format_currency_brl;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency_brl(Decimal::new(123456, 2)), "R$\u{a0}1.234,56");
/// assert_eq!(format_currency_brl(Decimal::new(-5, 1)), "-R$\u{a0}0,50");
/// ```
pub fn format_currency_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{}R${}{},{}",
        sign,
        NBSP,
        group_thousands(integer),
        fraction
    )
}

/// Formats a percentage with one decimal and a decimal comma, e.g. `95,5%`.
///
/// ```
/// use ponto_engine::format::format_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_percentage(Decimal::new(9545, 2)), "95,5%");
/// assert_eq!(format_percentage(Decimal::new(100, 0)), "100,0%");
/// ```
pub fn format_percentage(rate: Decimal) -> String {
    let rounded = rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded).replace('.', ",")
}

/// Inserts `.` between every group of three integer digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}
