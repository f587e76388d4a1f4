//! pt-BR number formatting for display

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as `R$ 1.234.567,89`.
///
/// Rounds to cents (midpoint away from zero). Negative amounts get a leading
/// `-` before the symbol.
#[must_use]
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol} {},{frac_part}", group_thousands(int_part))
}

/// Format a count with `.` thousands separators (`12.500`)
#[must_use]
pub fn format_integer(value: u32) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
