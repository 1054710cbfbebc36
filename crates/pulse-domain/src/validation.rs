//! Boundary validation for user-entered amounts.

/// Upper bound accepted for a single entry (one trillion minor units).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Returns `true` for amounts a transaction may carry: positive and below [`MAX_AMOUNT`].
pub fn is_valid_amount(amount: i64) -> bool {
    amount > 0 && amount <= MAX_AMOUNT
}

/// Parses user input such as `"12,500"` or `"12.50"` into minor units for a
/// currency with `precision` decimal places. Grouping separators are ignored;
/// more decimals than the currency carries are rejected, as is anything that
/// is not a valid amount.
pub fn parse_minor_units(raw: &str, precision: u32) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_' | ' '))
        .collect();
    let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    let is_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !is_digits(whole)
        || !is_digits(fraction)
        || fraction.len() > precision as usize
    {
        return None;
    }
    let scale = 10_i64.checked_pow(precision)?;
    let whole = if whole.is_empty() { 0 } else { whole.parse::<i64>().ok()? };
    let fraction = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<width$}", width = precision as usize)
            .parse::<i64>()
            .ok()?
    };
    whole
        .checked_mul(scale)?
        .checked_add(fraction)
        .filter(|value| is_valid_amount(*value))
}
