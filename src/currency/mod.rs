//! Rendering of minor-unit amounts for terminal output.

use pulse_domain::parse_minor_units;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> &str {
        symbol_for(self.as_str())
    }

    pub fn minor_units(&self) -> u32 {
        minor_units_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("KRW")
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "KRW" => "₩",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => code,
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "KRW" | "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats an amount stored in minor units, e.g. `-₩1,234,000` or `$12.50`.
pub fn format_amount(amount: i64, code: &CurrencyCode) -> String {
    let precision = code.minor_units();
    let scale = 10_u64.pow(precision);
    let magnitude = amount.unsigned_abs();
    let mut body = group_digits(&(magnitude / scale).to_string(), ',');
    if precision > 0 {
        body.push('.');
        body.push_str(&format!(
            "{:0width$}",
            magnitude % scale,
            width = precision as usize
        ));
    }
    let sign = if amount < 0 { "-" } else { "" };
    let symbol = code.symbol();
    if symbol == code.as_str() {
        format!("{sign}{body} {symbol}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

/// Reads user input written in major units (`12.50` for USD, `12,500` for
/// KRW) into the minor units [`format_amount`] renders.
pub fn parse_amount(raw: &str, code: &CurrencyCode) -> Option<i64> {
    parse_minor_units(raw, code.minor_units())
}

/// One-decimal percentage, or `-` when there is no budget to compare with.
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) => format!("{value:.1}%"),
        None => "-".into(),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
