//! Display formatting for on-chain numeric values.
//!
//! Mirrors the dashboard's number formatting: compact K/M/B notation for
//! metric tiles, grouped USD amounts for table cells, fixed-digit percents.
//! Rounding goes through `rust_decimal` so cells never show float noise.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Rendered when both the existence and the detail lookup errored.
pub const SENTINEL: &str = "?";

/// Rendered for values that are simply not available (no provider, no loan).
pub const EMPTY: &str = "-";

/// Insert thousands separators into a non-negative integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Round to `dp` decimals and trim trailing zeros ("1.20" → "1.2", "3.00" → "3").
fn rounded_trimmed(value: f64, dp: u32) -> String {
    let d = Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
    d.round_dp(dp).normalize().to_string()
}

/// Compact notation with K/M/B suffix: `12_345_678.0` → "12.35M".
///
/// Used by the analytics metric tiles.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("{}{}", rounded_trimmed(scaled, 2), suffix)
}

/// Whole-dollar USD amount with thousands separators: "$1,234,567".
///
/// Sub-dollar amounts keep two decimals so dust is still visible.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs < 1.0 && abs > 0.0 {
        return format!("{sign}${}", rounded_trimmed(abs, 2));
    }
    let whole = Decimal::from_f64(abs)
        .unwrap_or(Decimal::ZERO)
        .round()
        .to_string();
    format!("{sign}${}", group_thousands(&whole))
}

/// Percent with a fixed number of fraction digits: "99.99%".
pub fn format_percent(value: f64, fraction_digits: u32) -> String {
    let d = Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
    format!(
        "{:.prec$}%",
        d.round_dp(fraction_digits),
        prec = fraction_digits as usize
    )
}

/// Format an optional numeric cell, rendering `EMPTY` for missing data.
pub fn format_cell(value: Option<f64>, f: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| EMPTY.to_string(), f)
}
