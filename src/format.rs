//! Display formatting for dashboard figures
//!
//! Numbers are rendered the way an en-US locale shows them: comma thousands
//! separators and a leading minus sign. Missing values render as `N/A`.
//! Rounding goes through `rust_decimal` so ties round away from zero
//! (`2.125` shows as `2.13`).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "N/A";

/// Colour hint for a formatted percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Zero or positive change
    Success,
    /// Negative change
    Error,
    /// No value
    Default,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "error",
            Tone::Default => "default",
        }
    }
}

/// A signed percentage ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageDisplay {
    pub value: String,
    pub tone: Tone,
}

/// Formats a USD price
///
/// Prices below one dollar keep six fraction digits, others two. Missing,
/// zero and NaN prices render as `N/A`.
pub fn format_price(price: Option<f64>) -> String {
    match price.filter(|p| *p != 0.0 && !p.is_nan()) {
        Some(p) => {
            let digits = if p < 1.0 { 6 } else { 2 };
            let sign = if p < 0.0 { "-" } else { "" };
            format!("{}${}", sign, group_decimal(p.abs(), digits, digits))
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a coin supply with thousands separators
pub fn format_supply(supply: Option<f64>) -> String {
    match supply.filter(|s| *s != 0.0 && !s.is_nan()) {
        Some(s) => format_plain(s),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Abbreviates large numbers with a T/B/M/K suffix and two decimals
///
/// Values below one thousand (including all negatives) are printed in full.
/// Non-finite values render as `N/A`.
pub fn format_large_number(num: f64) -> String {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    if !num.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    SCALES
        .iter()
        .find(|(scale, _)| num >= *scale)
        .map(|(scale, suffix)| format!("{}{}", fixed(num / scale, 2), suffix))
        .unwrap_or_else(|| format_plain(num))
}

/// Formats a percentage change with an explicit sign and a colour hint
pub fn format_percentage(percentage: Option<f64>) -> PercentageDisplay {
    match percentage.filter(|p| !p.is_nan()) {
        Some(p) if p >= 0.0 => PercentageDisplay {
            value: format!("+{}%", fixed(p, 2)),
            tone: Tone::Success,
        },
        Some(p) => PercentageDisplay {
            value: format!("{}%", fixed(p, 2)),
            tone: Tone::Error,
        },
        None => PercentageDisplay {
            value: NOT_AVAILABLE.to_string(),
            tone: Tone::Default,
        },
    }
}

/// Rounds a percentage to `decimals` places, 0 when missing
pub fn format_percentage_value(percentage: Option<f64>, decimals: usize) -> f64 {
    percentage
        .filter(|p| !p.is_nan())
        .and_then(|p| fixed(p, decimals).parse().ok())
        .unwrap_or(0.0)
}

/// Formats a percentage with fixed decimals and no sign or suffix
pub fn format_percentage_string(percentage: Option<f64>, decimals: usize) -> String {
    match percentage.filter(|p| !p.is_nan()) {
        Some(p) => fixed(p, decimals),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Plain en-US number: grouping and at most three fraction digits
fn format_plain(value: f64) -> String {
    let body = group_decimal(value.abs(), 0, 3);
    if value < 0.0 && body.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        format!("-{}", body)
    } else {
        body
    }
}

/// Renders a non-negative value with grouped integer digits
///
/// Rounds to `max_frac` fraction digits, then drops trailing zeros down to
/// `min_frac`.
fn group_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    let rounded = fixed(value, max_frac);
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let grouped = group_thousands(int_part);
    if frac.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac)
    }
}

/// Fixed-point rendering with ties rounded away from zero
///
/// Falls back to the float formatter for values outside the decimal range.
fn fixed(value: f64, decimals: usize) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded =
                d.round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", decimals, rounded)
        }
        None => format!("{:.*}", decimals, value),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(70187.0)), "$70,187.00");
        assert_eq!(format_price(Some(1234567.891)), "$1,234,567.89");
        assert_eq!(format_price(Some(0.123456789)), "$0.123457");
        assert_eq!(format_price(Some(1.0)), "$1.00");
        assert_eq!(format_price(Some(-5.5)), "-$5.500000");
        assert_eq!(format_price(Some(0.0)), "N/A");
        assert_eq!(format_price(Some(f64::NAN)), "N/A");
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn test_format_supply() {
        assert_eq!(format_supply(Some(19675987.0)), "19,675,987");
        assert_eq!(format_supply(Some(1234.5)), "1,234.5");
        assert_eq!(format_supply(Some(0.0)), "N/A");
        assert_eq!(format_supply(None), "N/A");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(1.5e12), "1.50T");
        assert_eq!(format_large_number(2_340_000_000.0), "2.34B");
        assert_eq!(format_large_number(20_154_184_933.0), "20.15B");
        assert_eq!(format_large_number(7_500_000.0), "7.50M");
        assert_eq!(format_large_number(12_300.0), "12.30K");
        assert_eq!(format_large_number(999.5), "999.5");
        assert_eq!(format_large_number(0.12345), "0.123");
        assert_eq!(format_large_number(-1_500_000.0), "-1,500,000");
        assert_eq!(format_large_number(0.0), "0");
        assert_eq!(format_large_number(f64::INFINITY), "N/A");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(
            format_percentage(Some(3.12502)),
            PercentageDisplay {
                value: "+3.13%".to_string(),
                tone: Tone::Success
            }
        );
        let down = format_percentage(Some(-4.77063));
        assert_eq!(down.value, "-4.77%");
        assert_eq!(down.tone, Tone::Error);
        assert_eq!(format_percentage(Some(0.0)).value, "+0.00%");

        let missing = format_percentage(None);
        assert_eq!(missing.value, "N/A");
        assert_eq!(missing.tone.as_str(), "default");
    }

    #[test]
    fn test_format_percentage_value() {
        assert_eq!(format_percentage_value(Some(3.14159), 2), 3.14);
        assert_eq!(format_percentage_value(Some(-12.3456), 1), -12.3);
        assert_eq!(format_percentage_value(None, 2), 0.0);
        assert_eq!(format_percentage_value(Some(f64::NAN), 2), 0.0);
    }

    #[test]
    fn test_format_percentage_string() {
        assert_eq!(format_percentage_string(Some(3.14159), 3), "3.142");
        assert_eq!(format_percentage_string(Some(-2.0), 2), "-2.00");
        assert_eq!(format_percentage_string(None, 2), "N/A");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_price(Some(2.125)), "$2.13");
        assert_eq!(format_large_number(1125.0), "1.13K");
        assert_eq!(format_percentage(Some(1.125)).value, "+1.13%");
        assert_eq!(format_percentage(Some(-1.125)).value, "-1.13%");
        assert_eq!(format_percentage_value(Some(0.125), 2), 0.13);
        assert_eq!(format_percentage_string(Some(0.125), 2), "0.13");
        assert_eq!(format_percentage_string(Some(2.5), 0), "3");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
