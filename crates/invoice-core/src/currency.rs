//! # Currency Module
//!
//! Display formatting and text parsing of dollar amounts.
//!
//! ## Fixed US Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  format_currency                                                        │
//! │                                                                         │
//! │     1234.56  ──►  "$1,234.56"     thousands separator ","              │
//! │     123.456  ──►  "$123.46"       2 digits, half away from zero        │
//! │     -100     ──►  "-$100.00"      sign before the symbol               │
//! │     NaN      ──►  "$0.00"                                              │
//! │                                                                         │
//! │  parse_currency                                                         │
//! │                                                                         │
//! │  "$1,234.56" ──►  1234.56         strips "$", "," and whitespace       │
//! │  "invalid"   ──►  0                                                     │
//! │                                                                         │
//! │  The output never depends on the host locale.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::validation::{clamp_non_negative, parse_leading_float};

/// Formatted value for anything that is not a finite number.
const ZERO_DISPLAY: &str = "$0.00";

/// Formats an amount as US dollars: `$` prefix, thousands separators,
/// exactly two fraction digits.
///
/// ## Rules
/// - NaN or infinite → `"$0.00"`
/// - Negative → `"-$..."`
/// - Rounded half away from zero to whole cents, on the amount's shortest
///   decimal form (`1.005` → `"$1.01"`, although the nearest `f64` is
///   slightly below 1.005); an amount that rounds to zero cents is
///   `"$0.00"` regardless of sign
///
/// ## Example
/// ```rust
/// use invoice_core::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$1,234.56");
/// assert_eq!(format_currency(1.005), "$1.01");
/// assert_eq!(format_currency(-100.0), "-$100.00");
/// assert_eq!(format_currency(f64::NAN), "$0.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_DISPLAY.to_string();
    }

    let cents = decimal_cents(amount.abs());
    let (whole, fraction) = cents.split_at(cents.len() - 2);

    let is_zero = cents.bytes().all(|b| b == b'0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

/// Whole cents of a finite, non-negative amount as a digit string of at
/// least three digits, rounded half up on the shortest decimal
/// representation of `amount`.
fn decimal_cents(amount: f64) -> String {
    // `{:e}` gives the shortest round-tripping digits, e.g. "1.005e0".
    let scientific = format!("{:e}", amount);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    // Number of leading digits that make up the whole cents.
    let kept = exponent + 1 + 2;

    let mut cents: Vec<u8> = if kept > 0 {
        let kept = kept as usize;
        (0..kept)
            .map(|i| digits.get(i).copied().unwrap_or(b'0'))
            .collect()
    } else {
        vec![b'0']
    };

    let round_digit = match usize::try_from(kept) {
        Ok(index) => digits.get(index).copied(),
        Err(_) => None,
    };
    if round_digit.is_some_and(|d| d >= b'5') {
        increment_digits(&mut cents);
    }

    let first_non_zero = cents.iter().position(|&d| d != b'0').unwrap_or(cents.len());
    let mut cents: String = cents[first_non_zero..].iter().map(|&d| char::from(d)).collect();
    while cents.len() < 3 {
        cents.insert(0, '0');
    }
    cents
}

/// Adds one to a big-endian ASCII digit string, growing it on carry.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Inserts `,` every three digits from the right.
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

/// Parses a currency string back to a non-negative number.
///
/// ## Rules
/// - `None` or empty → 0
/// - Every `$`, `,` and whitespace character is removed before parsing
/// - The leading numeric prefix is parsed; nothing numeric → 0
/// - Negative results clamp to 0
///
/// ## Example
/// ```rust
/// use invoice_core::parse_currency;
///
/// assert_eq!(parse_currency("$1,234.56"), 1234.56);
/// assert_eq!(parse_currency(" 1234.56 "), 1234.56);
/// assert_eq!(parse_currency(None), 0.0);
/// assert_eq!(parse_currency("invalid"), 0.0);
/// ```
pub fn parse_currency<'a>(value: impl Into<Option<&'a str>>) -> f64 {
    let Some(value) = value.into() else {
        return 0.0;
    };

    let cleaned: String = value
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    parse_leading_float(&cleaned).map_or(0.0, clamp_non_negative)
}

// =============================================================================
// Unit Tests
// =============================================================================
