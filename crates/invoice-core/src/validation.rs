//! # Validation Module
//!
//! Input normalization for the invoice form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Normalize, Never Reject                                │
//! │                                                                         │
//! │  User types into "Unit Price":  "" → "1" → "1." → "1.5" → "-1.5"       │
//! │                                  │     │     │      │       │           │
//! │  validate_number_str ─────────►  0     1     1     1.5      0           │
//! │                                                                         │
//! │  Partial keystrokes are a normal state of a live form, so every        │
//! │  function here is total: bad input becomes 0, never an error.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::validation::{validate_line_item, validate_number_str};
//! use invoice_core::RawLineItem;
//!
//! assert_eq!(validate_number_str("100.50"), 100.5);
//! assert_eq!(validate_number_str("-50"), 0.0);
//!
//! let item = validate_line_item(RawLineItem::for_id("item-1").unit_price(-5.0));
//! assert_eq!(item.unit_price(), 0.0);
//! assert_eq!(item.service(), "");
//! ```

use crate::types::{LineItem, RawLineItem, RawNumber};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Clamps a number to `>= 0`. NaN and infinities become 0.
///
/// ## Example
/// ```rust
/// use invoice_core::validation::clamp_non_negative;
///
/// assert_eq!(clamp_non_negative(12.5), 12.5);
/// assert_eq!(clamp_non_negative(-3.0), 0.0);
/// assert_eq!(clamp_non_negative(f64::NAN), 0.0);
/// ```
#[inline]
pub fn clamp_non_negative(value: f64) -> f64 {
    // Also maps -0.0 to 0.0.
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Normalizes a raw numeric input to a non-negative number.
///
/// ## Rules
/// - Missing input → 0
/// - Strings: parsed from the leading numeric prefix (see
///   [`validate_number_str`]); nothing numeric → 0
/// - Non-numeric JSON values (bool, object, array) → 0
/// - Negative, NaN, infinite → 0
/// - No upper bound
pub fn validate_number(raw: Option<&RawNumber>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawNumber::Number(value)) => clamp_non_negative(*value),
        Some(RawNumber::Text(text)) => validate_number_str(text),
        Some(RawNumber::Other(_)) => 0.0,
    }
}

/// Normalizes the text of a numeric input field.
///
/// Leading whitespace is skipped and the longest decimal prefix is used, so
/// `"12abc"` reads as 12 and `"1."` as 1. Empty or non-numeric text is 0.
///
/// ## Example
/// ```rust
/// use invoice_core::validation::validate_number_str;
///
/// assert_eq!(validate_number_str("100"), 100.0);
/// assert_eq!(validate_number_str("  2.5kg"), 2.5);
/// assert_eq!(validate_number_str(""), 0.0);
/// assert_eq!(validate_number_str("invalid"), 0.0);
/// ```
pub fn validate_number_str(text: &str) -> f64 {
    parse_leading_float(text).map_or(0.0, clamp_non_negative)
}

/// Parses the longest `[+-]digits[.digits][e[+-]digits]` prefix of `input`
/// after leading whitespace. Returns `None` when there is no digit to read.
pub(crate) fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = digits_from(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

// =============================================================================
// Line Item Validator
// =============================================================================

/// Validates a raw line item into a full replacement record.
///
/// ## Rules
/// - `service`: missing → `""`
/// - `unit_price`, `quantity`: via [`validate_number`] (missing → 0, clamped `>= 0`)
/// - `id`: passed through (missing → `""`; the form assigns ids)
///
/// Idempotent: validating an already validated item returns it unchanged.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Line Item Row: user edits quantity                                     │
/// │                                                                         │
/// │  { id: "item-1", service: "Drop-in Visit", unitPrice: 22.5,            │
/// │    quantity: "-2" }                                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_line_item() ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  LineItem { id: "item-1", service: "Drop-in Visit",                    │
/// │             unit_price: 22.5, quantity: 0 }  → replaces old row        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_line_item(item: RawLineItem) -> LineItem {
    let unit_price = validate_number(item.unit_price.as_ref());
    let quantity = validate_number(item.quantity.as_ref());

    LineItem::new(
        item.id.unwrap_or_default(),
        item.service.unwrap_or_default(),
        unit_price,
        quantity,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_number_positive() {
        assert_eq!(validate_number(Some(&RawNumber::Number(100.0))), 100.0);
        assert_eq!(validate_number(Some(&RawNumber::from("100"))), 100.0);
        assert_eq!(validate_number(Some(&RawNumber::from("100.50"))), 100.5);
    }

    #[test]
    fn test_validate_number_empty_or_invalid() {
        assert_eq!(validate_number(None), 0.0);
        assert_eq!(validate_number(Some(&RawNumber::from(""))), 0.0);
        assert_eq!(validate_number(Some(&RawNumber::from("invalid"))), 0.0);
        assert_eq!(validate_number(Some(&RawNumber::Number(f64::NAN))), 0.0);
        assert_eq!(
            validate_number(Some(&RawNumber::Other(serde_json::json!({"a": 1})))),
            0.0
        );
    }

    #[test]
    fn test_validate_number_minimum_zero() {
        assert_eq!(validate_number(Some(&RawNumber::Number(-100.0))), 0.0);
        assert_eq!(validate_number(Some(&RawNumber::from("-50"))), 0.0);
    }

    #[test]
    fn test_validate_number_no_maximum() {
        assert_eq!(validate_number_str("1e9"), 1_000_000_000.0);
        assert_eq!(validate_number(Some(&RawNumber::Number(1e15))), 1e15);
    }

    #[test]
    fn test_parse_leading_float_prefixes() {
        assert_eq!(parse_leading_float("12abc"), Some(12.0));
        assert_eq!(parse_leading_float("  3.25"), Some(3.25));
        assert_eq!(parse_leading_float("1."), Some(1.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("-.5"), Some(-0.5));
        assert_eq!(parse_leading_float("+7"), Some(7.0));
        assert_eq!(parse_leading_float("2e3x"), Some(2000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("1,234"), Some(1.0));
    }

    #[test]
    fn test_parse_leading_float_rejects() {
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("   "), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("$5"), None);
    }

    #[test]
    fn test_validate_line_item_valid_passes_through() {
        let raw = RawLineItem::for_id("test")
            .service("Test Service")
            .unit_price(10.5)
            .quantity(2.0);

        let item = validate_line_item(raw);
        assert_eq!(item, LineItem::new("test", "Test Service", 10.5, 2.0));
    }

    #[test]
    fn test_validate_line_item_negative_values() {
        let raw = RawLineItem::for_id("test")
            .service("")
            .unit_price(-5.0)
            .quantity(-2.0);

        let item = validate_line_item(raw);
        assert_eq!(item.service(), "");
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn test_validate_line_item_missing_values() {
        let item = validate_line_item(RawLineItem::for_id("test"));
        assert_eq!(item.id(), "test");
        assert_eq!(item.service(), "");
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn test_validate_line_item_string_numbers() {
        let raw = RawLineItem::for_id("test").unit_price("18.00").quantity("3");
        let item = validate_line_item(raw);
        assert_eq!(item.unit_price(), 18.0);
        assert_eq!(item.quantity(), 3.0);
    }

    #[test]
    fn test_validate_line_item_idempotent() {
        let once = validate_line_item(RawLineItem::for_id("x").unit_price("-1").quantity(4.5));
        let twice = validate_line_item(once.clone().into());
        assert_eq!(once, twice);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn raw_number() -> impl Strategy<Value = Option<RawNumber>> {
            prop_oneof![
                Just(None),
                any::<f64>().prop_map(|n| Some(RawNumber::Number(n))),
                "[-+ ]?[0-9]{0,6}(\\.[0-9]{0,4})?[a-z$]{0,3}".prop_map(|s| Some(RawNumber::Text(s))),
            ]
        }

        proptest! {
            /// Property: validation is idempotent.
            #[test]
            fn validate_line_item_is_idempotent(
                id in "[a-z0-9-]{0,12}",
                service in proptest::option::of("[A-Za-z ]{0,20}"),
                unit_price in raw_number(),
                quantity in raw_number(),
            ) {
                let raw = RawLineItem { id: Some(id), service, unit_price, quantity };
                let once = validate_line_item(raw);
                let twice = validate_line_item(once.clone().into());
                prop_assert_eq!(once, twice);
            }

            /// Property: normalized numbers are always finite and non-negative.
            #[test]
            fn validate_number_is_non_negative(raw in raw_number()) {
                let value = validate_number(raw.as_ref());
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }
    }
}
