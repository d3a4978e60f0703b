//! # Domain Types
//!
//! Value types shared by the calculation core, the store and the form.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  validate   ┌─────────────────┐                   │
//! │  │  RawLineItem    │ ──────────► │    LineItem     │                   │
//! │  │  ─────────────  │             │  ─────────────  │                   │
//! │  │  id?            │             │  id             │                   │
//! │  │  service?       │             │  service        │                   │
//! │  │  unitPrice?     │             │  unit_price ≥ 0 │                   │
//! │  │  quantity?      │             │  quantity ≥ 0   │                   │
//! │  └─────────────────┘             └────────┬────────┘                   │
//! │                                           │ + TaxRate                   │
//! │                                           ▼                             │
//! │                                  ┌─────────────────┐                   │
//! │                                  │  InvoiceTotals  │                   │
//! │                                  │  subtotal, tax, │                   │
//! │                                  │  total (round2) │                   │
//! │                                  └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validated-Only Line Items
//! `LineItem` fields are private. The only ways to get one are the
//! constructors below, [`validate_line_item`](crate::validation::validate_line_item),
//! or deserialization, which is routed through `RawLineItem` and validated.
//! Code holding a `LineItem` never has to re-check for negative values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::calculations::calculate_line_total;
use crate::validation::{clamp_non_negative, validate_line_item};
use crate::DEFAULT_TAX_RATE;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a fraction of the subtotal (0.08 = 8%).
///
/// ## Invariant
/// Always within `[0, 1]`. Every constructor clamps, including
/// deserialization, so a corrupt stored rate can never exceed 100%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, TS)]
#[ts(export)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a fraction, clamped to `[0, 1]`.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_fraction(0.08).fraction(), 0.08);
    /// assert_eq!(TaxRate::from_fraction(1.5).fraction(), 1.0);
    /// assert_eq!(TaxRate::from_fraction(-0.2).fraction(), 0.0);
    /// assert_eq!(TaxRate::from_fraction(f64::NAN).fraction(), 0.0);
    /// ```
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() || fraction <= 0.0 {
            return TaxRate(0.0);
        }
        TaxRate(fraction.min(1.0))
    }

    /// Creates a tax rate from a user-facing percentage (8.25 = 8.25%).
    ///
    /// This is the boundary where the form's percentage field becomes a
    /// fraction, so the result is clamped to `[0, 1]` here.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate::from_fraction(pct / 100.0)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

/// Default rate is 8%, the rate a fresh invoice starts with.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE)
    }
}

impl From<f64> for TaxRate {
    fn from(fraction: f64) -> Self {
        TaxRate::from_fraction(fraction)
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(TaxRate::from_fraction)
    }
}

// =============================================================================
// Raw Input
// =============================================================================

/// A numeric value as it arrives from a form field or stored JSON.
///
/// Numbers, numeric strings ("12.50") and anything else JSON can hold are
/// all accepted; [`validate_number`](crate::validation::validate_number)
/// turns any of them into a non-negative `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON number.
    Number(f64),
    /// Text typed into an input, possibly partial ("1.", "-", "").
    Text(String),
    /// Any other JSON value (bool, array, object). Normalizes to 0.
    Other(serde_json::Value),
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

/// An unvalidated line item: an edit from the form or a record read back
/// from storage. Every field may be missing or null.
///
/// `id` and `service` also accept numbers and booleans (stored as their
/// JSON text); other non-string values read as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLineItem {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub service: Option<String>,
    pub unit_price: Option<RawNumber>,
    pub quantity: Option<RawNumber>,
}

impl RawLineItem {
    /// Starts an edit for the line item with the given id.
    pub fn for_id(id: impl Into<String>) -> Self {
        RawLineItem {
            id: Some(id.into()),
            ..RawLineItem::default()
        }
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn unit_price(mut self, unit_price: impl Into<RawNumber>) -> Self {
        self.unit_price = Some(unit_price.into());
        self
    }

    pub fn quantity(mut self, quantity: impl Into<RawNumber>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl From<LineItem> for RawLineItem {
    fn from(item: LineItem) -> Self {
        RawLineItem {
            id: Some(item.id),
            service: Some(item.service),
            unit_price: Some(RawNumber::Number(item.unit_price)),
            quantity: Some(RawNumber::Number(item.quantity)),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row on an invoice.
///
/// ## Invariants
/// - `unit_price` and `quantity` are finite and `>= 0`
/// - Edits produce a whole new validated `LineItem`, never a partial mutation
///
/// ## Example
/// ```rust
/// use invoice_core::LineItem;
///
/// let item = LineItem::new("item-1", "Drop-in Visit", 22.5, -3.0);
/// assert_eq!(item.quantity(), 0.0);
/// assert_eq!(item.line_total(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: String,
    service: String,
    unit_price: f64,
    quantity: f64,
}

impl LineItem {
    /// Creates a validated line item. Negative or non-finite numbers become 0.
    pub fn new(id: impl Into<String>, service: impl Into<String>, unit_price: f64, quantity: f64) -> Self {
        LineItem {
            id: id.into(),
            service: service.into(),
            unit_price: clamp_non_negative(unit_price),
            quantity: clamp_non_negative(quantity),
        }
    }

    /// Creates the empty row the form adds on "+ Add Item".
    pub fn blank(id: impl Into<String>) -> Self {
        LineItem::new(id, "", 0.0, 0.0)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Unrounded `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> f64 {
        calculate_line_total(self.unit_price, self.quantity)
    }

    /// Returns a copy with a new service name.
    pub fn with_service(self, service: impl Into<String>) -> Self {
        LineItem {
            service: service.into(),
            ..self
        }
    }

    /// Returns a copy with a new unit price, clamped to `>= 0`.
    pub fn with_unit_price(self, unit_price: f64) -> Self {
        LineItem {
            unit_price: clamp_non_negative(unit_price),
            ..self
        }
    }

    /// Returns a copy with a new quantity, clamped to `>= 0`.
    pub fn with_quantity(self, quantity: f64) -> Self {
        LineItem {
            quantity: clamp_non_negative(quantity),
            ..self
        }
    }

    /// Returns a copy with a new id (used when restoring records saved
    /// without one).
    pub fn with_id(self, id: impl Into<String>) -> Self {
        LineItem { id: id.into(), ..self }
    }
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        validate_line_item(raw)
    }
}

/// Reads any [`RawLineItem`] shape and validates it.
impl<'de> Deserialize<'de> for LineItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawLineItem::deserialize(deserializer).map(validate_line_item)
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// Subtotal, tax and total, each rounded to 2 decimal places.
///
/// Derived from the current line items and tax rate on every call to
/// [`calculate_invoice_totals`](crate::calculations::calculate_invoice_totals);
/// never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.0);
        assert!((rate.fraction() - 0.08).abs() < 1e-12);
        assert!((rate.percentage() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_tax_rate_clamps() {
        assert_eq!(TaxRate::from_percentage(150.0).fraction(), 1.0);
        assert_eq!(TaxRate::from_percentage(-5.0).fraction(), 0.0);
        assert!(TaxRate::from_fraction(f64::NAN).is_zero());
    }

    #[test]
    fn test_tax_rate_default() {
        assert_eq!(TaxRate::default().fraction(), 0.08);
    }

    #[test]
    fn test_tax_rate_deserialize_clamps() {
        let rate: TaxRate = serde_json::from_str("7.5").unwrap();
        assert_eq!(rate.fraction(), 1.0);

        let rate: TaxRate = serde_json::from_str("0.1").unwrap();
        assert_eq!(rate.fraction(), 0.1);
    }

    #[test]
    fn test_line_item_new_clamps() {
        let item = LineItem::new("a", "Walk", -1.0, f64::INFINITY);
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn test_line_item_replacement() {
        let item = LineItem::blank("a")
            .with_service("Dog Walk – 30 min")
            .with_unit_price(18.0)
            .with_quantity(2.0);

        assert_eq!(item.id(), "a");
        assert_eq!(item.service(), "Dog Walk – 30 min");
        assert_eq!(item.line_total(), 36.0);

        let item = item.with_quantity(-4.0);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn test_line_item_serializes_camel_case() {
        let item = LineItem::new("item-1", "Drop-in Visit", 22.5, 1.0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "item-1",
                "service": "Drop-in Visit",
                "unitPrice": 22.5,
                "quantity": 1.0
            })
        );
    }

    #[test]
    fn test_line_item_deserialize_validates() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":"x","service":null,"unitPrice":"12.5","quantity":-3}"#,
        )
        .unwrap();

        assert_eq!(item.id(), "x");
        assert_eq!(item.service(), "");
        assert_eq!(item.unit_price(), 12.5);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn test_line_item_deserialize_scalar_text_fields() {
        let item: LineItem =
            serde_json::from_str(r#"{"id":7,"service":5,"unitPrice":2,"quantity":1}"#).unwrap();
        assert_eq!(item.id(), "7");
        assert_eq!(item.service(), "5");
        assert_eq!(item.line_total(), 2.0);

        let item: LineItem = serde_json::from_str(r#"{"id":"a","service":["x"]}"#).unwrap();
        assert_eq!(item.service(), "");
    }

    #[test]
    fn test_typescript_shapes() {
        assert_eq!(TaxRate::inline(), "number");

        let line_item = LineItem::inline();
        assert!(line_item.contains("id: string"));
        assert!(line_item.contains("service: string"));
        assert!(line_item.contains("unitPrice: number"));
        assert!(line_item.contains("quantity: number"));
    }

    #[test]
    fn test_raw_number_untagged() {
        let raw: RawNumber = serde_json::from_str("2").unwrap();
        assert_eq!(raw, RawNumber::Number(2.0));

        let raw: RawNumber = serde_json::from_str("\"2.5\"").unwrap();
        assert_eq!(raw, RawNumber::Text("2.5".to_string()));

        let raw: RawNumber = serde_json::from_str("true").unwrap();
        assert_eq!(raw, RawNumber::Other(serde_json::Value::Bool(true)));
    }
}
