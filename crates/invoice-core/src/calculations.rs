//! # Calculations Module
//!
//! Line totals and invoice totals.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line totals (unrounded) ──► Σ ──► subtotal ──┬──► × rate ──► tax      │
//! │                                               │                  │      │
//! │                                               └───────► + ◄──────┘      │
//! │                                                         │               │
//! │                                                       total             │
//! │                                                                         │
//! │  round2 is applied to subtotal, tax and total independently, at the    │
//! │  output, never to a line total before it is summed.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use invoice_core::{calculate_invoice_totals, LineItem, TaxRate};
//!
//! let items = vec![
//!     LineItem::new("a", "Dog Walk – 30 min", 18.0, 2.0),
//!     LineItem::new("b", "Drop-in Visit", 22.5, 1.0),
//!     LineItem::new("c", "Overnight Boarding (per night)", 65.0, 3.0),
//! ];
//! let totals = calculate_invoice_totals(&items, TaxRate::from_fraction(0.08));
//! assert_eq!(totals.subtotal, 253.5);
//! assert_eq!(totals.tax, 20.28);
//! assert_eq!(totals.total, 273.78);
//! ```

use crate::types::{InvoiceTotals, LineItem, TaxRate};
use crate::validation::clamp_non_negative;

/// Rounds to 2 decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use invoice_core::calculations::round2;
///
/// assert_eq!(round2(1.111), 1.11);
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(1.19988), 1.2);
/// ```
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculates `unit_price × quantity`.
///
/// Missing (`None`), NaN and negative inputs count as 0. The result is not
/// rounded; a caller displaying it goes through
/// [`format_currency`](crate::currency::format_currency).
///
/// ## Example
/// ```rust
/// use invoice_core::calculate_line_total;
///
/// assert_eq!(calculate_line_total(18.0, 2.0), 36.0);
/// assert_eq!(calculate_line_total(-10.0, 2.0), 0.0);
/// assert_eq!(calculate_line_total(None, 2.0), 0.0);
/// ```
pub fn calculate_line_total(unit_price: impl Into<Option<f64>>, quantity: impl Into<Option<f64>>) -> f64 {
    let price = clamp_non_negative(unit_price.into().unwrap_or(0.0));
    let qty = clamp_non_negative(quantity.into().unwrap_or(0.0));
    price * qty
}

/// Aggregates line items into subtotal, tax and total.
///
/// ## Rules
/// - subtotal = Σ unrounded line totals
/// - tax = subtotal × rate (the rate is already a clamped fraction)
/// - total = subtotal + tax
/// - each of the three is rounded with [`round2`] independently
///
/// An empty list yields all zeros; a zero rate yields `tax == 0` and
/// `total == subtotal`.
///
/// ## User Workflow
/// ```text
/// User edits any row or the tax rate
///      │
///      ▼
/// calculate_invoice_totals(items, rate) ← THIS FUNCTION (full recompute)
///      │
///      ▼
/// Subtotal: $253.50   Tax (8.0%): $20.28   Total: $273.78
/// ```
pub fn calculate_invoice_totals(line_items: &[LineItem], tax_rate: TaxRate) -> InvoiceTotals {
    let subtotal = line_items
        .iter()
        .fold(0.0, |sum, item| sum + calculate_line_total(item.unit_price(), item.quantity()));

    let tax = subtotal * tax_rate.fraction();
    let total = subtotal + tax;

    InvoiceTotals {
        subtotal: round2(subtotal),
        tax: round2(tax),
        total: round2(total),
    }
}

impl InvoiceTotals {
    /// Totals at the default 8% rate.
    pub fn at_default_rate(line_items: &[LineItem]) -> Self {
        calculate_invoice_totals(line_items, TaxRate::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
