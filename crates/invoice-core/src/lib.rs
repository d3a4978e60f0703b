//! # invoice-core: Pure Calculation Logic for the Invoice Builder
//!
//! This crate is the calculation core of the invoice form. It contains the
//! numeric normalization, line/invoice totals and currency display logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Builder Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Invoice Form (renderer)                      │   │
//! │  │    Line item rows ──► Tax rate field ──► Totals panel          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ edits                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               invoice-builder (form controller)                 │   │
//! │  └─────────────┬───────────────────────────────────┬───────────────┘   │
//! │                │                                   │                    │
//! │  ┌─────────────▼───────────────────────┐  ┌───────▼────────────────┐  │
//! │  │     ★ invoice-core (THIS CRATE) ★   │  │     invoice-store      │  │
//! │  │                                     │  │  key-value persistence │  │
//! │  │  validation  calculations  currency │  └────────────────────────┘  │
//! │  │  types       catalog                │                              │
//! │  │                                     │                              │
//! │  │  NO I/O • NO STATE • TOTAL FUNCTIONS│                              │
//! │  └─────────────────────────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, TaxRate, InvoiceTotals)
//! - [`validation`] - Numeric input normalization and line item validation
//! - [`calculations`] - Line totals and invoice totals with rounding
//! - [`currency`] - `$1,234.56` formatting and parsing
//! - [`catalog`] - Predefined services
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, clocks and randomness live in other crates
//! 3. **Total Functions**: Invalid input is normalized to 0 or `"$0.00"`, never
//!    an error or a panic, because half-typed values are normal in a live form
//! 4. **Round Late**: Only subtotal, tax, total and display strings are rounded
//!
//! ## Example Usage
//!
//! ```rust
//! use invoice_core::{calculate_invoice_totals, format_currency, LineItem, TaxRate};
//!
//! let items = vec![LineItem::new("item-1", "Dog Walk – 30 min", 18.0, 2.0)];
//! let totals = calculate_invoice_totals(&items, TaxRate::from_percentage(8.0));
//!
//! assert_eq!(format_currency(totals.subtotal), "$36.00");
//! assert_eq!(format_currency(totals.tax), "$2.88");
//! assert_eq!(format_currency(totals.total), "$38.88");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculations;
pub mod catalog;
pub mod currency;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use invoice_core::LineItem` instead of
// `use invoice_core::types::LineItem`

pub use calculations::{calculate_invoice_totals, calculate_line_total, round2};
pub use catalog::{Service, ServiceCatalog, StaticCatalog, SAMPLE_SERVICES};
pub use currency::{format_currency, parse_currency};
pub use types::*;
pub use validation::{validate_line_item, validate_number, validate_number_str};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate a new invoice starts with (8%), as a fraction.
pub const DEFAULT_TAX_RATE: f64 = 0.08;
