//! # Invoice Form Controller
//!
//! Holds the form state and applies user edits.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form Operations                                      │
//! │                                                                         │
//! │  Form Action              Controller Method          State Change       │
//! │  ───────────              ─────────────────          ────────────       │
//! │                                                                         │
//! │  "+ Add Item" ──────────► add_line_item() ─────────► items.push(blank) │
//! │                                                                         │
//! │  Pick service ──────────► select_service() ────────► name + unit price │
//! │                                                                         │
//! │  Type price / qty ──────► on_unit_price_input() ───► validated row     │
//! │                           on_quantity_input()                           │
//! │                                                                         │
//! │  Click Remove ──────────► remove_line_item() ──────► items.retain(..)  │
//! │                                                                         │
//! │  Type tax % ────────────► on_tax_rate_edited() ────► rate (clamped)    │
//! │                                                                         │
//! │  Render ────────────────► totals() / view() ───────► (read only)       │
//! │                                                                         │
//! │  NOTE: Every write replaces whole validated rows and then saves.       │
//! │        Totals are never cached; each read recomputes them.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use invoice_core::{
    calculate_invoice_totals, validate_line_item, validate_number_str, InvoiceTotals, LineItem,
    RawLineItem, ServiceCatalog, StaticCatalog, TaxRate,
};
use invoice_store::InvoiceStore;
use tracing::{debug, error, info};

use crate::ids::new_line_item_id;
use crate::view::InvoiceView;

/// The invoice form's state and edit operations.
///
/// ## Invariants
/// - Every item in `line_items` is validated and has a non-empty id
/// - `tax_rate` is within `[0, 1]`
/// - After every successful edit the state has been handed to the store
pub struct InvoiceBuilder<S, C = StaticCatalog> {
    store: S,
    catalog: C,
    line_items: Vec<LineItem>,
    tax_rate: TaxRate,
}

impl<S: InvoiceStore, C: ServiceCatalog> InvoiceBuilder<S, C> {
    /// Opens the form, restoring saved state when there is any.
    ///
    /// `default_tax_rate` applies whenever no usable rate was saved, even if
    /// line items were. Items saved without an id get a fresh one so rows
    /// stay addressable.
    pub fn open(store: S, catalog: C, default_tax_rate: TaxRate) -> Self {
        let saved = store.load().unwrap_or_default();
        let tax_rate = saved.tax_rate.unwrap_or(default_tax_rate);

        let line_items: Vec<LineItem> = saved
            .line_items
            .into_iter()
            .map(|item| {
                if item.id().is_empty() {
                    item.with_id(new_line_item_id())
                } else {
                    item
                }
            })
            .collect();

        info!(
            items = line_items.len(),
            tax_rate = tax_rate.fraction(),
            "Invoice form opened"
        );

        InvoiceBuilder {
            store,
            catalog,
            line_items,
            tax_rate,
        }
    }

    // =========================================================================
    // Line Items
    // =========================================================================

    /// Appends an empty row and returns its id.
    pub fn add_line_item(&mut self) -> String {
        let id = new_line_item_id();
        self.line_items.push(LineItem::blank(id.clone()));
        debug!(id = %id, "Line item added");
        self.persist();
        id
    }

    /// Replaces the row with the same id by the validated edit.
    ///
    /// Returns `false` (and changes nothing) when no row has that id.
    pub fn on_line_item_edited(&mut self, edit: RawLineItem) -> bool {
        self.replace(validate_line_item(edit))
    }

    /// Applies the text of a unit price field.
    pub fn on_unit_price_input(&mut self, id: &str, text: &str) -> bool {
        let unit_price = validate_number_str(text);
        self.update_with(id, |item| item.with_unit_price(unit_price))
    }

    /// Applies the text of a quantity field.
    pub fn on_quantity_input(&mut self, id: &str, text: &str) -> bool {
        let quantity = validate_number_str(text);
        self.update_with(id, |item| item.with_quantity(quantity))
    }

    /// Pre-fills a row from the catalog: service name and unit price are
    /// replaced, quantity is kept.
    ///
    /// Returns `false` when either the row or the service is unknown.
    pub fn select_service(&mut self, id: &str, service_id: &str) -> bool {
        let Some(service) = self.catalog.lookup(service_id).copied() else {
            debug!(service_id, "Unknown service selected");
            return false;
        };

        self.update_with(id, |item| {
            item.with_service(service.name)
                .with_unit_price(service.unit_price)
        })
    }

    /// Sets a free-text service name.
    pub fn set_custom_service(&mut self, id: &str, name: &str) -> bool {
        self.update_with(id, |item| item.with_service(name))
    }

    /// Clears the service name (dropdown back to "Select a service...").
    pub fn clear_service(&mut self, id: &str) -> bool {
        self.set_custom_service(id, "")
    }

    /// Removes a row. Returns `false` when no row has that id.
    pub fn remove_line_item(&mut self, id: &str) -> bool {
        let before = self.line_items.len();
        self.line_items.retain(|item| item.id() != id);

        if self.line_items.len() == before {
            return false;
        }

        debug!(id, "Line item removed");
        self.persist();
        true
    }

    // =========================================================================
    // Tax Rate
    // =========================================================================

    /// Applies the text of the tax percentage field ("8.25" = 8.25%).
    ///
    /// Unparseable text counts as 0%; the result is clamped to 0-100%.
    pub fn on_tax_rate_edited(&mut self, percentage_text: &str) -> TaxRate {
        self.set_tax_rate(TaxRate::from_percentage(validate_number_str(percentage_text)))
    }

    /// Sets the tax rate directly.
    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) -> TaxRate {
        self.tax_rate = tax_rate;
        debug!(tax_rate = tax_rate.fraction(), "Tax rate changed");
        self.persist();
        tax_rate
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self, id: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id() == id)
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Unrounded line total of one row.
    pub fn line_total(&self, id: &str) -> Option<f64> {
        self.line_item(id).map(LineItem::line_total)
    }

    /// Recomputes the invoice totals from the current rows.
    pub fn totals(&self) -> InvoiceTotals {
        calculate_invoice_totals(&self.line_items, self.tax_rate)
    }

    /// Builds the presentation model.
    pub fn view(&self) -> InvoiceView {
        InvoiceView::build(&self.line_items, self.tax_rate, &self.catalog)
    }

    /// Returns the store (e.g. to inspect what was saved).
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn update_with(&mut self, id: &str, edit: impl FnOnce(LineItem) -> LineItem) -> bool {
        match self.line_item(id).cloned() {
            Some(item) => self.replace(edit(item)),
            None => {
                debug!(id, "Edit for unknown line item ignored");
                false
            }
        }
    }

    fn replace(&mut self, updated: LineItem) -> bool {
        let Some(slot) = self
            .line_items
            .iter_mut()
            .find(|item| item.id() == updated.id())
        else {
            debug!(id = updated.id(), "Edit for unknown line item ignored");
            return false;
        };

        *slot = updated;
        self.persist();
        true
    }

    /// Saves the current state. Failures are logged, never surfaced: the
    /// form keeps working with the in-memory state.
    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.line_items, self.tax_rate) {
            error!(error = %err, "Failed to save invoice");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
