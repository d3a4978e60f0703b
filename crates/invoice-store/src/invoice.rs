//! # Invoice Persistence
//!
//! Saves and restores the form state (line items + tax rate).
//!
//! ## Load Recovery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         load()                                          │
//! │                                                                         │
//! │  "invoice-line-items" ──► JSON array? ──► validate each ──► items       │
//! │           │                    │ no            │ not a record           │
//! │           │                    │               └──► warn!, skip row     │
//! │           │                    └──► warn!, items = []                   │
//! │                                                                         │
//! │  "invoice-tax-rate"   ──► number ≥ 0? ──► clamp to [0,1] ──► Some(rate) │
//! │                                │ no                                     │
//! │                                └──► warn!, None (caller's default)      │
//! │                                                                         │
//! │  Neither key present ──► None (fresh invoice)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Each key is recovered on its own: a corrupt tax rate does not throw away
//! good line items.

use invoice_core::{LineItem, TaxRate};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// Key holding the JSON array of line items.
pub const LINE_ITEMS_KEY: &str = "invoice-line-items";

/// Key holding the tax rate fraction as a decimal string.
pub const TAX_RATE_KEY: &str = "invoice-tax-rate";

/// Form state restored from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedInvoice {
    pub line_items: Vec<LineItem>,
    /// `None` when no usable rate was stored; the caller picks its default.
    pub tax_rate: Option<TaxRate>,
}

/// Persistence adapter used by the form controller.
pub trait InvoiceStore {
    /// Restores saved state. `None` when nothing was ever saved.
    ///
    /// Never fails: unreadable or corrupt line items load as an empty list
    /// (or without the bad rows), and an unusable tax rate loads as `None`.
    fn load(&self) -> Option<SavedInvoice>;

    /// Saves the current line items and tax rate.
    fn save(&mut self, line_items: &[LineItem], tax_rate: TaxRate) -> StoreResult<()>;
}

/// [`InvoiceStore`] over any [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct KvInvoiceStore<S> {
    kv: S,
}

impl<S: KeyValueStore> KvInvoiceStore<S> {
    pub fn new(kv: S) -> Self {
        KvInvoiceStore { kv }
    }

    /// Returns the underlying key-value store.
    pub fn inner(&self) -> &S {
        &self.kv
    }

    /// Reads a key, treating read failures and empty values as absent.
    fn read_key(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) => {
                warn!(key, error = %err, "Could not read saved invoice data");
                None
            }
        }
    }
}

impl<S: KeyValueStore> InvoiceStore for KvInvoiceStore<S> {
    fn load(&self) -> Option<SavedInvoice> {
        let items_json = self.read_key(LINE_ITEMS_KEY);
        let tax_rate_text = self.read_key(TAX_RATE_KEY);

        if items_json.is_none() && tax_rate_text.is_none() {
            return None;
        }

        let mut saved = SavedInvoice::default();

        if let Some(json) = items_json {
            match decode_line_items(&json) {
                Ok(line_items) => saved.line_items = line_items,
                Err(err) => warn!(error = %err, "Discarding unreadable saved line items"),
            }
        }

        if let Some(text) = tax_rate_text {
            match decode_tax_rate(&text) {
                Ok(tax_rate) => saved.tax_rate = Some(tax_rate),
                Err(err) => warn!(error = %err, "Discarding unreadable saved tax rate"),
            }
        }

        debug!(
            items = saved.line_items.len(),
            tax_rate = ?saved.tax_rate.map(|rate| rate.fraction()),
            "Invoice loaded"
        );
        Some(saved)
    }

    fn save(&mut self, line_items: &[LineItem], tax_rate: TaxRate) -> StoreResult<()> {
        let json = serde_json::to_string(line_items).map_err(|source| StoreError::Serialize {
            what: "line items".to_string(),
            source,
        })?;

        self.kv.set(LINE_ITEMS_KEY, json)?;
        self.kv.set(TAX_RATE_KEY, tax_rate.fraction().to_string())?;
        Ok(())
    }
}

/// Decodes the stored line item list, validating every item.
///
/// Only the outer array must be well formed; elements that are not line
/// item records are logged and skipped.
fn decode_line_items(json: &str) -> StoreResult<Vec<LineItem>> {
    let values: Vec<Value> = serde_json::from_str(json).map_err(|err| StoreError::Corrupt {
        location: LINE_ITEMS_KEY.to_string(),
        reason: err.to_string(),
    })?;

    let line_items = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<LineItem>(value) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(index, error = %err, "Skipping unreadable saved line item");
                None
            }
        })
        .collect();

    Ok(line_items)
}

/// Decodes the stored tax rate. Must be a non-negative number; values above
/// 1 are clamped.
fn decode_tax_rate(text: &str) -> StoreResult<TaxRate> {
    let corrupt = |reason: String| StoreError::Corrupt {
        location: TAX_RATE_KEY.to_string(),
        reason,
    };

    let rate = text
        .trim()
        .parse::<f64>()
        .map_err(|err| corrupt(format!("'{text}': {err}")))?;

    if rate.is_nan() || rate < 0.0 {
        return Err(corrupt(format!("'{text}' is not a valid rate")));
    }

    Ok(TaxRate::from_fraction(rate))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem::new("item-1", "Dog Walk – 30 min", 18.0, 2.0),
            LineItem::new("item-2", "Drop-in Visit", 22.5, 1.0),
        ]
    }

    #[test]
    fn test_load_nothing_saved() {
        let store = KvInvoiceStore::new(MemoryStore::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = KvInvoiceStore::new(MemoryStore::new());
        store
            .save(&sample_items(), TaxRate::from_fraction(0.1))
            .unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.line_items, sample_items());
        assert_eq!(saved.tax_rate, Some(TaxRate::from_fraction(0.1)));
    }

    #[test]
    fn test_save_uses_browser_format() {
        let mut store = KvInvoiceStore::new(MemoryStore::new());
        store.save(&sample_items()[..1], TaxRate::default()).unwrap();

        let items = store.inner().get(LINE_ITEMS_KEY).unwrap().unwrap();
        assert_eq!(
            items,
            r#"[{"id":"item-1","service":"Dog Walk – 30 min","unitPrice":18.0,"quantity":2.0}]"#
        );
        let rate = store.inner().get(TAX_RATE_KEY).unwrap().unwrap();
        assert_eq!(rate, "0.08");
    }

    #[test]
    fn test_load_validates_items() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([(
            LINE_ITEMS_KEY,
            r#"[{"id":"a","service":null,"unitPrice":-4,"quantity":"3"}]"#,
        )]));

        let saved = store.load().unwrap();
        assert_eq!(saved.line_items, vec![LineItem::new("a", "", 0.0, 3.0)]);
        assert_eq!(saved.tax_rate, None);
    }

    #[test]
    fn test_load_corrupt_items_falls_back() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([
            (LINE_ITEMS_KEY, "{broken"),
            (TAX_RATE_KEY, "0.05"),
        ]));

        let saved = store.load().unwrap();
        assert!(saved.line_items.is_empty());
        assert_eq!(saved.tax_rate, Some(TaxRate::from_fraction(0.05)));
    }

    #[test]
    fn test_load_corrupt_tax_rate_falls_back() {
        for bad in ["abc", "-0.5", "NaN"] {
            let store = KvInvoiceStore::new(MemoryStore::with_entries([
                (LINE_ITEMS_KEY, "[]"),
                (TAX_RATE_KEY, bad),
            ]));

            let saved = store.load().unwrap();
            assert_eq!(saved.tax_rate, None, "rate {bad:?}");
        }
    }

    #[test]
    fn test_load_tax_rate_clamped() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([(TAX_RATE_KEY, "8")]));
        assert_eq!(store.load().unwrap().tax_rate, Some(TaxRate::from_fraction(1.0)));
    }

    #[test]
    fn test_load_keeps_rows_with_odd_fields() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([(
            LINE_ITEMS_KEY,
            r#"[{"id":"a","service":"Drop-in Visit","unitPrice":22.5,"quantity":1},
                {"id":"b","service":5,"unitPrice":10,"quantity":2}]"#,
        )]));

        let saved = store.load().unwrap();
        assert_eq!(
            saved.line_items,
            vec![
                LineItem::new("a", "Drop-in Visit", 22.5, 1.0),
                LineItem::new("b", "5", 10.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_load_skips_only_unreadable_rows() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([(
            LINE_ITEMS_KEY,
            r#"[null, {"id":"a","unitPrice":3,"quantity":2}, "junk", 4]"#,
        )]));

        let saved = store.load().unwrap();
        assert_eq!(saved.line_items, vec![LineItem::new("a", "", 3.0, 2.0)]);
    }

    #[test]
    fn test_load_items_without_rate() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([(LINE_ITEMS_KEY, "[]")]));
        assert_eq!(store.load(), Some(SavedInvoice::default()));
    }

    #[test]
    fn test_load_empty_values_are_absent() {
        let store = KvInvoiceStore::new(MemoryStore::with_entries([
            (LINE_ITEMS_KEY, ""),
            (TAX_RATE_KEY, ""),
        ]));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_decode_tax_rate() {
        assert_eq!(decode_tax_rate(" 0.08 ").unwrap(), TaxRate::from_fraction(0.08));
        assert!(decode_tax_rate("").is_err());
    }
}
