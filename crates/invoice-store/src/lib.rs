//! # invoice-store: Persistence for the Invoice Builder
//!
//! Saves the form's line items and tax rate to a key-value store and restores
//! them on startup.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Builder Data Flow                           │
//! │                                                                         │
//! │  Form controller (every edit)                                          │
//! │       │ save(items, rate)                  ▲ load() on open            │
//! │       ▼                                    │                           │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  invoice-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐        ┌──────────────────────────┐   │   │
//! │  │   │  KvInvoiceStore    │───────►│  KeyValueStore           │   │   │
//! │  │   │  (invoice.rs)      │        │  MemoryStore / FileStore │   │   │
//! │  │   │  encode / decode   │        │  (kv.rs)                 │   │   │
//! │  │   │  recover defaults  │        └──────────────────────────┘   │   │
//! │  │   └────────────────────┘                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`invoice`] - The `InvoiceStore` adapter (load/save with recovery)
//! - [`kv`] - Key-value backends
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use invoice_core::{LineItem, TaxRate};
//! use invoice_store::{InvoiceStore, KvInvoiceStore, MemoryStore};
//!
//! let mut store = KvInvoiceStore::new(MemoryStore::new());
//! assert!(store.load().is_none());
//!
//! let items = vec![LineItem::new("item-1", "Drop-in Visit", 22.5, 1.0)];
//! store.save(&items, TaxRate::default()).unwrap();
//! assert_eq!(store.load().unwrap().line_items, items);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod kv;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use invoice::{InvoiceStore, KvInvoiceStore, SavedInvoice, LINE_ITEMS_KEY, TAX_RATE_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
