//! # Invoice Builder Library
//!
//! Form controller for the invoice builder. Hosts (the CLI in `main.rs`,
//! or a UI shell) drive [`InvoiceBuilder`] and render its [`InvoiceView`].
//!
//! ## Module Organization
//! ```text
//! invoice_builder/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── controller.rs   ◄─── Form state and edit operations
//! ├── view.rs         ◄─── Display-ready rows and totals
//! ├── config.rs       ◄─── Environment configuration
//! └── ids.rs          ◄─── Line item id generation
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Builder                                      │
//! │                                                                         │
//! │  ┌──────────────────┐   edits   ┌──────────────────┐                   │
//! │  │   Form / Host    │──────────►│  InvoiceBuilder  │                   │
//! │  │                  │◄──────────│  (controller.rs) │                   │
//! │  └──────────────────┘   view()  └────────┬─────────┘                   │
//! │                                          │                              │
//! │                      ┌───────────────────┼───────────────────┐         │
//! │                      ▼                   ▼                   ▼         │
//! │              ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//! │              │ invoice-core │   │invoice-store │   │ServiceCatalog│   │
//! │              │ validate +   │   │ load / save  │   │ walk30, ...  │   │
//! │              │ totals       │   │ (JSON file)  │   │              │   │
//! │              └──────────────┘   └──────────────┘   └──────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod controller;
pub mod ids;
pub mod view;

use invoice_core::StaticCatalog;
use invoice_store::{FileStore, KvInvoiceStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{BuilderConfig, ConfigError, ConfigResult};
pub use controller::InvoiceBuilder;
pub use ids::new_line_item_id;
pub use view::{InvoiceView, LineItemRow};

/// Builder backed by the JSON store file.
pub type FileInvoiceBuilder = InvoiceBuilder<KvInvoiceStore<FileStore>, StaticCatalog>;

/// Opens the invoice saved at the configured location and prints it.
pub fn run() {
    init_tracing();

    let config = BuilderConfig::from_env();
    info!(
        store = %config.store_path.display(),
        default_tax_rate = config.default_tax_rate.fraction(),
        "Starting invoice builder"
    );

    let builder = open_file_builder(&config);
    print!("{}", builder.view());
}

/// Opens a builder over the store file named by `config`.
pub fn open_file_builder(config: &BuilderConfig) -> FileInvoiceBuilder {
    let store = KvInvoiceStore::new(FileStore::new(&config.store_path));
    InvoiceBuilder::open(store, StaticCatalog::default(), config.default_tax_rate)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with the printed invoice.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=invoice_store=trace` - Show trace for the store only
/// - Default: INFO, DEBUG for the invoice crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,invoice_builder=debug,invoice_store=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
