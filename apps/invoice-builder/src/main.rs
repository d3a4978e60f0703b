//! # Invoice Builder Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Read configuration (`INVOICE_STORE_PATH`, `INVOICE_TAX_RATE`)
//! 3. Restore the saved invoice, or start an empty one
//! 4. Print the invoice with its totals

fn main() {
    // Setup lives in lib.rs so integration tests can reach it
    invoice_builder::run();
}
