//! # Invoice View
//!
//! Presentation model handed to a renderer. Every amount is already a
//! display string from [`format_currency`]; a renderer only lays them out.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service                         Unit Price    Qty      Line Total      │
//! │  Dog Walk – 30 min                   $18.00      2          $36.00      │
//! │  Drop-in Visit                       $22.50      1          $22.50      │
//! │                                                                         │
//! │                                        Subtotal:           $58.50      │
//! │                                      Tax (8.0%):            $4.68      │
//! │                                           Total:           $63.18      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use invoice_core::{calculate_invoice_totals, format_currency, LineItem, ServiceCatalog, TaxRate};

/// One rendered line item row.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    pub id: String,
    pub service: String,
    /// Catalog entry whose name matches the row, for preselecting the
    /// service dropdown. `None` for custom or empty services.
    pub service_id: Option<&'static str>,
    pub unit_price: String,
    pub quantity: String,
    pub line_total: String,
}

/// Everything the invoice form displays.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceView {
    pub rows: Vec<LineItemRow>,
    /// e.g. `"Tax (8.0%)"`
    pub tax_label: String,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl InvoiceView {
    /// Builds the view from the current form state. Totals are recomputed.
    pub fn build(line_items: &[LineItem], tax_rate: TaxRate, catalog: &impl ServiceCatalog) -> Self {
        let rows = line_items
            .iter()
            .map(|item| LineItemRow {
                id: item.id().to_string(),
                service: item.service().to_string(),
                service_id: catalog.find_by_name(item.service()).map(|s| s.id),
                unit_price: format_currency(item.unit_price()),
                quantity: item.quantity().to_string(),
                line_total: format_currency(item.line_total()),
            })
            .collect();

        let totals = calculate_invoice_totals(line_items, tax_rate);

        InvoiceView {
            rows,
            tax_label: format!("Tax ({:.1}%)", tax_rate.percentage()),
            subtotal: format_currency(totals.subtotal),
            tax: format_currency(totals.tax),
            total: format_currency(totals.total),
        }
    }
}

impl fmt::Display for InvoiceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<32} {:>12} {:>6} {:>15}",
            "Service", "Unit Price", "Qty", "Line Total"
        )?;

        if self.rows.is_empty() {
            writeln!(f, "(no line items)")?;
        }

        for row in &self.rows {
            let service = if row.service.is_empty() { "-" } else { row.service.as_str() };
            writeln!(
                f,
                "{:<32} {:>12} {:>6} {:>15}",
                service, row.unit_price, row.quantity, row.line_total
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{:>52} {:>15}", "Subtotal:", self.subtotal)?;
        writeln!(f, "{:>52} {:>15}", format!("{}:", self.tax_label), self.tax)?;
        writeln!(f, "{:>52} {:>15}", "Total:", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_core::StaticCatalog;

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem::new("a", "Dog Walk – 30 min", 18.0, 2.0),
            LineItem::new("b", "Custom grooming", 22.5, 1.0),
            LineItem::new("c", "Overnight Boarding (per night)", 65.0, 3.0),
        ]
    }

    #[test]
    fn test_build_formats_amounts() {
        let view = InvoiceView::build(&sample_items(), TaxRate::default(), &StaticCatalog::default());

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].unit_price, "$18.00");
        assert_eq!(view.rows[0].quantity, "2");
        assert_eq!(view.rows[2].line_total, "$195.00");
        assert_eq!(view.tax_label, "Tax (8.0%)");
        assert_eq!(view.subtotal, "$253.50");
        assert_eq!(view.tax, "$20.28");
        assert_eq!(view.total, "$273.78");
    }

    #[test]
    fn test_build_matches_catalog_services() {
        let view = InvoiceView::build(&sample_items(), TaxRate::default(), &StaticCatalog::default());
        assert_eq!(view.rows[0].service_id, Some("walk30"));
        assert_eq!(view.rows[1].service_id, None);
        assert_eq!(view.rows[2].service_id, Some("boarding"));
    }

    #[test]
    fn test_line_total_rounded_for_display() {
        let items = vec![LineItem::new("a", "", 1.111, 1.0)];
        let view = InvoiceView::build(&items, TaxRate::default(), &StaticCatalog::default());
        assert_eq!(view.rows[0].line_total, "$1.11");
        assert_eq!(view.total, "$1.20");
    }

    #[test]
    fn test_amounts_round_decimal_ties_up() {
        let items = vec![LineItem::new("a", "", 1.005, 1.0)];
        let view = InvoiceView::build(&items, TaxRate::zero(), &StaticCatalog::default());
        assert_eq!(view.rows[0].unit_price, "$1.01");
        assert_eq!(view.rows[0].line_total, "$1.01");
    }

    #[test]
    fn test_display() {
        let view = InvoiceView::build(&sample_items(), TaxRate::default(), &StaticCatalog::default());
        let text = view.to_string();

        assert!(text.starts_with("Service"));
        assert!(text.contains("Dog Walk – 30 min"));
        assert!(text.contains("Tax (8.0%):"));
        assert!(text.trim_end().ends_with("$273.78"));
    }

    #[test]
    fn test_display_empty() {
        let view = InvoiceView::build(&[], TaxRate::zero(), &StaticCatalog::default());
        let text = view.to_string();

        assert!(text.contains("(no line items)"));
        assert!(text.contains("Tax (0.0%):"));
        assert_eq!(view.total, "$0.00");
    }
}
