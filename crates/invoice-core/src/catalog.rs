//! # Service Catalog
//!
//! Predefined services the form offers in its "Service" dropdown. Picking
//! one pre-fills the row's service name and unit price.

use serde::Serialize;

/// A predefined billable service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub unit_price: f64,
}

/// The built-in sample services.
pub const SAMPLE_SERVICES: &[Service] = &[
    Service {
        id: "walk30",
        name: "Dog Walk – 30 min",
        unit_price: 18.0,
    },
    Service {
        id: "walk60",
        name: "Dog Walk – 60 min",
        unit_price: 30.0,
    },
    Service {
        id: "dropin",
        name: "Drop-in Visit",
        unit_price: 22.5,
    },
    Service {
        id: "boarding",
        name: "Overnight Boarding (per night)",
        unit_price: 65.0,
    },
];

/// Lookup of predefined services.
pub trait ServiceCatalog {
    /// All services, in display order.
    fn services(&self) -> &[Service];

    /// Finds a service by id.
    fn lookup(&self, id: &str) -> Option<&Service> {
        self.services().iter().find(|s| s.id == id)
    }

    /// Finds a service by display name (used to preselect the dropdown for
    /// an existing row).
    fn find_by_name(&self, name: &str) -> Option<&Service> {
        self.services().iter().find(|s| s.name == name)
    }
}

/// A catalog backed by a static table.
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
    services: &'static [Service],
}

impl StaticCatalog {
    pub const fn new(services: &'static [Service]) -> Self {
        StaticCatalog { services }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        StaticCatalog::new(SAMPLE_SERVICES)
    }
}

impl ServiceCatalog for StaticCatalog {
    fn services(&self) -> &[Service] {
        self.services
    }
}
