pub mod cart;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod notification;
pub mod pricing;
pub mod sorting;
pub mod validation;

pub use catalog::{CatalogService, HttpCatalogService, DEFAULT_CATALOG_URL};
pub use controller::{
    BookingOutcome, CheckoutOutcome, SpaceSyncFailure, SpaceSyncReport, StorefrontController,
    View,
};
pub use error::{CartError, CatalogError};
pub use notification::{Notification, NotificationKind};
pub use pricing::PriceBreakdown;
pub use sorting::{SortAttribute, SortOrder};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/http_catalog_tests.rs"]
mod http_catalog_tests;
