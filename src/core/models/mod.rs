//! Data models for `TeachPricing`

pub mod catalog;
pub mod course;
pub mod phase;
pub mod selection;
pub mod tier;

pub use catalog::{Catalog, CatalogIssue};
pub use course::{CourseOffering, ExtraFeature};
pub use phase::{LineKind, Phase, PricingLine};
pub use selection::{Selection, DEFAULT_MAX_QUANTITY, MAX_MANUAL_AMOUNT};
pub use tier::Tier;
