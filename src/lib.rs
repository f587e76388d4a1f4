//! Pricing engine for TEACH course offerings
//!
//! Prices a course offering (tiered base price plus add-ons) together with
//! the selected roadmap phases, and renders the result as a commercial
//! proposal. The library is shared by the `teachpricing` CLI and any other
//! host that needs quotes.

pub mod core;
pub mod logger;

pub use crate::core::catalog::{load_catalog, save_catalog};
pub use crate::core::config;
pub use crate::core::error::{CatalogError, SelectionError};
pub use crate::core::get_version;
pub use crate::core::models::{Catalog, Selection};
pub use crate::core::pricing::{price_quote, Quote};
