//! Core module: catalog, pricing engine, proposals and configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod proposal;

/// Returns the current version of the `TeachPricing` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
