//! Pricing engine
//!
//! Pure functions over a catalog snapshot and a selection. Nothing here
//! fails or mutates shared state: cases the catalog cannot price contribute
//! zero and leave a [`Diagnostic`] behind.

pub mod course;
pub mod diagnostics;
pub mod line;
pub mod phases;
pub mod quote;
pub mod tier_resolver;
pub mod total;

pub use course::{calculate_course, CoursePricing, ExtraCharge};
pub use diagnostics::Diagnostic;
pub use line::{evaluate_line, LineBasis, LineEvaluation};
pub use phases::{aggregate_phases, PhaseAggregation, PhaseSubtotal};
pub use quote::{price_quote, Quote};
pub use tier_resolver::resolve_tier;
pub use total::{compose_total, Breakdown, TotalPrice};

use rust_decimal::Decimal;

/// `total / quantity`, `None` when the quantity is zero
#[must_use]
pub fn per_unit(total: Decimal, quantity: u32) -> Option<Decimal> {
    (quantity > 0).then(|| total / Decimal::from(quantity))
}
