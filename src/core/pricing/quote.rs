//! Full quote for one course offering and one selection

use super::course::{calculate_course, CoursePricing};
use super::diagnostics::Diagnostic;
use super::per_unit;
use super::phases::{aggregate_phases, PhaseAggregation};
use super::total::{compose_total, TotalPrice};
use crate::core::models::{Catalog, Selection};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything needed to display or render a price
///
/// Borrows from the catalog snapshot it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote<'a> {
    /// Global quantity the quote was computed for
    pub quantity: u32,
    /// Course base and extras
    #[serde(rename = "coursePricing")]
    pub course: CoursePricing<'a>,
    /// Roadmap phases
    #[serde(rename = "phaseAggregation")]
    pub phases: PhaseAggregation<'a>,
    /// Final total and breakdown
    #[serde(flatten)]
    pub total: TotalPrice,
}

impl Quote<'_> {
    /// Every degradation met while pricing, course first
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.course
            .diagnostics
            .iter()
            .chain(self.phases.diagnostics.iter())
    }

    /// `final_total / quantity`, `None` when the quantity is zero
    #[must_use]
    pub fn average_per_unit(&self) -> Option<Decimal> {
        per_unit(self.total.final_total, self.quantity)
    }

    /// Final total
    #[must_use]
    pub const fn final_total(&self) -> Decimal {
        self.total.final_total
    }
}

/// Price `course_id` against `selection`.
///
/// Returns `None` when the catalog has no such course. Everything else
/// degrades into diagnostics on the returned quote; phases whose total cannot
/// be added to the course total are left out of the final total.
#[must_use]
pub fn price_quote<'a>(
    catalog: &'a Catalog,
    course_id: &str,
    selection: &Selection,
) -> Option<Quote<'a>> {
    let Some(course) = catalog.find_course(course_id) else {
        crate::debug!("pricing: catalog has no course '{}'", course_id);
        return None;
    };

    let course = calculate_course(course, selection.quantity, &selection.extra_feature_quantities);
    let mut phases = aggregate_phases(
        &catalog.phases,
        &selection.selected_phase_ids,
        selection.quantity,
        &selection.manual_overrides,
        &selection.line_quantity_overrides,
    );
    let total = compose_total(&course, &phases).unwrap_or_else(|| {
        Diagnostic::AmountOverflow {
            scope: "phases total".to_string(),
        }
        .record(&mut phases.diagnostics);
        TotalPrice::course_only(&course)
    });

    Some(Quote {
        quantity: selection.quantity,
        course,
        phases,
        total,
    })
}
