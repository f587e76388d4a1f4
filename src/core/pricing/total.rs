//! Final total composition

use super::course::CoursePricing;
use super::phases::PhaseAggregation;
use rust_decimal::Decimal;
use serde::Serialize;

/// The three parts of a final total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Course base price (tier price × quantity)
    pub course_base: Decimal,
    /// Sum of the selected roadmap phases
    pub course_phases: Decimal,
    /// Sum of the course extras
    pub course_extras: Decimal,
}

impl Breakdown {
    /// Sum of the three parts
    #[must_use]
    pub fn sum(&self) -> Decimal {
        self.course_base + self.course_extras + self.course_phases
    }
}

/// Final total with its breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPrice {
    /// Course total plus phases total
    pub final_total: Decimal,
    /// Parts that add up to `final_total`
    pub breakdown: Breakdown,
}

impl TotalPrice {
    /// Total of the course alone, with nothing from the phases
    #[must_use]
    pub const fn course_only(course: &CoursePricing<'_>) -> Self {
        Self {
            final_total: course.total,
            breakdown: Breakdown {
                course_base: course.base_total,
                course_phases: Decimal::ZERO,
                course_extras: course.extra_total,
            },
        }
    }
}

/// Combine course pricing and phase totals.
///
/// `final_total == breakdown.sum()` holds exactly since every value is a
/// `Decimal` and nothing is rounded. `None` when the sum does not fit a
/// `Decimal`.
#[must_use]
pub fn compose_total(
    course: &CoursePricing<'_>,
    phases: &PhaseAggregation<'_>,
) -> Option<TotalPrice> {
    let final_total = course.total.checked_add(phases.total)?;
    Some(TotalPrice {
        final_total,
        breakdown: Breakdown {
            course_base: course.base_total,
            course_phases: phases.total,
            course_extras: course.extra_total,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Catalog, Selection, Tier};
    use crate::core::pricing::{aggregate_phases, calculate_course};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    #[test]
    fn test_breakdown_reconciles() {
        let catalog = Catalog::builtin();
        let course = catalog.find_course("personalized").expect("builtin course");
        let mut selection = Selection::with_quantity(60);
        selection.set_extra_feature("extra-hours", 2);
        selection.select_all_phases(&catalog);

        let course_pricing = calculate_course(course, 60, &selection.extra_feature_quantities);
        let phases = aggregate_phases(
            &catalog.phases,
            &selection.selected_phase_ids,
            selection.quantity,
            &selection.manual_overrides,
            &selection.line_quantity_overrides,
        );
        let total = compose_total(&course_pricing, &phases).expect("fits");

        assert_eq!(total.final_total, total.breakdown.sum());
        assert_eq!(total.breakdown.course_base, dec!(19200));
        assert_eq!(total.breakdown.course_extras, dec!(3000));
        assert_eq!(total.breakdown.course_phases, phases.total);
    }

    #[test]
    fn test_empty_everything_is_zero() {
        let catalog = Catalog::builtin();
        let course = catalog.find_course("async-digital").expect("builtin course");
        let course_pricing = calculate_course(course, 0, &BTreeMap::new());
        let phases = aggregate_phases(
            &catalog.phases,
            &std::collections::BTreeSet::new(),
            0,
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        let total = compose_total(&course_pricing, &phases).expect("fits");
        assert_eq!(total.final_total, Decimal::ZERO);
        assert_eq!(total.breakdown.sum(), Decimal::ZERO);
    }

    #[test]
    fn test_sum_too_large_is_none() {
        let mut catalog = Catalog::builtin();
        catalog.courses[0].tiers = vec![Tier::unbounded(1, Decimal::MAX)];
        let course_pricing = calculate_course(&catalog.courses[0], 1, &BTreeMap::new());
        let selection = Selection::default();
        let phases = aggregate_phases(
            &catalog.phases,
            &selection.selected_phase_ids,
            1,
            &selection.manual_overrides,
            &selection.line_quantity_overrides,
        );
        assert!(compose_total(&course_pricing, &phases).is_none());

        let fallback = TotalPrice::course_only(&course_pricing);
        assert_eq!(fallback.final_total, Decimal::MAX);
        assert_eq!(fallback.final_total, fallback.breakdown.sum());
    }
}
