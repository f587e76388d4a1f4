//! Course base price and extras

use super::diagnostics::Diagnostic;
use super::per_unit;
use super::tier_resolver::resolve_tier;
use crate::core::models::{CourseOffering, ExtraFeature, Tier};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One priced add-on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraCharge<'a> {
    /// The add-on
    pub feature: &'a ExtraFeature,
    /// How many were selected
    pub quantity: u32,
    /// Contribution to the extras total
    pub amount: Decimal,
}

/// Course pricing for one quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePricing<'a> {
    /// The course offering priced
    pub course: &'a CourseOffering,
    /// Quantity priced
    pub quantity: u32,
    /// Tier covering the quantity; `None` means no tier matched and every total is zero
    pub matched_tier: Option<&'a Tier>,
    /// `tier price × quantity`
    pub base_total: Decimal,
    /// Sum of the extras
    pub extra_total: Decimal,
    /// `base_total + extra_total`
    pub total: Decimal,
    /// `total / quantity`; `None` when the quantity is zero
    pub per_unit: Option<Decimal>,
    /// Priced add-ons with a positive quantity, in selection key order
    pub extras: Vec<ExtraCharge<'a>>,
    /// Degradations met along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Price a course at `quantity` with the selected extras.
///
/// When no tier covers the quantity the result is all zeros with
/// `matched_tier == None`. Extras with a zero quantity are skipped; ids the
/// course does not offer are skipped and reported.
#[must_use]
pub fn calculate_course<'a>(
    course: &'a CourseOffering,
    quantity: u32,
    extra_feature_quantities: &BTreeMap<String, u32>,
) -> CoursePricing<'a> {
    let mut diagnostics = Vec::new();

    let Some(tier) = resolve_tier(&course.tiers, quantity) else {
        Diagnostic::CourseTierNotFound {
            course_id: course.id.clone(),
            quantity,
        }
        .record(&mut diagnostics);
        let per_unit = per_unit(Decimal::ZERO, quantity);
        if per_unit.is_none() {
            Diagnostic::UndefinedPerUnit.record(&mut diagnostics);
        }
        return CoursePricing {
            course,
            quantity,
            matched_tier: None,
            base_total: Decimal::ZERO,
            extra_total: Decimal::ZERO,
            total: Decimal::ZERO,
            per_unit,
            extras: Vec::new(),
            diagnostics,
        };
    };

    let base_total = tier
        .unit_price
        .checked_mul(Decimal::from(quantity))
        .unwrap_or_else(|| {
            Diagnostic::AmountOverflow {
                scope: format!("course {} base price", course.id),
            }
            .record(&mut diagnostics);
            Decimal::ZERO
        });

    // Extras that would overflow either running sum are left out
    let mut extras = Vec::new();
    let mut extra_total = Decimal::ZERO;
    let mut total = base_total;
    for (feature_id, &feature_quantity) in extra_feature_quantities {
        if feature_quantity == 0 {
            continue;
        }
        let Some(feature) = course.extra_feature(feature_id) else {
            Diagnostic::UnknownFeatureReference {
                course_id: course.id.clone(),
                feature_id: feature_id.clone(),
            }
            .record(&mut diagnostics);
            continue;
        };
        let sums = feature
            .charge(quantity, feature_quantity)
            .and_then(|amount| {
                Some((amount, extra_total.checked_add(amount)?, total.checked_add(amount)?))
            });
        match sums {
            Some((amount, next_extra_total, next_total)) => {
                extra_total = next_extra_total;
                total = next_total;
                extras.push(ExtraCharge {
                    feature,
                    quantity: feature_quantity,
                    amount,
                });
            }
            None => Diagnostic::AmountOverflow {
                scope: format!("course {} extra feature {}", course.id, feature.id),
            }
            .record(&mut diagnostics),
        }
    }

    let per_unit = per_unit(total, quantity);
    if per_unit.is_none() {
        Diagnostic::UndefinedPerUnit.record(&mut diagnostics);
    }

    CoursePricing {
        course,
        quantity,
        matched_tier: Some(tier),
        base_total,
        extra_total,
        total,
        per_unit,
        extras,
        diagnostics,
    }
}
