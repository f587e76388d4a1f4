//! Course offering model

use super::tier::Tier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional add-on sold on top of a course offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFeature {
    /// Identifier referenced by selection state (e.g., "extra-hours")
    pub id: String,

    /// Display name
    pub name: String,

    /// Longer description shown next to the selector
    #[serde(default)]
    pub description: String,

    /// Price per unit of the course quantity, per selected quantity of this feature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Flat price per selected quantity of this feature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_price: Option<Decimal>,

    /// Whether hosts should pre-select this feature
    #[serde(default)]
    pub is_default: bool,
}

impl ExtraFeature {
    /// Price of `feature_quantity` units of this feature for a course sold at `quantity`.
    ///
    /// A unit price wins over a fixed price when both are set. A feature with
    /// neither contributes zero. `None` when the price does not fit a `Decimal`.
    #[must_use]
    pub fn charge(&self, quantity: u32, feature_quantity: u32) -> Option<Decimal> {
        let times = Decimal::from(feature_quantity);
        match (self.unit_price, self.fixed_price) {
            (Some(unit), _) => unit
                .checked_mul(Decimal::from(quantity))
                .and_then(|per_feature| per_feature.checked_mul(times)),
            (None, Some(fixed)) => fixed.checked_mul(times),
            (None, None) => Some(Decimal::ZERO),
        }
    }
}

/// A course offering with tiered base pricing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOffering {
    /// Identifier (e.g., "async-digital")
    pub id: String,

    /// Display name (e.g., "TEACH Digital")
    pub name: String,

    /// Short description used on proposals
    #[serde(default)]
    pub description: String,

    /// Included features, one sentence each
    #[serde(default)]
    pub features: Vec<String>,

    /// Base price tiers, ordered by quantity
    pub tiers: Vec<Tier>,

    /// Optional add-ons
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_features: Vec<ExtraFeature>,
}

impl CourseOffering {
    /// Look up an add-on by id
    #[must_use]
    pub fn extra_feature(&self, id: &str) -> Option<&ExtraFeature> {
        self.extra_features.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn feature(unit_price: Option<Decimal>, fixed_price: Option<Decimal>) -> ExtraFeature {
        ExtraFeature {
            id: "extra-hours".to_string(),
            name: "Horas Extras por Semana".to_string(),
            description: String::new(),
            unit_price,
            fixed_price,
            is_default: false,
        }
    }

    #[test]
    fn test_unit_priced_feature_scales_with_both_quantities() {
        let f = feature(Some(dec!(25)), None);
        assert_eq!(f.charge(40, 2), Some(dec!(2000)));
    }

    #[test]
    fn test_fixed_priced_feature_ignores_course_quantity() {
        let f = feature(None, Some(dec!(1500)));
        assert_eq!(f.charge(1, 3), Some(dec!(4500)));
        assert_eq!(f.charge(50_000, 3), Some(dec!(4500)));
    }

    #[test]
    fn test_unit_price_wins_over_fixed_price() {
        let f = feature(Some(dec!(10)), Some(dec!(999)));
        assert_eq!(f.charge(10, 1), Some(dec!(100)));
    }

    #[test]
    fn test_unpriced_feature_is_free() {
        assert_eq!(feature(None, None).charge(100, 5), Some(Decimal::ZERO));
    }

    #[test]
    fn test_charge_too_large_is_none() {
        assert_eq!(feature(Some(Decimal::MAX), None).charge(2, 1), None);
        assert_eq!(feature(None, Some(Decimal::MAX)).charge(1, 2), None);
        assert_eq!(feature(None, Some(Decimal::MAX)).charge(50_000, 1), Some(Decimal::MAX));
    }

    #[test]
    fn test_extra_feature_lookup() {
        let course = CourseOffering {
            id: "personalized".to_string(),
            name: "TEACH Premium".to_string(),
            description: String::new(),
            features: Vec::new(),
            tiers: vec![Tier::unbounded(1, dec!(300))],
            extra_features: vec![feature(Some(dec!(25)), None)],
        };
        assert!(course.extra_feature("extra-hours").is_some());
        assert!(course.extra_feature("removed-feature").is_none());
    }
}
