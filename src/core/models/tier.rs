//! Quantity tier model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity range with a unit price.
///
/// Used both for a course's base pricing and for the tiers of a `tiered`
/// pricing line inside a phase. A `max_quantity` of `None` means the tier
/// has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Smallest quantity covered by this tier (inclusive)
    pub min_quantity: u32,

    /// Largest quantity covered by this tier (inclusive), `None` when unbounded
    #[serde(default)]
    pub max_quantity: Option<u32>,

    /// Price charged per unit when this tier applies
    pub unit_price: Decimal,
}

impl Tier {
    /// Create a bounded tier covering `min..=max`
    #[must_use]
    pub const fn bounded(min_quantity: u32, max_quantity: u32, unit_price: Decimal) -> Self {
        Self {
            min_quantity,
            max_quantity: Some(max_quantity),
            unit_price,
        }
    }

    /// Create a tier covering `min..` with no upper bound
    #[must_use]
    pub const fn unbounded(min_quantity: u32, unit_price: Decimal) -> Self {
        Self {
            min_quantity,
            max_quantity: None,
            unit_price,
        }
    }

    /// Whether `quantity` falls inside this tier's range
    #[must_use]
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Whether the tier has no upper bound
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_quantity.is_none()
    }
}

/// Renders the range as `min a max` or `min a +` (the proposal wording)
impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_quantity {
            Some(max) => write!(f, "{} a {max}", self.min_quantity),
            None => write!(f, "{} a +", self.min_quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bounded_contains_both_ends() {
        let tier = Tier::bounded(201, 500, dec!(250));
        assert!(!tier.contains(200));
        assert!(tier.contains(201));
        assert!(tier.contains(500));
        assert!(!tier.contains(501));
    }

    #[test]
    fn test_unbounded_contains_everything_above_min() {
        let tier = Tier::unbounded(501, dec!(220));
        assert!(tier.is_unbounded());
        assert!(!tier.contains(500));
        assert!(tier.contains(501));
        assert!(tier.contains(u32::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tier::bounded(1, 200, dec!(280)).to_string(), "1 a 200");
        assert_eq!(Tier::unbounded(501, dec!(220)).to_string(), "501 a +");
    }

    #[test]
    fn test_json_null_max_is_unbounded() {
        let tier: Tier =
            serde_json::from_str(r#"{"minQuantity": 1001, "maxQuantity": null, "unitPrice": 115}"#)
                .expect("tier json");
        assert_eq!(tier, Tier::unbounded(1001, dec!(115)));

        let missing: Tier = serde_json::from_str(r#"{"minQuantity": 5, "unitPrice": 1.5}"#)
            .expect("tier json without max");
        assert_eq!(missing, Tier::unbounded(5, dec!(1.5)));
    }
}
