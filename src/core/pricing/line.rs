//! Pricing line evaluation

use super::tier_resolver::resolve_tier;
use crate::core::models::{LineKind, PricingLine, Tier};
use rust_decimal::Decimal;
use serde::Serialize;

/// Where a line's amount came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum LineBasis<'a> {
    /// `unit_price × quantity`
    PerUnit {
        /// Unit price applied
        unit_price: Decimal,
    },
    /// Flat amount
    Fixed,
    /// The selection's manual override (possibly an explicit zero)
    ManualOverride,
    /// The line's default amount, no override present
    ManualDefault,
    /// Manual line with neither override nor default; contributes zero
    MissingManualAmount,
    /// Tier price × quantity
    Tier {
        /// Tier that matched
        tier: &'a Tier,
    },
    /// No tier covers the quantity; contributes zero
    TierNotFound,
    /// The amount does not fit a `Decimal`; contributes zero
    Overflow,
}

impl LineBasis<'_> {
    /// Whether the amount is a fallback zero rather than a priced value
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(
            self,
            Self::MissingManualAmount | Self::TierNotFound | Self::Overflow
        )
    }
}

/// Result of pricing one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEvaluation<'a> {
    /// The line that was priced
    pub line: &'a PricingLine,
    /// Quantity the line was priced at (ignored by fixed and manual lines)
    pub quantity: u32,
    /// Contribution of the line
    pub amount: Decimal,
    /// How the amount was obtained
    pub basis: LineBasis<'a>,
}

/// Price one line at `quantity`.
///
/// `manual_override` only matters for manual lines. Presence is the signal:
/// `Some(0)` prices the line at zero, `None` falls back to the default amount.
/// Never fails; lines that cannot be priced contribute zero with a degraded
/// [`LineBasis`].
#[must_use]
pub fn evaluate_line(
    line: &PricingLine,
    quantity: u32,
    manual_override: Option<Decimal>,
) -> LineEvaluation<'_> {
    let units = Decimal::from(quantity);
    let (amount, basis) = match &line.kind {
        LineKind::PerUnit { unit_price } => match unit_price.checked_mul(units) {
            Some(amount) => (
                amount,
                LineBasis::PerUnit {
                    unit_price: *unit_price,
                },
            ),
            None => (Decimal::ZERO, LineBasis::Overflow),
        },
        LineKind::Fixed { amount } => (*amount, LineBasis::Fixed),
        LineKind::Manual { default_amount, .. } => match (manual_override, default_amount) {
            (Some(value), _) => (value, LineBasis::ManualOverride),
            (None, Some(default)) => (*default, LineBasis::ManualDefault),
            (None, None) => (Decimal::ZERO, LineBasis::MissingManualAmount),
        },
        LineKind::Tiered { tiers } => match resolve_tier(tiers, quantity) {
            Some(tier) => match tier.unit_price.checked_mul(units) {
                Some(amount) => (amount, LineBasis::Tier { tier }),
                None => (Decimal::ZERO, LineBasis::Overflow),
            },
            None => (Decimal::ZERO, LineBasis::TierNotFound),
        },
    };

    LineEvaluation {
        line,
        quantity,
        amount,
        basis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(kind: LineKind) -> PricingLine {
        PricingLine {
            id: "line".to_string(),
            name: "Line".to_string(),
            kind,
        }
    }

    #[test]
    fn test_per_unit_is_linear() {
        let l = line(LineKind::PerUnit {
            unit_price: dec!(150),
        });
        assert_eq!(evaluate_line(&l, 100, None).amount, dec!(15000));
        assert_eq!(evaluate_line(&l, 0, None).amount, dec!(0));
    }

    #[test]
    fn test_fixed_ignores_quantity() {
        let l = line(LineKind::Fixed {
            amount: dec!(45000),
        });
        assert_eq!(evaluate_line(&l, 1, None).amount, dec!(45000));
        assert_eq!(evaluate_line(&l, 50_000, None).amount, dec!(45000));
    }

    #[test]
    fn test_fixed_ignores_manual_override() {
        let l = line(LineKind::Fixed {
            amount: dec!(45000),
        });
        assert_eq!(evaluate_line(&l, 1, Some(dec!(1))).amount, dec!(45000));
    }

    #[test]
    fn test_manual_explicit_zero_beats_default() {
        let l = line(LineKind::Manual {
            default_amount: Some(dec!(50000)),
            editable: true,
        });
        let zero = evaluate_line(&l, 100, Some(Decimal::ZERO));
        assert_eq!(zero.amount, dec!(0));
        assert_eq!(zero.basis, LineBasis::ManualOverride);

        let absent = evaluate_line(&l, 100, None);
        assert_eq!(absent.amount, dec!(50000));
        assert_eq!(absent.basis, LineBasis::ManualDefault);
    }

    #[test]
    fn test_manual_without_default_is_observable_zero() {
        let l = line(LineKind::Manual {
            default_amount: None,
            editable: true,
        });
        let eval = evaluate_line(&l, 100, None);
        assert_eq!(eval.amount, dec!(0));
        assert_eq!(eval.basis, LineBasis::MissingManualAmount);
        assert!(eval.basis.is_degraded());

        let explicit = evaluate_line(&l, 100, Some(dec!(0)));
        assert_eq!(explicit.basis, LineBasis::ManualOverride);
        assert!(!explicit.basis.is_degraded());
    }

    #[test]
    fn test_tiered_uses_matched_tier() {
        let l = line(LineKind::Tiered {
            tiers: vec![
                Tier::bounded(1, 5000, dec!(20)),
                Tier::unbounded(5001, dec!(15)),
            ],
        });
        let eval = evaluate_line(&l, 3000, None);
        assert_eq!(eval.amount, dec!(60000));
        assert!(matches!(
            eval.basis,
            LineBasis::Tier { tier } if tier.unit_price == dec!(20)
        ));
        assert_eq!(evaluate_line(&l, 5001, None).amount, dec!(75015));
    }

    #[test]
    fn test_tiered_without_match_is_observable_zero() {
        let l = line(LineKind::Tiered {
            tiers: vec![Tier::bounded(1, 10, dec!(20))],
        });
        let eval = evaluate_line(&l, 11, None);
        assert_eq!(eval.amount, dec!(0));
        assert_eq!(eval.basis, LineBasis::TierNotFound);

        let empty = line(LineKind::Tiered { tiers: Vec::new() });
        assert_eq!(evaluate_line(&empty, 5, None).basis, LineBasis::TierNotFound);
    }

    #[test]
    fn test_product_too_large_is_observable_zero() {
        let per_unit = line(LineKind::PerUnit {
            unit_price: Decimal::MAX,
        });
        let eval = evaluate_line(&per_unit, 2, None);
        assert_eq!(eval.amount, dec!(0));
        assert_eq!(eval.basis, LineBasis::Overflow);
        assert!(eval.basis.is_degraded());

        let tiered = line(LineKind::Tiered {
            tiers: vec![Tier::unbounded(1, Decimal::MAX)],
        });
        assert_eq!(evaluate_line(&tiered, 1, None).amount, Decimal::MAX);
        assert_eq!(evaluate_line(&tiered, 3, None).basis, LineBasis::Overflow);
    }
}
