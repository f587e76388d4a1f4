//! Roadmap phase and pricing line models

use super::tier::Tier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a pricing line computes its amount.
///
/// Serialized as an internally tagged object: `{"kind": "per_unit", "unitPrice": 150}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LineKind {
    /// Unit price multiplied by the line's quantity
    PerUnit {
        /// Price per unit
        unit_price: Decimal,
    },
    /// Flat amount, independent of quantity
    Fixed {
        /// Flat amount
        amount: Decimal,
    },
    /// Amount typed in by the user, seeded by an optional default
    Manual {
        /// Amount used when the selection holds no override
        #[serde(default)]
        default_amount: Option<Decimal>,
        /// Whether hosts should offer an input for this line
        #[serde(default)]
        editable: bool,
    },
    /// Unit price picked from a tier list by quantity
    Tiered {
        /// Quantity tiers, ordered
        tiers: Vec<Tier>,
    },
}

impl LineKind {
    /// Short label as used in the catalog JSON
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PerUnit { .. } => "per_unit",
            Self::Fixed { .. } => "fixed",
            Self::Manual { .. } => "manual",
            Self::Tiered { .. } => "tiered",
        }
    }

    /// Whether the line's amount depends on a quantity
    #[must_use]
    pub const fn uses_quantity(&self) -> bool {
        matches!(self, Self::PerUnit { .. } | Self::Tiered { .. })
    }
}

/// One billable component of a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingLine {
    /// Identifier, unique within its phase
    pub id: String,

    /// Display name
    pub name: String,

    /// Pricing rule and its data
    #[serde(flatten)]
    pub kind: LineKind,
}

/// An implementation stage of the roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Identifier (e.g., "fase0")
    pub id: String,

    /// Short name (e.g., "Fase 0")
    pub name: String,

    /// Title (e.g., "Preparação")
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Human-readable schedule (e.g., "1º Sem 2026")
    #[serde(default)]
    pub timeline: String,

    /// Year the phase starts
    #[serde(default)]
    pub year: Option<i32>,

    /// Billable lines, in display order
    #[serde(default)]
    pub pricing_lines: Vec<PricingLine>,
}

impl Phase {
    /// Look up a pricing line by id
    #[must_use]
    pub fn line(&self, id: &str) -> Option<&PricingLine> {
        self.pricing_lines.iter().find(|l| l.id == id)
    }

    /// Display label combining name and title (e.g., "Fase 0 - Preparação")
    #[must_use]
    pub fn label(&self) -> String {
        if self.title.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_kinds_parse_from_tagged_json() {
        let json = r#"[
            {"id": "a", "name": "A", "kind": "per_unit", "unitPrice": 150},
            {"id": "b", "name": "B", "kind": "fixed", "amount": 45000},
            {"id": "c", "name": "C", "kind": "manual", "defaultAmount": 50000, "editable": true},
            {"id": "d", "name": "D", "kind": "manual"},
            {"id": "e", "name": "E", "kind": "tiered",
             "tiers": [{"minQuantity": 1, "maxQuantity": 5000, "unitPrice": 20}]}
        ]"#;
        let lines: Vec<PricingLine> = serde_json::from_str(json).expect("lines json");

        assert_eq!(lines[0].kind, LineKind::PerUnit { unit_price: dec!(150) });
        assert_eq!(lines[1].kind, LineKind::Fixed { amount: dec!(45000) });
        assert_eq!(
            lines[2].kind,
            LineKind::Manual {
                default_amount: Some(dec!(50000)),
                editable: true
            }
        );
        assert_eq!(
            lines[3].kind,
            LineKind::Manual {
                default_amount: None,
                editable: false
            }
        );
        assert_eq!(
            lines[4].kind,
            LineKind::Tiered {
                tiers: vec![Tier::bounded(1, 5000, dec!(20))]
            }
        );
    }

    #[test]
    fn test_tiered_line_without_tiers_is_rejected() {
        let json = r#"{"id": "e", "name": "E", "kind": "tiered"}"#;
        assert!(serde_json::from_str::<PricingLine>(json).is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"id": "x", "name": "X", "kind": "per_student", "unitPrice": 1}"#;
        assert!(serde_json::from_str::<PricingLine>(json).is_err());
    }

    #[test]
    fn test_phase_label_and_line_lookup() {
        let phase = Phase {
            id: "fase0".to_string(),
            name: "Fase 0".to_string(),
            title: "Preparação".to_string(),
            description: String::new(),
            timeline: "Fev 2026".to_string(),
            year: Some(2026),
            pricing_lines: vec![PricingLine {
                id: "curso-ia".to_string(),
                name: "Curso de IA para Professores".to_string(),
                kind: LineKind::PerUnit {
                    unit_price: dec!(150),
                },
            }],
        };
        assert_eq!(phase.label(), "Fase 0 - Preparação");
        assert!(phase.line("curso-ia").is_some());
        assert!(phase.line("missing").is_none());
        assert!(phase.pricing_lines[0].kind.uses_quantity());
    }
}
