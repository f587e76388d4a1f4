//! Catalog of course offerings and roadmap phases

use super::course::CourseOffering;
use super::phase::{LineKind, Phase};
use super::tier::Tier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Compiled-in default catalog
const BUILTIN_CATALOG: &str = include_str!("../../assets/DefaultCatalog.json");

/// Everything a quote is priced against.
///
/// A catalog is an immutable snapshot. Administrative edits produce a new
/// catalog that replaces the old one wholesale between computations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Course offerings, in display order
    #[serde(default)]
    pub courses: Vec<CourseOffering>,

    /// Roadmap phases, in roadmap order
    #[serde(default)]
    pub phases: Vec<Phase>,
}

/// Non-fatal problem found in a catalog.
///
/// These never stop a catalog from loading; pricing degrades through the
/// "no tier" and zero-amount paths instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// A tier list has no tiers at all
    EmptyTiers {
        /// Where the list lives (e.g., "course async-digital")
        owner: String,
    },
    /// Two consecutive tiers overlap or leave a gap between them
    NonContiguousTiers {
        /// Where the list lives
        owner: String,
        /// Index of the later tier of the pair
        index: usize,
    },
    /// A tier with no upper bound is followed by more tiers
    UnboundedTierNotLast {
        /// Where the list lives
        owner: String,
        /// Index of the unbounded tier
        index: usize,
    },
    /// A tier whose upper bound is below its lower bound
    InvertedTier {
        /// Where the list lives
        owner: String,
        /// Index of the tier
        index: usize,
    },
    /// The same id appears twice in one scope
    DuplicateId {
        /// Scope of the id (e.g., "course", "phase fase1 line")
        scope: String,
        /// The repeated id
        id: String,
    },
    /// An extra feature defines neither a unit price nor a fixed price
    UnpricedExtraFeature {
        /// Owning course id
        course_id: String,
        /// Feature id
        feature_id: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTiers { owner } => write!(f, "{owner}: tier list is empty"),
            Self::NonContiguousTiers { owner, index } => {
                write!(f, "{owner}: tier {index} does not start right after tier {}", index - 1)
            }
            Self::UnboundedTierNotLast { owner, index } => {
                write!(f, "{owner}: unbounded tier {index} is not the last tier")
            }
            Self::InvertedTier { owner, index } => {
                write!(f, "{owner}: tier {index} ends before it starts")
            }
            Self::DuplicateId { scope, id } => write!(f, "duplicate {scope} id '{id}'"),
            Self::UnpricedExtraFeature {
                course_id,
                feature_id,
            } => write!(
                f,
                "course {course_id}: extra feature '{feature_id}' has no unit or fixed price"
            ),
        }
    }
}

impl Catalog {
    /// The compiled-in default catalog
    ///
    /// # Panics
    /// Panics if the embedded catalog is not valid JSON. It is compiled into
    /// the binary and covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_CATALOG).expect("Failed to parse compiled-in default catalog")
    }

    /// Look up a course offering by id
    #[must_use]
    pub fn find_course(&self, id: &str) -> Option<&CourseOffering> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Look up a phase by id
    #[must_use]
    pub fn find_phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Phase ids in catalog order
    pub fn phase_ids(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|p| p.id.as_str())
    }

    /// Check the catalog for shape problems that pricing would silently absorb
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        check_unique("course", self.courses.iter().map(|c| c.id.as_str()), &mut issues);
        check_unique("phase", self.phase_ids(), &mut issues);

        for course in &self.courses {
            check_tiers(&format!("course {}", course.id), &course.tiers, &mut issues);
            check_unique(
                &format!("course {} extra feature", course.id),
                course.extra_features.iter().map(|f| f.id.as_str()),
                &mut issues,
            );
            for feature in &course.extra_features {
                if feature.unit_price.is_none() && feature.fixed_price.is_none() {
                    issues.push(CatalogIssue::UnpricedExtraFeature {
                        course_id: course.id.clone(),
                        feature_id: feature.id.clone(),
                    });
                }
            }
        }

        for phase in &self.phases {
            check_unique(
                &format!("phase {} line", phase.id),
                phase.pricing_lines.iter().map(|l| l.id.as_str()),
                &mut issues,
            );
            for line in &phase.pricing_lines {
                if let LineKind::Tiered { tiers } = &line.kind {
                    check_tiers(
                        &format!("phase {} line {}", phase.id, line.id),
                        tiers,
                        &mut issues,
                    );
                }
            }
        }

        issues
    }
}

fn check_unique<'a>(
    scope: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<CatalogIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(CatalogIssue::DuplicateId {
                scope: scope.to_string(),
                id: id.to_string(),
            });
        }
    }
}

fn check_tiers(owner: &str, tiers: &[Tier], issues: &mut Vec<CatalogIssue>) {
    if tiers.is_empty() {
        issues.push(CatalogIssue::EmptyTiers {
            owner: owner.to_string(),
        });
        return;
    }

    for (index, tier) in tiers.iter().enumerate() {
        if tier.max_quantity.is_some_and(|max| max < tier.min_quantity) {
            issues.push(CatalogIssue::InvertedTier {
                owner: owner.to_string(),
                index,
            });
        }
        if index == 0 {
            continue;
        }
        match tiers[index - 1].max_quantity {
            None => issues.push(CatalogIssue::UnboundedTierNotLast {
                owner: owner.to_string(),
                index: index - 1,
            }),
            Some(prev_max) if prev_max.checked_add(1) != Some(tier.min_quantity) => {
                issues.push(CatalogIssue::NonContiguousTiers {
                    owner: owner.to_string(),
                    index,
                });
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::course::ExtraFeature;
    use rust_decimal_macros::dec;

    fn course_with_tiers(tiers: Vec<Tier>) -> CourseOffering {
        CourseOffering {
            id: "c".to_string(),
            name: "C".to_string(),
            description: String::new(),
            features: Vec::new(),
            tiers,
            extra_features: Vec::new(),
        }
    }

    #[test]
    fn test_builtin_catalog_parses_and_is_clean() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_course("async-digital").is_some());
        assert!(catalog.find_course("santa-catarina-completo").is_some());
        assert_eq!(
            catalog.phase_ids().collect::<Vec<_>>(),
            vec!["fase0", "fase1", "fase2", "fase3", "fase4", "fase5"]
        );
        assert_eq!(catalog.validate(), Vec::new());
    }

    #[test]
    fn test_contiguous_tiers_have_no_issues() {
        let catalog = Catalog {
            courses: vec![course_with_tiers(vec![
                Tier::bounded(1, 200, dec!(150)),
                Tier::bounded(201, 500, dec!(135)),
                Tier::unbounded(501, dec!(125)),
            ])],
            phases: Vec::new(),
        };
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_gap_overlap_and_empty_tiers_are_reported() {
        let catalog = Catalog {
            courses: vec![
                course_with_tiers(vec![
                    Tier::bounded(1, 200, dec!(150)),
                    Tier::bounded(250, 500, dec!(135)),
                    Tier::bounded(400, 600, dec!(120)),
                ]),
                CourseOffering {
                    id: "empty".to_string(),
                    ..course_with_tiers(Vec::new())
                },
            ],
            phases: Vec::new(),
        };
        let issues = catalog.validate();
        assert!(issues.contains(&CatalogIssue::NonContiguousTiers {
            owner: "course c".to_string(),
            index: 1
        }));
        assert!(issues.contains(&CatalogIssue::NonContiguousTiers {
            owner: "course c".to_string(),
            index: 2
        }));
        assert!(issues.contains(&CatalogIssue::EmptyTiers {
            owner: "course empty".to_string()
        }));
    }

    #[test]
    fn test_unbounded_tier_in_the_middle_is_reported() {
        let catalog = Catalog {
            courses: vec![course_with_tiers(vec![
                Tier::unbounded(1, dec!(150)),
                Tier::bounded(201, 500, dec!(135)),
            ])],
            phases: Vec::new(),
        };
        assert_eq!(
            catalog.validate(),
            vec![CatalogIssue::UnboundedTierNotLast {
                owner: "course c".to_string(),
                index: 0
            }]
        );
    }

    #[test]
    fn test_duplicates_and_unpriced_features_are_reported() {
        let mut course = course_with_tiers(vec![Tier::unbounded(1, dec!(10))]);
        course.extra_features.push(ExtraFeature {
            id: "free".to_string(),
            name: "Free".to_string(),
            description: String::new(),
            unit_price: None,
            fixed_price: None,
            is_default: false,
        });
        let catalog = Catalog {
            courses: vec![course.clone(), course],
            phases: Vec::new(),
        };
        let issues = catalog.validate();
        assert!(issues.contains(&CatalogIssue::DuplicateId {
            scope: "course".to_string(),
            id: "c".to_string()
        }));
        assert!(issues.contains(&CatalogIssue::UnpricedExtraFeature {
            course_id: "c".to_string(),
            feature_id: "free".to_string()
        }));
    }
}
