//! Phase aggregation
//!
//! Sums line contributions per selected phase and across phases. Phases come
//! out in catalog order regardless of the order they were selected in.

use super::diagnostics::Diagnostic;
use super::line::{evaluate_line, LineBasis, LineEvaluation};
use crate::core::models::selection::LineMap;
use crate::core::models::{Phase, PricingLine};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One selected phase with its priced lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSubtotal<'a> {
    /// The phase
    pub phase: &'a Phase,
    /// Every line of the phase, in catalog order
    pub lines: Vec<LineEvaluation<'a>>,
    /// Sum of the line amounts
    pub subtotal: Decimal,
}

/// Totals for the selected phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseAggregation<'a> {
    /// Selected phases in catalog order
    pub phases: Vec<PhaseSubtotal<'a>>,
    /// Sum of all phase subtotals
    pub total: Decimal,
    /// Degradations met along the way
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> PhaseAggregation<'a> {
    /// Subtotal per phase id
    #[must_use]
    pub fn per_phase_totals(&self) -> BTreeMap<&'a str, Decimal> {
        self.phases
            .iter()
            .map(|p| (p.phase.id.as_str(), p.subtotal))
            .collect()
    }

    /// Selected phases in catalog order
    pub fn selected_phases(&self) -> impl Iterator<Item = &'a Phase> + '_ {
        self.phases.iter().map(|p| p.phase)
    }

    /// Subtotal of one phase, `None` if it was not selected
    #[must_use]
    pub fn subtotal(&self, phase_id: &str) -> Option<Decimal> {
        self.phases
            .iter()
            .find(|p| p.phase.id == phase_id)
            .map(|p| p.subtotal)
    }
}

/// Price every selected phase of `catalog_phases`.
///
/// For each line the quantity is `line_quantity_overrides[phase][line]` if
/// present, otherwise `global_quantity`; the manual override is
/// `manual_overrides[phase][line]` if present. Selected ids missing from the
/// catalog, and overrides aimed at lines a selected phase does not have, are
/// ignored and reported as diagnostics.
#[must_use]
pub fn aggregate_phases<'a>(
    catalog_phases: &'a [Phase],
    selected_phase_ids: &BTreeSet<String>,
    global_quantity: u32,
    manual_overrides: &LineMap<Decimal>,
    line_quantity_overrides: &LineMap<u32>,
) -> PhaseAggregation<'a> {
    let mut diagnostics = Vec::new();

    for phase_id in selected_phase_ids {
        if !catalog_phases.iter().any(|p| &p.id == phase_id) {
            Diagnostic::UnknownPhase {
                phase_id: phase_id.clone(),
            }
            .record(&mut diagnostics);
        }
    }

    let mut phases = Vec::new();
    let mut total = Decimal::ZERO;
    for phase in catalog_phases
        .iter()
        .filter(|p| selected_phase_ids.contains(&p.id))
    {
        let manual = manual_overrides.get(&phase.id);
        let quantities = line_quantity_overrides.get(&phase.id);

        report_stale_lines(phase, manual.into_iter().flat_map(BTreeMap::keys), &mut diagnostics);
        report_stale_lines(
            phase,
            quantities.into_iter().flat_map(BTreeMap::keys),
            &mut diagnostics,
        );

        let mut lines: Vec<LineEvaluation<'a>> = phase
            .pricing_lines
            .iter()
            .map(|line| {
                let quantity = quantities
                    .and_then(|q| q.get(&line.id))
                    .copied()
                    .unwrap_or(global_quantity);
                let override_amount = manual.and_then(|m| m.get(&line.id)).copied();
                let eval = evaluate_line(line, quantity, override_amount);
                match eval.basis {
                    LineBasis::TierNotFound => Diagnostic::LineTierNotFound {
                        phase_id: phase.id.clone(),
                        line_id: line.id.clone(),
                        quantity,
                    }
                    .record(&mut diagnostics),
                    LineBasis::MissingManualAmount => Diagnostic::MissingManualAmount {
                        phase_id: phase.id.clone(),
                        line_id: line.id.clone(),
                    }
                    .record(&mut diagnostics),
                    LineBasis::Overflow => overflow(phase, line).record(&mut diagnostics),
                    _ => {}
                }
                eval
            })
            .collect();

        // A line that would overflow the subtotal or the running total is
        // zeroed so both stay exact sums of what is shown
        let mut subtotal = Decimal::ZERO;
        for eval in &mut lines {
            match (subtotal.checked_add(eval.amount), total.checked_add(eval.amount)) {
                (Some(next_subtotal), Some(next_total)) => {
                    subtotal = next_subtotal;
                    total = next_total;
                }
                _ => {
                    overflow(phase, eval.line).record(&mut diagnostics);
                    eval.amount = Decimal::ZERO;
                    eval.basis = LineBasis::Overflow;
                }
            }
        }
        phases.push(PhaseSubtotal {
            phase,
            lines,
            subtotal,
        });
    }

    PhaseAggregation {
        phases,
        total,
        diagnostics,
    }
}

fn overflow(phase: &Phase, line: &PricingLine) -> Diagnostic {
    Diagnostic::AmountOverflow {
        scope: format!("phase {} line {}", phase.id, line.id),
    }
}

fn report_stale_lines<'k>(
    phase: &Phase,
    line_ids: impl Iterator<Item = &'k String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for line_id in line_ids {
        if phase.line(line_id).is_none() {
            Diagnostic::UnknownLineReference {
                phase_id: phase.id.clone(),
                line_id: line_id.clone(),
            }
            .record(diagnostics);
        }
    }
}
