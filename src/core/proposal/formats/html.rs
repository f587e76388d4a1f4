//! HTML proposal generator
//!
//! Renders a self-contained page (inline CSS, no scripts) through an askama
//! template. Client and catalog strings are HTML-escaped by the template
//! engine; amounts are formatted before they reach it.

use crate::core::proposal::{ProposalContext, ProposalGenerator, ABOUT, CONTACT, NEXT_STEPS};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

struct Row {
    label: String,
    value: String,
}

struct ExtraRow {
    name: String,
    quantity: u32,
    amount: String,
}

struct LineRow {
    name: String,
    detail: String,
    amount: String,
}

struct PhaseView {
    label: String,
    timeline: String,
    description: String,
    lines: Vec<LineRow>,
    subtotal: String,
}

#[derive(Template)]
#[template(path = "proposal.html")]
struct ProposalPage {
    issue_date: String,
    valid_until: String,
    validity_days: u32,
    client_rows: Vec<Row>,
    course_name: String,
    course_description: String,
    features: Vec<String>,
    quantity: String,
    tier_range: String,
    tier_price: String,
    course_base: String,
    has_extras: bool,
    extras: Vec<ExtraRow>,
    course_extras: String,
    phases: Vec<PhaseView>,
    course_phases: String,
    final_total: String,
    average_per_unit: String,
    next_steps: Vec<String>,
    about: String,
    contact: Vec<String>,
}

impl ProposalPage {
    fn from_context(ctx: &ProposalContext) -> Self {
        let breakdown = &ctx.quote.total.breakdown;

        let client_rows = ctx
            .client
            .rows()
            .into_iter()
            .map(|(label, value)| Row {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect();

        let extras: Vec<ExtraRow> = ctx
            .extras()
            .iter()
            .map(|extra| ExtraRow {
                name: extra.feature.name.clone(),
                quantity: extra.quantity,
                amount: ctx.money(extra.amount),
            })
            .collect();

        let phases = ctx
            .phases()
            .iter()
            .map(|phase| PhaseView {
                label: phase.phase.label(),
                timeline: phase.phase.timeline.clone(),
                description: phase.phase.description.clone(),
                lines: phase
                    .lines
                    .iter()
                    .map(|eval| LineRow {
                        name: eval.line.name.clone(),
                        detail: ctx.line_detail(eval),
                        amount: ctx.money(eval.amount),
                    })
                    .collect(),
                subtotal: ctx.money(phase.subtotal),
            })
            .collect();

        Self {
            issue_date: ctx.issue_date_label(),
            valid_until: ctx.valid_until_label(),
            validity_days: ctx.validity_days,
            client_rows,
            course_name: ctx.course_name().to_string(),
            course_description: ctx.course_description().to_string(),
            features: ctx.course_features().to_vec(),
            quantity: ctx.quantity_label(),
            tier_range: ctx.tier_label(),
            tier_price: ctx.tier_price_label(),
            course_base: ctx.money(breakdown.course_base),
            has_extras: !extras.is_empty(),
            extras,
            course_extras: ctx.money(breakdown.course_extras),
            phases,
            course_phases: ctx.money(breakdown.course_phases),
            final_total: ctx.money(ctx.quote.final_total()),
            average_per_unit: ctx.average_label(),
            next_steps: NEXT_STEPS.iter().map(ToString::to_string).collect(),
            about: ABOUT.to_string(),
            contact: CONTACT.iter().map(ToString::to_string).collect(),
        }
    }
}

/// HTML proposal generator
pub struct HtmlProposal;

impl HtmlProposal {
    /// Create a new HTML generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlProposal {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalGenerator for HtmlProposal {
    fn generate(&self, ctx: &ProposalContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }

    fn render(&self, ctx: &ProposalContext) -> Result<String, Box<dyn Error>> {
        Ok(ProposalPage::from_context(ctx).render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Catalog, Selection};
    use crate::core::pricing::price_quote;
    use crate::core::proposal::ClientInfo;
    use chrono::NaiveDate;

    #[test]
    fn test_client_strings_are_escaped() {
        let catalog = Catalog::builtin();
        let quote = price_quote(&catalog, "group-online", &Selection::default()).expect("quote");
        let client = ClientInfo {
            school_name: "Escola <b>Teste</b> & Cia".to_string(),
            ..ClientInfo::default()
        };
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("date");
        let ctx = ProposalContext::new(&quote, &client, date);

        let html = HtmlProposal::new().render(&ctx).expect("render");
        assert!(!html.contains("<b>Teste</b>"));
        assert!(html.contains("&lt;b&gt;Teste&lt;"));
        assert!(html.contains("&amp; Cia"));
        assert!(html.contains("Válida até:"));
        assert!(html.contains("[Nome do Cliente]"));
    }

    #[test]
    fn test_render_has_all_sections() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::with_quantity(250);
        selection.select_all_phases(&catalog);
        let quote = price_quote(&catalog, "santa-catarina-completo", &selection).expect("quote");
        let client = ClientInfo::default();
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("date");
        let ctx = ProposalContext::new(&quote, &client, date).with_validity_days(15);

        let html = HtmlProposal::new().render(&ctx).expect("render");
        for heading in [
            "Dados do Cliente",
            "Detalhamento Financeiro",
            "Roteiro de Implementação",
            "INVESTIMENTO TOTAL",
            "Próximos Passos",
            "Contato para Dúvidas",
        ] {
            assert!(html.contains(heading), "missing {heading}");
        }
        assert!(html.contains("201 a 500 professores"));
        assert!(html.contains("Proposta válida por 15 dias"));
        assert!(!html.contains("Recursos Adicionais"));
    }
}
