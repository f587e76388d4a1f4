//! Markdown proposal generator
//!
//! Fills an embedded template by `{{placeholder}}` substitution. The output
//! renders well in GitHub, GitLab and most Markdown previewers.

use crate::core::proposal::{ProposalContext, ProposalGenerator, ABOUT, CONTACT, NEXT_STEPS};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown proposal template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/proposal.md");

/// Markdown proposal generator
pub struct MarkdownProposal;

impl MarkdownProposal {
    /// Create a new Markdown generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the proposal using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ProposalContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();
        let breakdown = &ctx.quote.total.breakdown;

        output = output.replace("{{issue_date}}", &ctx.issue_date_label());
        output = output.replace("{{valid_until}}", &ctx.valid_until_label());
        output = output.replace("{{validity_days}}", &ctx.validity_days.to_string());

        output = output.replace("{{quantity}}", &ctx.quantity_label());
        output = output.replace("{{tier_range}}", &ctx.tier_label());
        output = output.replace("{{tier_price}}", &ctx.tier_price_label());

        output = output.replace("{{course_base}}", &ctx.money(breakdown.course_base));
        output = output.replace("{{course_extras}}", &ctx.money(breakdown.course_extras));
        output = output.replace("{{course_phases}}", &ctx.money(breakdown.course_phases));
        output = output.replace("{{final_total}}", &ctx.money(ctx.quote.final_total()));
        output = output.replace("{{average_per_unit}}", &ctx.average_label());

        output = output.replace("{{extras_section}}", &Self::extras_section(ctx));
        output = output.replace("{{phases_section}}", &Self::phases_section(ctx));

        output = output.replace("{{next_steps}}", &numbered(&NEXT_STEPS));
        output = output.replace("{{about}}", ABOUT);
        output = output.replace("{{contact}}", &bulleted(CONTACT.iter().copied()));

        // Catalog and client text last so their content is never re-scanned
        output = output.replace(
            "{{course_features}}",
            &bulleted(ctx.course_features().iter().map(String::as_str)),
        );
        output = output.replace("{{course_description}}", ctx.course_description());
        output = output.replace("{{course_name}}", ctx.course_name());
        output = output.replace("{{client_rows}}", &Self::client_rows(ctx));

        output
    }

    fn client_rows(ctx: &ProposalContext) -> String {
        let mut rows = String::new();
        for (label, value) in ctx.client.rows() {
            let _ = writeln!(rows, "- **{label}:** {value}");
        }
        rows
    }

    /// Extras list, or nothing when no extra was priced
    fn extras_section(ctx: &ProposalContext) -> String {
        let extras = ctx.extras();
        if extras.is_empty() {
            return String::new();
        }

        let mut section = String::from("### Recursos Adicionais\n\n");
        for extra in extras {
            let _ = writeln!(
                section,
                "- {} ({}x): {}",
                extra.feature.name,
                extra.quantity,
                ctx.money(extra.amount)
            );
        }
        let _ = writeln!(
            section,
            "\n**Total recursos extras:** {}\n",
            ctx.money(ctx.quote.course.extra_total)
        );
        section
    }

    /// One table per selected phase
    fn phases_section(ctx: &ProposalContext) -> String {
        let phases = ctx.phases();
        if phases.is_empty() {
            return "Nenhuma fase selecionada.\n".to_string();
        }

        let mut section = String::new();
        for phase in phases {
            let _ = write!(section, "### {}", phase.phase.label());
            if !phase.phase.timeline.is_empty() {
                let _ = write!(section, " ({})", phase.phase.timeline);
            }
            section.push_str("\n\n");
            if !phase.phase.description.is_empty() {
                let _ = writeln!(section, "{}\n", phase.phase.description);
            }

            section.push_str("| Item | Detalhe | Valor |\n|---|---|---|\n");
            for eval in &phase.lines {
                let _ = writeln!(
                    section,
                    "| {} | {} | {} |",
                    eval.line.name,
                    ctx.line_detail(eval),
                    ctx.money(eval.amount)
                );
            }
            let _ = writeln!(
                section,
                "| **Subtotal** | | **{}** |\n",
                ctx.money(phase.subtotal)
            );
        }
        section
    }
}

fn bulleted<'s>(items: impl Iterator<Item = &'s str>) -> String {
    let mut list = String::new();
    for item in items {
        let _ = writeln!(list, "- {item}");
    }
    list
}

fn numbered(items: &[&str]) -> String {
    let mut list = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(list, "{}. {item}", i + 1);
    }
    list
}

impl Default for MarkdownProposal {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalGenerator for MarkdownProposal {
    fn generate(&self, ctx: &ProposalContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }

    fn render(&self, ctx: &ProposalContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
