//! Quote command handler

use crate::args::SelectionArgs;
use crate::commands::catalog::active_catalog;
use rust_decimal::Decimal;
use std::fmt::Write;
use teach_pricing::config::Config;
use teach_pricing::core::models::selection::{parse_assignment, parse_line_assignment};
use teach_pricing::core::models::{Catalog, Selection};
use teach_pricing::core::pricing::{price_quote, Quote};
use teach_pricing::core::proposal::{format_currency, format_integer};
use teach_pricing::SelectionError;
use teach_pricing::{debug, verbose, warn};

/// Run the quote command
pub fn run(args: &SelectionArgs, json: bool, config: &Config) {
    let catalog = match active_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let selection = match build_selection(args, &catalog, config) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let Some(quote) = price_quote(&catalog, &args.course, &selection) else {
        eprintln!("✗ Unknown course offering: '{}'", args.course);
        eprintln!("  Available: {}", course_ids(&catalog));
        std::process::exit(1);
    };

    for diagnostic in quote.diagnostics() {
        warn!("{diagnostic}");
    }

    if json {
        match serde_json::to_string_pretty(&quote) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("✗ Failed to serialize quote: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_quote(&quote, &config.pricing.currency_symbol));
    }
}

/// Comma-separated course ids of a catalog
pub fn course_ids(catalog: &Catalog) -> String {
    catalog
        .courses
        .iter()
        .map(|c| c.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a selection from a saved file (if any) and the command-line flags
///
/// Quantities are clamped to `1..=max_quantity` the way an interactive host
/// clamps its inputs; a clamp is logged as a warning.
///
/// # Errors
/// Returns an error for unreadable selection files, malformed assignments,
/// and quantities or manual amounts `Selection::validate` rejects.
pub fn build_selection(
    args: &SelectionArgs,
    catalog: &Catalog,
    config: &Config,
) -> Result<Selection, SelectionError> {
    let max = config.pricing.max_quantity;

    let mut selection = match &args.selection {
        Some(path) => {
            debug!("Loading selection from {}", path.display());
            Selection::from_file(path)?
        }
        None => Selection {
            quantity: config.pricing.default_quantity,
            ..Selection::default()
        },
    };

    if let Some(quantity) = args.quantity {
        selection.set_quantity(quantity, max);
        if selection.quantity != quantity {
            warn!(
                "Quantity {quantity} is outside 1..={max}; using {}",
                selection.quantity
            );
        }
    }

    if args.all_phases {
        selection.select_all_phases(catalog);
    } else if args.no_phases {
        selection.clear_phases();
    } else if !args.phases.is_empty() {
        selection.clear_phases();
        selection
            .selected_phase_ids
            .extend(args.phases.iter().cloned());
    }

    for assignment in &args.extras {
        let (feature_id, quantity) = parse_assignment::<u32>(assignment)?;
        selection.set_extra_feature(&feature_id, quantity);
    }

    for assignment in &args.overrides {
        let (phase_id, line_id, amount) = parse_line_assignment::<Decimal>(assignment)?;
        selection.set_manual_override(&phase_id, &line_id, amount);
    }

    for assignment in &args.line_quantities {
        let (phase_id, line_id, quantity) = parse_line_assignment::<u32>(assignment)?;
        selection.set_line_quantity(&phase_id, &line_id, quantity, max);
    }
    selection.validate(max)?;

    verbose!(
        "Selection: {} units, phases [{}]",
        selection.quantity,
        selection
            .selected_phase_ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(selection)
}

/// Render a quote as a plain-text breakdown
pub fn format_quote(quote: &Quote<'_>, symbol: &str) -> String {
    let money = |amount: Decimal| format_currency(amount, symbol);
    let course = &quote.course;
    let mut out = String::new();

    let _ = writeln!(out, "\n=== {} ===\n", course.course.name);
    let _ = writeln!(out, "Quantity:        {}", format_integer(quote.quantity));
    match course.matched_tier {
        Some(tier) => {
            let _ = writeln!(out, "Tier:            {tier} @ {}", money(tier.unit_price));
        }
        None => {
            let _ = writeln!(out, "Tier:            (no tier for this quantity)");
        }
    }
    let _ = writeln!(out, "Course base:     {}", money(course.base_total));

    for extra in &course.extras {
        let _ = writeln!(
            out,
            "  + {} ({}x): {}",
            extra.feature.name,
            extra.quantity,
            money(extra.amount)
        );
    }
    if !course.extras.is_empty() {
        let _ = writeln!(out, "Extras:          {}", money(course.extra_total));
    }

    for phase in &quote.phases.phases {
        let _ = writeln!(out, "\n{}", phase.phase.label());
        for eval in &phase.lines {
            let marker = if eval.basis.is_degraded() { " (!)" } else { "" };
            let _ = writeln!(out, "  {:<40} {:>18}{marker}", eval.line.name, money(eval.amount));
        }
        let _ = writeln!(out, "  {:<40} {:>18}", "Subtotal", money(phase.subtotal));
    }

    let breakdown = &quote.total.breakdown;
    let _ = writeln!(out, "\n--- Total ---");
    let _ = writeln!(out, "Course base:     {}", money(breakdown.course_base));
    let _ = writeln!(out, "Course extras:   {}", money(breakdown.course_extras));
    let _ = writeln!(out, "Phases:          {}", money(breakdown.course_phases));
    let _ = writeln!(out, "Final total:     {}", money(quote.final_total()));
    let _ = writeln!(
        out,
        "Per unit:        {}",
        quote
            .average_per_unit()
            .map_or_else(|| "—".to_string(), money)
    );

    out
}
