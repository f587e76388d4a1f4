//! Catalog command handler

use crate::args::CatalogSubcommand;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use teach_pricing::config::Config;
use teach_pricing::core::models::{Catalog, CatalogIssue, LineKind};
use teach_pricing::core::proposal::format_currency;
use teach_pricing::{info, load_catalog, save_catalog, warn, CatalogError};

/// Load the catalog the CLI prices against: the persisted one if present,
/// the built-in one otherwise
///
/// # Errors
/// Returns an error if a persisted catalog exists but cannot be read.
pub fn active_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    let catalog = Catalog::load_or_builtin(&config.catalog_path())?;
    for issue in catalog.validate() {
        warn!("Catalog: {issue}");
    }
    Ok(catalog)
}

/// Dispatch catalog subcommands
pub fn run(subcommand: CatalogSubcommand, config: &Config) {
    let result = match subcommand {
        CatalogSubcommand::Show => handle_show(config),
        CatalogSubcommand::Export { file } => handle_export(config, &file),
        CatalogSubcommand::Import { file } => handle_import(config, &file),
        CatalogSubcommand::Validate { file } => handle_validate(config, file.as_deref()),
        CatalogSubcommand::Reset => {
            handle_reset(config);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn handle_show(config: &Config) -> Result<(), CatalogError> {
    let catalog = active_catalog(config)?;
    print!(
        "{}",
        describe_catalog(&catalog, &config.pricing.currency_symbol)
    );
    Ok(())
}

fn handle_export(config: &Config, file: &Path) -> Result<(), CatalogError> {
    let catalog = active_catalog(config)?;
    save_catalog(&catalog, file)?;
    println!("✓ Catalog exported to {}", file.display());
    Ok(())
}

fn handle_import(config: &Config, file: &Path) -> Result<(), CatalogError> {
    let catalog = load_catalog(file)?;
    let issues = catalog.validate();
    for issue in &issues {
        warn!("Catalog: {issue}");
    }

    let target = config.catalog_path();
    save_catalog(&catalog, &target)?;
    info!("Catalog imported from {}", file.display());
    println!(
        "✓ Catalog saved to {} ({} issue(s))",
        target.display(),
        issues.len()
    );
    Ok(())
}

fn handle_validate(config: &Config, file: Option<&Path>) -> Result<(), CatalogError> {
    let catalog = match file {
        Some(path) => load_catalog(path)?,
        None => active_catalog(config)?,
    };
    let issues = catalog.validate();
    print!("{}", describe_issues(&issues));
    if !issues.is_empty() {
        std::process::exit(2);
    }
    Ok(())
}

fn handle_reset(config: &Config) {
    let path = config.catalog_path();
    if !path.exists() {
        println!("✓ Catalog is already the built-in one");
        return;
    }

    print!("Are you sure you want to discard the saved catalog? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Catalog::reset_persisted(&path) {
            eprintln!("Failed to remove catalog file: {e}");
            std::process::exit(1);
        }
        println!("✓ Catalog reset to built-in defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}

/// One line per issue, or a success line when there are none
pub fn describe_issues(issues: &[CatalogIssue]) -> String {
    if issues.is_empty() {
        return "✓ Catalog is valid\n".to_string();
    }
    let mut out = String::new();
    for issue in issues {
        let _ = writeln!(out, "✗ {issue}");
    }
    out
}

/// Human-readable catalog listing
pub fn describe_catalog(catalog: &Catalog, symbol: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n=== Course offerings ===");
    for course in &catalog.courses {
        let _ = writeln!(out, "\n{} ({})", course.name, course.id);
        for tier in &course.tiers {
            let _ = writeln!(
                out,
                "  {tier:<14} {}",
                format_currency(tier.unit_price, symbol)
            );
        }
        for feature in &course.extra_features {
            let price = match (feature.unit_price, feature.fixed_price) {
                (Some(unit), _) => format!("{} per unit", format_currency(unit, symbol)),
                (None, Some(fixed)) => format!("{} fixed", format_currency(fixed, symbol)),
                (None, None) => "unpriced".to_string(),
            };
            let _ = writeln!(out, "  + {} ({}): {price}", feature.name, feature.id);
        }
    }

    let _ = writeln!(out, "\n=== Roadmap phases ===");
    for phase in &catalog.phases {
        let _ = writeln!(out, "\n{} ({})", phase.label(), phase.id);
        for line in &phase.pricing_lines {
            let rule = match &line.kind {
                LineKind::PerUnit { unit_price } => {
                    format!("{} per unit", format_currency(*unit_price, symbol))
                }
                LineKind::Fixed { amount } => format_currency(*amount, symbol),
                LineKind::Manual { default_amount, .. } => default_amount.map_or_else(
                    || "manual, no default".to_string(),
                    |amount| format!("manual, default {}", format_currency(amount, symbol)),
                ),
                LineKind::Tiered { tiers } => tiers
                    .iter()
                    .map(|t| format!("{t}: {}", format_currency(t.unit_price, symbol)))
                    .collect::<Vec<_>>()
                    .join("; "),
            };
            let _ = writeln!(out, "  {} ({}): {rule}", line.name, line.id);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_builtin_catalog() {
        let text = describe_catalog(&Catalog::builtin(), "R$");
        assert!(text.contains("(santa-catarina-completo)"));
        assert!(text.contains("501 a +"));
        assert!(text.contains("manual, no default"));
        assert!(text.contains("R$ 12.000,00 fixed"));
    }

    #[test]
    fn test_describe_issues() {
        assert_eq!(describe_issues(&[]), "✓ Catalog is valid\n");
        let issues = vec![CatalogIssue::EmptyTiers {
            owner: "course x".to_string(),
        }];
        assert_eq!(describe_issues(&issues), "✗ course x: tier list is empty\n");
    }
}
