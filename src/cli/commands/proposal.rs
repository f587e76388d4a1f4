//! Proposal command handler

use crate::args::{ClientArgs, SelectionArgs};
use crate::commands::catalog::active_catalog;
use crate::commands::quote::{build_selection, course_ids};
use chrono::Local;
use std::error::Error;
use std::path::{Path, PathBuf};
use teach_pricing::config::Config;
use teach_pricing::core::pricing::price_quote;
use teach_pricing::core::proposal::{
    default_file_name, generator_for, ClientInfo, ProposalContext, ProposalFormat,
};
use teach_pricing::{info, verbose, warn};

/// Options of the proposal command besides the selection
pub struct ProposalOptions<'a> {
    /// Client details
    pub client: &'a ClientArgs,
    /// Requested format name
    pub format: &'a str,
    /// Explicit output path
    pub output: Option<&'a Path>,
    /// Custom PDF converter
    pub pdf_converter: Option<&'a str>,
}

/// Run the proposal command
pub fn run(selection: &SelectionArgs, options: &ProposalOptions, config: &Config) {
    match generate(selection, options, config) {
        Ok(path) => println!("✓ Proposal generated: {}", path.display()),
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Turn client flags into client info; absent flags become placeholders
pub fn client_info(args: &ClientArgs) -> ClientInfo {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    ClientInfo {
        client_name: field(&args.client),
        school_name: field(&args.school),
        city_state: field(&args.city),
        project_name: field(&args.project),
        contact_person: field(&args.contact),
        email: field(&args.email),
        phone: field(&args.phone),
    }
}

fn generate(
    selection_args: &SelectionArgs,
    options: &ProposalOptions,
    config: &Config,
) -> Result<PathBuf, Box<dyn Error>> {
    let format: ProposalFormat = options.format.parse()?;
    let catalog = active_catalog(config)?;
    let selection = build_selection(selection_args, &catalog, config)?;

    let quote = price_quote(&catalog, &selection_args.course, &selection).ok_or_else(|| {
        format!(
            "Unknown course offering: '{}' (available: {})",
            selection_args.course,
            course_ids(&catalog)
        )
    })?;
    for diagnostic in quote.diagnostics() {
        warn!("{diagnostic}");
    }

    let client = client_info(options.client);
    let issue_date = Local::now().date_naive();
    let ctx = ProposalContext::new(&quote, &client, issue_date)
        .with_validity_days(config.pricing.proposal_validity_days)
        .with_currency_symbol(&config.pricing.currency_symbol);

    let output_path = match options.output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = config.proposals_path();
            std::fs::create_dir_all(&dir).map_err(|e| {
                format!("Failed to create proposals directory {}: {e}", dir.display())
            })?;
            dir.join(default_file_name(&client, issue_date, format))
        }
    };

    verbose!("Rendering {format} proposal to {}", output_path.display());
    generator_for(format, options.pdf_converter).generate(&ctx, &output_path)?;
    info!(
        "Proposal for {} ({}) written to {}",
        client.school_name(),
        quote.course.course.id,
        output_path.display()
    );

    Ok(output_path)
}
