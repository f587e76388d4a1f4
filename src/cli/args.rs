//! CLI argument definitions for `TeachPricing`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use teach_pricing::config::ConfigOverrides;
use teach_pricing::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_quantity`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CatalogSubcommand {
    /// Print the active catalog (courses, tiers, phases and lines).
    Show,
    /// Write the active catalog to a JSON file.
    Export {
        /// Destination file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Replace the persisted catalog with a JSON file.
    Import {
        /// Catalog JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check a catalog for gaps, overlaps and duplicate ids.
    ///
    /// Checks the active catalog when no FILE is given.
    Validate {
        /// Catalog JSON file
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Drop the persisted catalog and go back to the built-in one (requires confirmation).
    Reset,
}

/// What to price
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Course offering id (e.g., `async-digital`)
    #[arg(short, long, value_name = "ID")]
    pub course: String,

    /// Number of teachers (defaults to config `default_quantity`)
    #[arg(short, long, value_name = "N")]
    pub quantity: Option<u32>,

    /// Roadmap phase to include (repeatable; replaces the default selection)
    #[arg(short, long = "phase", value_name = "ID")]
    pub phases: Vec<String>,

    /// Include every roadmap phase
    #[arg(long, conflicts_with = "phases")]
    pub all_phases: bool,

    /// Price the course alone, without roadmap phases
    #[arg(long, conflicts_with_all = ["phases", "all_phases"])]
    pub no_phases: bool,

    /// Extra feature quantity, `ID=QTY` (repeatable)
    #[arg(short, long = "extra", value_name = "ID=QTY")]
    pub extras: Vec<String>,

    /// Manual line amount, `PHASE.LINE=AMOUNT` (repeatable; `0` is a real amount)
    #[arg(long = "override", value_name = "PHASE.LINE=AMOUNT")]
    pub overrides: Vec<String>,

    /// Per-line quantity, `PHASE.LINE=N` (repeatable)
    #[arg(long = "line-quantity", value_name = "PHASE.LINE=N")]
    pub line_quantities: Vec<String>,

    /// Start from a saved selection (JSON or TOML); flags are applied on top
    #[arg(long, value_name = "FILE")]
    pub selection: Option<PathBuf>,
}

/// Who the proposal is for
#[derive(Debug, Clone, Default, Args)]
pub struct ClientArgs {
    /// Client name
    #[arg(long, value_name = "NAME")]
    pub client: Option<String>,

    /// School or institution name
    #[arg(long, value_name = "NAME")]
    pub school: Option<String>,

    /// City/state
    #[arg(long, value_name = "CITY/UF")]
    pub city: Option<String>,

    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Contact person
    #[arg(long, value_name = "NAME")]
    pub contact: Option<String>,

    /// Contact e-mail
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Inspect and administer the pricing catalog.
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },
    /// Price a course offering with roadmap phases.
    Quote {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the full quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a commercial proposal document.
    Proposal {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        client: ClientArgs,

        /// Proposal format: markdown (md), html, or pdf
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Output file path (optional; defaults to config `proposals_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Custom Chrome/Chromium command for PDF output
        #[arg(long, value_name = "CMD")]
        pdf_converter: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "teachpricing",
    about = "TEACH pricing and proposal command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config maximum quantity
    #[arg(long = "config-max-quantity", value_name = "N")]
    pub config_max_quantity: Option<u32>,

    /// Override config currency symbol
    #[arg(long = "config-currency-symbol", value_name = "SYMBOL")]
    pub config_currency_symbol: Option<String>,

    /// Override config catalog file
    #[arg(long = "config-catalog-file", value_name = "FILE")]
    pub config_catalog_file: Option<PathBuf>,

    /// Override config catalog file (short form)
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override config proposals directory
    #[arg(long = "config-proposals-dir", value_name = "DIR")]
    pub config_proposals_dir: Option<PathBuf>,

    /// Override config proposals directory (short form)
    #[arg(long = "proposals-dir", value_name = "DIR")]
    pub proposals_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--catalog`) take precedence over long-form
    /// flags (e.g., `--config-catalog-file`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            max_quantity: self.config_max_quantity,
            currency_symbol: self.config_currency_symbol.clone(),
            catalog_file: path_string(self.catalog.as_ref())
                .or_else(|| path_string(self.config_catalog_file.as_ref())),
            proposals_dir: path_string(self.proposals_dir.as_ref())
                .or_else(|| path_string(self.config_proposals_dir.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("teachpricing").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["config"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.max_quantity.is_none());
        assert!(overrides.catalog_file.is_none());
        assert!(overrides.proposals_dir.is_none());
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let overrides = parse(&[
            "--config-catalog-file",
            "/long/catalog.json",
            "--catalog",
            "/short/catalog.json",
            "--config-proposals-dir",
            "/long/out",
            "--config-max-quantity",
            "1000",
            "config",
        ])
        .to_config_overrides();
        assert_eq!(overrides.catalog_file.as_deref(), Some("/short/catalog.json"));
        assert_eq!(overrides.proposals_dir.as_deref(), Some("/long/out"));
        assert_eq!(overrides.max_quantity, Some(1000));
    }

    #[test]
    fn test_quote_selection_flags() {
        let cli = parse(&[
            "quote",
            "--course",
            "personalized",
            "-q",
            "60",
            "--phase",
            "fase0",
            "--phase",
            "fase1",
            "--extra",
            "extra-hours=2",
            "--override",
            "fase0.planejamento=0",
            "--line-quantity",
            "fase1.sistema-aprendizagem=3000",
            "--json",
        ]);
        let Command::Quote { selection, json } = cli.command else {
            panic!("expected quote command");
        };
        assert!(json);
        assert_eq!(selection.course, "personalized");
        assert_eq!(selection.quantity, Some(60));
        assert_eq!(selection.phases, vec!["fase0", "fase1"]);
        assert_eq!(selection.extras, vec!["extra-hours=2"]);
        assert_eq!(selection.overrides, vec!["fase0.planejamento=0"]);
        assert_eq!(selection.line_quantities.len(), 1);
    }

    #[test]
    fn test_all_phases_conflicts_with_phase() {
        let result = Cli::try_parse_from([
            "teachpricing",
            "quote",
            "--course",
            "x",
            "--all-phases",
            "--phase",
            "fase0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_proposal_defaults_to_markdown() {
        let cli = parse(&["proposal", "--course", "async-digital", "--school", "Escola"]);
        let Command::Proposal { format, client, output, .. } = cli.command else {
            panic!("expected proposal command");
        };
        assert_eq!(format, "markdown");
        assert_eq!(client.school.as_deref(), Some("Escola"));
        assert!(output.is_none());
    }
}
