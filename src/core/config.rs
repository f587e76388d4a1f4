//! Configuration module for `TeachPricing`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$TEACH_PRICING";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Pricing configuration
///
/// A zero in any numeric field means "not set" and is filled from the
/// defaults on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Largest accepted quantity
    #[serde(default)]
    pub max_quantity: u32,
    /// Quantity used when none is given
    #[serde(default)]
    pub default_quantity: u32,
    /// Symbol printed before amounts
    #[serde(default)]
    pub currency_symbol: String,
    /// Days a proposal stays valid after its issue date
    #[serde(default)]
    pub proposal_validity_days: u32,
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Persisted catalog edited by administrators
    #[serde(default)]
    pub catalog_file: String,
    /// Directory for generated proposals
    #[serde(default)]
    pub proposals_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Pricing settings
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override maximum quantity
    pub max_quantity: Option<u32>,
    /// Override currency symbol
    pub currency_symbol: Option<String>,
    /// Override catalog file
    pub catalog_file: Option<String>,
    /// Override proposals output directory
    pub proposals_dir: Option<String>,
}

impl Config {
    /// Get the `$TEACH_PRICING` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/teachpricing`
    /// - macOS: `~/Library/Application Support/teachpricing`
    /// - Windows: `%APPDATA%\teachpricing`
    #[must_use]
    pub fn get_teachpricing_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("teachpricing")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) here and set in `defaults` are
    /// updated, so upgrades pick up new settings without touching user edits.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        changed |= fill_string(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_string(&mut self.logging.file, &defaults.logging.file);

        changed |= fill_number(
            &mut self.pricing.max_quantity,
            defaults.pricing.max_quantity,
        );
        changed |= fill_number(
            &mut self.pricing.default_quantity,
            defaults.pricing.default_quantity,
        );
        changed |= fill_string(
            &mut self.pricing.currency_symbol,
            &defaults.pricing.currency_symbol,
        );
        changed |= fill_number(
            &mut self.pricing.proposal_validity_days,
            defaults.pricing.proposal_validity_days,
        );

        changed |= fill_string(&mut self.paths.catalog_file, &defaults.paths.catalog_file);
        changed |= fill_string(&mut self.paths.proposals_dir, &defaults.paths.proposals_dir);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Command-line arguments override file values for one run without
    /// modifying the persistent configuration file.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(max_quantity) = overrides.max_quantity {
            self.pricing.max_quantity = max_quantity;
        }
        if let Some(symbol) = &overrides.currency_symbol {
            self.pricing.currency_symbol.clone_from(symbol);
        }

        if let Some(catalog_file) = &overrides.catalog_file {
            self.paths.catalog_file = Self::expand_variables(catalog_file);
        }
        if let Some(proposals_dir) = &overrides.proposals_dir {
            self.paths.proposals_dir = Self::expand_variables(proposals_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_teachpricing_dir`].
    ///
    /// [`get_teachpricing_dir`]: Self::get_teachpricing_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_teachpricing_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$TEACH_PRICING` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_teachpricing_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$TEACH_PRICING` is expanded in path values. Missing fields take their
    /// serde defaults (empty strings, zero, false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog_file = Self::expand_variables(&config.paths.catalog_file);
        config.paths.proposals_dir = Self::expand_variables(&config.paths.proposals_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from
    ///   defaults and saves it back if anything was added
    /// - First run: creates the config directory and writes the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Persisted catalog location
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.catalog_file)
    }

    /// Directory proposals are written to by default
    #[must_use]
    pub fn proposals_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.proposals_dir)
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`, `file`, `verbose`
    /// - `max_quantity`, `default_quantity`, `currency_symbol`, `proposal_validity_days`
    /// - `catalog_file`, `proposals_dir`
    ///
    /// Dashed spellings (`max-quantity`) are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "max_quantity" | "max-quantity" => Some(self.pricing.max_quantity.to_string()),
            "default_quantity" | "default-quantity" => {
                Some(self.pricing.default_quantity.to_string())
            }
            "currency_symbol" | "currency-symbol" => Some(self.pricing.currency_symbol.clone()),
            "proposal_validity_days" | "proposal-validity-days" => {
                Some(self.pricing.proposal_validity_days.to_string())
            }
            "catalog_file" | "catalog-file" => Some(self.paths.catalog_file.clone()),
            "proposals_dir" | "proposals-dir" => Some(self.paths.proposals_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value does not
    /// parse (a boolean for `verbose`, a positive integer for the quantities).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "max_quantity" | "max-quantity" => {
                self.pricing.max_quantity = parse_positive(key, value)?;
            }
            "default_quantity" | "default-quantity" => {
                self.pricing.default_quantity = parse_positive(key, value)?;
            }
            "currency_symbol" | "currency-symbol" => {
                self.pricing.currency_symbol = value.to_string();
            }
            "proposal_validity_days" | "proposal-validity-days" => {
                self.pricing.proposal_validity_days = parse_positive(key, value)?;
            }
            "catalog_file" | "catalog-file" => {
                self.paths.catalog_file = Self::expand_variables(value);
            }
            "proposals_dir" | "proposals-dir" => {
                self.paths.proposals_dir = Self::expand_variables(value);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "max_quantity" | "max-quantity" => {
                self.pricing.max_quantity = defaults.pricing.max_quantity;
            }
            "default_quantity" | "default-quantity" => {
                self.pricing.default_quantity = defaults.pricing.default_quantity;
            }
            "currency_symbol" | "currency-symbol" => self
                .pricing
                .currency_symbol
                .clone_from(&defaults.pricing.currency_symbol),
            "proposal_validity_days" | "proposal-validity-days" => {
                self.pricing.proposal_validity_days = defaults.pricing.proposal_validity_days;
            }
            "catalog_file" | "catalog-file" => self
                .paths
                .catalog_file
                .clone_from(&defaults.paths.catalog_file),
            "proposals_dir" | "proposals-dir" => self
                .paths
                .proposals_dir
                .clone_from(&defaults.paths.proposals_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn fill_string(value: &mut String, default: &str) -> bool {
    if value.is_empty() && !default.is_empty() {
        default.clone_into(value);
        return true;
    }
    false
}

fn fill_number(value: &mut u32, default: u32) -> bool {
    if *value == 0 && default != 0 {
        *value = default;
        return true;
    }
    false
}

fn parse_positive(key: &str, value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Invalid positive integer for '{key}': '{value}'")),
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[pricing]")?;
        writeln!(f, "  max_quantity = {}", self.pricing.max_quantity)?;
        writeln!(f, "  default_quantity = {}", self.pricing.default_quantity)?;
        writeln!(f, "  currency_symbol = \"{}\"", self.pricing.currency_symbol)?;
        writeln!(
            f,
            "  proposal_validity_days = {}",
            self.pricing.proposal_validity_days
        )?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog_file = \"{}\"", self.paths.catalog_file)?;
        writeln!(f, "  proposals_dir = \"{}\"", self.paths.proposals_dir)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert_eq!(config.pricing.max_quantity, 50_000);
        assert_eq!(config.pricing.default_quantity, 100);
        assert_eq!(config.pricing.currency_symbol, "R$");
        assert_eq!(config.pricing.proposal_validity_days, 30);
        assert!(!config.paths.catalog_file.contains(DIR_VARIABLE));
    }

    #[test]
    fn test_merge_fills_zero_and_empty() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_toml("[logging]\nlevel = \"debug\"\n").expect("toml");
        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.pricing.max_quantity, 50_000);
        assert!(!config.merge_defaults(&defaults));
    }

    #[test]
    fn test_set_rejects_zero_quantity() {
        let mut config = Config::from_defaults();
        assert!(config.set("max_quantity", "0").is_err());
        assert!(config.set("max-quantity", "abc").is_err());
        assert!(config.set("max-quantity", "1000").is_ok());
        assert_eq!(config.get("max_quantity").as_deref(), Some("1000"));
    }
}
