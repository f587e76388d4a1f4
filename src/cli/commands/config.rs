//! Config command handler

use crate::args::ConfigSubcommand;
use std::io::{self, Write};
use teach_pricing::config::Config;

/// Keys accepted by `config get/set/unset`
const KEYS: [&str; 9] = [
    "level",
    "file",
    "verbose",
    "max_quantity",
    "default_quantity",
    "currency_symbol",
    "proposal_validity_days",
    "catalog_file",
    "proposals_dir",
];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            print_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: None }) => {
            print_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => print_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => config
            .set(&key, &value)
            .and_then(|()| persist(config))
            .map(|()| {
                let effective = config.get(&key).unwrap_or(value);
                println!("✓ Set {key} = {effective}");
            }),
        Some(ConfigSubcommand::Unset { key }) => config
            .unset(&key, defaults)
            .and_then(|()| persist(config))
            .map(|()| println!("✓ Reset {key} to default")),
        Some(ConfigSubcommand::Reset) => {
            handle_reset();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn print_all(config: &Config) {
    println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn print_key(config: &Config, key: &str) -> Result<(), String> {
    config.get(key).map_or_else(
        || {
            Err(format!(
                "Unknown config key: '{key}'\nValid keys: {}",
                KEYS.join(", ")
            ))
        },
        |value| {
            println!("{value}");
            Ok(())
        },
    )
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))
}

fn handle_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            eprintln!("Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_key_is_readable() {
        let config = Config::from_defaults();
        for key in KEYS {
            assert!(config.get(key).is_some(), "{key} not readable");
        }
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let err = print_key(&Config::from_defaults(), "token").expect_err("unknown key");
        assert!(err.contains("max_quantity"));
    }
}
