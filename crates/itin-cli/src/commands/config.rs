//! Config command - inspect and edit the settings file.
//!
//! Keys are dotted paths into the JSON form of [`ItinConfig`], such as
//! `import.default_currency` or `store.path`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::info;

use itin_core::models::config::ItinConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings and where they come from
    Show,

    /// Write a settings file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting
    Get {
        /// Dotted key, e.g. "import.check_in_time"
        key: String,
    },

    /// Change one setting; numbers and booleans are read as JSON
    Set { key: String, value: String },
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("itin")
            .join("config.json")
    });

    match args.command {
        ConfigCommand::Show => {
            let origin = if path.exists() { "file" } else { "defaults, no file" };
            eprintln!("{} {} ({})", style("ℹ").blue(), path.display(), origin);
            println!("{}", serde_json::to_string_pretty(&current(&path)?)?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            write(&path, &ItinConfig::default())?;
            println!("{} Created {}", style("✓").green(), path.display());
        }
        ConfigCommand::Get { key } => {
            let settings = serde_json::to_value(current(&path)?)?;
            let value = settings
                .pointer(&pointer(&key))
                .with_context(|| format!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => {
            let value: Value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            let config = with_setting(current(&path)?, &key, value.clone())
                .with_context(|| format!("Invalid value for {}", key))?;
            write(&path, &config)?;
            println!("{} {} = {}", style("✓").green(), key, value);
        }
    }

    Ok(())
}

/// Settings from `path`, or the defaults when the file does not exist yet.
fn current(path: &Path) -> anyhow::Result<ItinConfig> {
    if !path.exists() {
        return Ok(ItinConfig::default());
    }
    ItinConfig::from_file(path).with_context(|| format!("Cannot read {}", path.display()))
}

fn write(path: &Path, config: &ItinConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// `import.check_in_time` as the JSON pointer `/import/check_in_time`.
fn pointer(key: &str) -> String {
    key.split('.').map(|part| format!("/{}", part)).collect()
}

/// `config` with `key` replaced by `value`. Only existing keys can be set,
/// and the result must still validate.
fn with_setting(config: ItinConfig, key: &str, value: Value) -> anyhow::Result<ItinConfig> {
    let mut settings = serde_json::to_value(config)?;
    let slot = settings
        .pointer_mut(&pointer(key))
        .with_context(|| format!("Configuration key not found: {}", key))?;
    *slot = value;

    let config: ItinConfig = serde_json::from_value(settings)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_pointer() {
        assert_eq!(pointer("import.check_in_time"), "/import/check_in_time");
        assert_eq!(pointer("store"), "/store");
    }

    #[test]
    fn test_with_setting() {
        let config = with_setting(ItinConfig::default(), "import.default_currency", json!("CHF"))
            .unwrap();
        assert_eq!(config.import.default_currency, "CHF");

        let config = with_setting(config, "pdf.min_text_length", json!(50)).unwrap();
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn test_with_setting_rejects_unknown_and_invalid() {
        let set = |key: &str, value: Value| with_setting(ItinConfig::default(), key, value);

        assert!(set("import.nope", json!("x")).is_err());
        assert!(set("import.check_in_time", json!("3pm")).is_err());
        assert!(set("pdf.min_text_length", json!("many")).is_err());
    }
}
