//! CLI command implementations.

mod build;
mod resolve;
mod route;

use std::path::PathBuf;

use clap::Args;
use sitedef_config::{CliSettings, Config};

pub(crate) use build::BuildArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use route::RouteArgs;

use crate::error::CliError;

/// Config options shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover sitedef.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set a placeholder value (overrides config), e.g. `--set root=/corp`.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    placeholders: Vec<(String, String)>,

    /// Primary locale for new sites (overrides config).
    #[arg(long, env = "SITEDEF_LOCALE")]
    locale: Option<String>,

    /// Default time zone for new sites (overrides config).
    #[arg(long, env = "SITEDEF_TIMEZONE")]
    timezone: Option<String>,
}

impl ConfigArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            placeholders: self.placeholders,
            primary_locale: self.locale,
            default_timezone: self.timezone,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }
}

/// Parse a `NAME=VALUE` pair.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing placeholder name in '{raw}'"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("root=/corp").unwrap(),
            ("root".to_owned(), "/corp".to_owned())
        );
    }

    #[test]
    fn test_parse_assignment_keeps_equals_in_value() {
        assert_eq!(
            parse_assignment("query=a=b").unwrap(),
            ("query".to_owned(), "a=b".to_owned())
        );
    }

    #[test]
    fn test_parse_assignment_allows_empty_value() {
        assert_eq!(
            parse_assignment("root=").unwrap(),
            ("root".to_owned(), String::new())
        );
    }

    #[test]
    fn test_parse_assignment_rejects_missing_separator() {
        assert!(parse_assignment("root").is_err());
        assert!(parse_assignment("=value").is_err());
    }
}
