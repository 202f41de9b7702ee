//! CLI error types.

use sitedef_config::ConfigError;
use sitedef_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("Failed to build site '{site}': {source}")]
    Build {
        site: String,
        #[source]
        source: SiteError,
    },

    #[error("No site is bound to host: {0}")]
    UnknownHost(String),
}
