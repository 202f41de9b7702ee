//! `sitedef resolve` command implementation.

use clap::Args;
use sitedef_site::PlaceholderResolver;

use super::ConfigArgs;
use crate::assemble::resolver;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Path template containing `${name}` placeholders.
    template: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ResolveArgs {
    /// Execute the resolve command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load()?;
        let resolved = resolver(&config).resolve_placeholders(&self.template);
        Output::new().result(&resolved);
        Ok(())
    }
}
