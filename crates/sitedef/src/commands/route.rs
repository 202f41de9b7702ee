//! `sitedef route` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::assemble::assemble;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the route command.
#[derive(Args)]
pub(crate) struct RouteArgs {
    /// Host name to route, e.g. `example.com` or `example.com:8080`.
    host: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl RouteArgs {
    /// Execute the route command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load()?;
        let definition = assemble(&config)?;

        let (site, handle) = definition
            .route(&self.host)
            .ok_or_else(|| CliError::UnknownHost(self.host.clone()))?;
        let page = site
            .get_page(handle)
            .ok_or_else(|| CliError::UnknownHost(self.host.clone()))?;

        Output::new().result(&format!("{}\t{}\t{}", site.id(), page.id(), page.path()));
        Ok(())
    }
}
