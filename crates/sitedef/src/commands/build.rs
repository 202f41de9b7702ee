//! `sitedef build` command implementation.

use clap::Args;
use sitedef_site::{ContentContainer, Page, Site, SiteOutline};

use super::ConfigArgs;
use crate::assemble::assemble;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print site outlines as JSON instead of a tree.
    #[arg(long)]
    json: bool,
}

impl BuildArgs {
    /// Execute the build command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let definition = assemble(&config)?;
        let sites = definition.get_sites();

        if self.json {
            let outlines: Vec<SiteOutline> = sites.iter().map(|site| site.outline()).collect();
            output.result(&serde_json::to_string_pretty(&outlines)?);
            return Ok(());
        }

        output.heading(&format!(
            "{} v{}",
            definition.definition_name(),
            definition.version()
        ));
        for site in &sites {
            print_site(&output, site);
        }

        let staged: usize = sites.iter().map(|site| site.removal_plan().len()).sum();
        if staged > 0 {
            output.warning(&format!("{staged} node(s) staged for removal"));
        }
        output.success(&format!("Built {} site(s)", sites.len()));
        Ok(())
    }
}

fn print_site(output: &Output, site: &Site) {
    output.entry(
        0,
        &format!("site {}", site.id()),
        &format!("({}, {})", site.primary_locale, site.default_timezone),
    );
    for hostname in site.hostnames() {
        let page = site.get_page(hostname.welcome_page());
        output.entry(
            1,
            &format!("host {}", hostname.address()),
            &format!("-> {}", page.map_or("?", Page::id)),
        );
    }
    for &handle in site.children() {
        if let Some(page) = site.get_page(handle) {
            print_page(output, site, page, 1);
        }
    }
    for template in site.templates() {
        output.entry(
            1,
            &format!("template {}", template.id()),
            &format!("[{} content]", template.content_list().len()),
        );
    }
    for layout in site.layouts() {
        output.entry(
            1,
            &format!("layout {}", layout.id()),
            &format!("[{} content]", layout.content_list().len()),
        );
    }
    for content in site.content_list() {
        output.entry(1, &format!("content {}", content.id()), &content.path);
    }
}

fn print_page(output: &Output, site: &Site, page: &Page, depth: usize) {
    let note = if page.is_pending_removal() {
        format!("{} (pending removal)", page.path())
    } else {
        page.path().to_owned()
    };
    output.entry(depth, &format!("page {}", page.id()), &note);
    for content in page.content_list() {
        output.entry(depth + 1, &format!("content {}", content.id()), &content.path);
    }
    for &child in page.children() {
        if let Some(child) = site.get_page(child) {
            print_page(output, site, child, depth + 1);
        }
    }
}
