//! Build sites from configuration manifests.

use std::sync::Arc;

use sitedef_config::{Config, ContentManifest, PageManifest, SiteManifest};
use sitedef_site::{
    ArtifactScope, Content, PageScope, Site, SiteDefaults, SiteDefinition, SiteError,
    SiteRegistry, VariableResolver,
};

use crate::error::CliError;

/// Anything a manifest content list can be poured into.
trait ContentSink {
    fn add(&mut self, content: Content) -> Result<(), SiteError>;
    fn stage(&mut self, content: Content) -> Result<(), SiteError>;
}

impl ContentSink for Site {
    fn add(&mut self, content: Content) -> Result<(), SiteError> {
        self.content(content, |_| {}).map(|_| ())
    }

    fn stage(&mut self, content: Content) -> Result<(), SiteError> {
        self.remove_content(content).map(|_| ())
    }
}

impl ContentSink for PageScope<'_> {
    fn add(&mut self, content: Content) -> Result<(), SiteError> {
        self.content(content, |_| {}).map(|_| ())
    }

    fn stage(&mut self, content: Content) -> Result<(), SiteError> {
        self.remove_content(content).map(|_| ())
    }
}

impl ContentSink for ArtifactScope<'_> {
    fn add(&mut self, content: Content) -> Result<(), SiteError> {
        self.content(content, |_| {}).map(|_| ())
    }

    fn stage(&mut self, content: Content) -> Result<(), SiteError> {
        self.remove_content(content).map(|_| ())
    }
}

/// Placeholder resolver fed by the `[placeholders]` table.
pub(crate) fn resolver(config: &Config) -> VariableResolver {
    config
        .placeholders
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Create the definition described by `config` and build every manifest
/// site through it, in order.
///
/// The first failing site aborts the build; sites built before it stay
/// registered with the returned definition's registry.
pub(crate) fn assemble(config: &Config) -> Result<Arc<SiteDefinition>, CliError> {
    let registry = Arc::new(SiteRegistry::new());
    let definition = Arc::new(
        SiteDefinition::new(
            config.definition.name.clone(),
            config.definition.version,
            &registry,
        )
        .with_defaults(SiteDefaults {
            primary_locale: config.defaults.primary_locale.clone(),
            default_timezone: config.defaults.default_timezone.clone(),
        }),
    );
    definition.set_placeholder_resolver(Arc::new(resolver(config)))?;

    for manifest in &config.sites {
        definition
            .create_site(&manifest.id, |site| build_site(site, manifest))
            .map_err(|source| CliError::Build {
                site: manifest.id.clone(),
                source,
            })?;
    }

    Ok(definition)
}

fn build_site(site: &mut Site, manifest: &SiteManifest) -> Result<(), SiteError> {
    site.on_constructed(|site| {
        let plan = site.removal_plan();
        if !plan.is_empty() {
            tracing::warn!(
                site = %site.id(),
                staged = plan.len(),
                "Site has staged removals awaiting compaction"
            );
        }
    });

    for template in &manifest.templates {
        site.template(&template.id, |scope| fill_content(scope, &template.content))?;
    }
    for layout in &manifest.layouts {
        site.layout(&layout.id, |scope| fill_content(scope, &layout.content))?;
    }
    fill_content(site, &manifest.content)?;
    for page in &manifest.pages {
        site.page(&page.id, &page.path, |scope| fill_page(scope, page))?;
    }

    for hostname in &manifest.hostnames {
        match &hostname.path {
            Some(path) => {
                site.hostname_with(&hostname.name, &hostname.page, |page| page.set_path(path))?;
            }
            None => {
                site.hostname(&hostname.name, &hostname.page)?;
            }
        }
    }
    Ok(())
}

fn fill_page(scope: &mut PageScope<'_>, manifest: &PageManifest) -> Result<(), SiteError> {
    fill_content(scope, &manifest.content)?;
    for child in &manifest.pages {
        scope.page(&child.id, &child.path, |child_scope| {
            fill_page(child_scope, child)
        })?;
    }
    if manifest.remove {
        scope.remove();
    }
    Ok(())
}

fn fill_content<S>(sink: &mut S, manifests: &[ContentManifest]) -> Result<(), SiteError>
where
    S: ContentSink + ?Sized,
{
    for manifest in manifests {
        let content = to_content(manifest)?;
        if manifest.remove {
            sink.stage(content)?;
        } else {
            sink.add(content)?;
        }
    }
    Ok(())
}

fn to_content(manifest: &ContentManifest) -> Result<Content, SiteError> {
    let mut content = Content::new(&manifest.id)
        .with_kind(manifest.kind.parse()?)
        .with_body(&manifest.body)
        .with_path(&manifest.path);
    for child in &manifest.children {
        let nested = to_content(child)?;
        if child.remove {
            content.stage_content_removal(nested)?;
        } else {
            content.add_content(nested)?;
        }
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sitedef_site::{ContentContainer, ContentKind, NodeState, SiteErrorKind};

    use super::*;

    const CONFIG: &str = r#"
[definition]
name = "corporate"
version = 2

[defaults]
primary_locale = "de"

[placeholders]
root = "/corp"

[[sites]]
id = "main"

[[sites.content]]
id = "logo"
kind = "image"
body = "logo.png"
path = "${root}/logo.png"

[[sites.content]]
id = "old-logo"
remove = true

[[sites.pages]]
id = "home"
path = "${root}/home"

[[sites.pages.content]]
id = "hero"
kind = "composite"

[[sites.pages.content.children]]
id = "headline"
body = "Welcome"
path = "${root}/headline"

[[sites.pages.pages]]
id = "about"
path = "${root}/about"
remove = true

[[sites.templates]]
id = "base"

[[sites.templates.content]]
id = "footer"
kind = "html"
body = "<footer/>"

[[sites.hostnames]]
name = "example.com"
page = "home"

[[sites.hostnames]]
name = "shop.example.com"
page = "shop"
path = "${root}/shop"

[[sites]]
id = "secondary"
"#;

    #[test]
    fn test_assemble_builds_every_site() {
        let config = Config::from_toml(CONFIG).unwrap();

        let definition = assemble(&config).unwrap();

        assert_eq!(definition.definition_name(), "corporate");
        assert_eq!(definition.version(), 2);
        let sites = definition.get_sites();
        let ids: Vec<_> = sites.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["main", "secondary"]);

        let main = &sites[0];
        assert_eq!(main.primary_locale, "de");
        assert_eq!(main.default_timezone, "US/Central");
        let logo = main.get_content_by_id("logo").unwrap();
        assert_eq!(logo.kind, ContentKind::Image);
        assert_eq!(logo.path, "/corp/logo.png");
        assert_eq!(main.content_to_remove()[0].id(), "old-logo");
        assert_eq!(
            main.get_content_by_id("headline").unwrap().path,
            "/corp/headline"
        );
        assert_eq!(main.get_content_by_id("footer").unwrap().body, "<footer/>");
        assert_eq!(main.find_page("about").unwrap().state(), NodeState::PendingRemoval);
    }

    #[test]
    fn test_assemble_binds_hostnames() {
        let config = Config::from_toml(CONFIG).unwrap();

        let definition = assemble(&config).unwrap();

        let (site, page) = definition.route("shop.example.com").unwrap();
        assert_eq!(site.id(), "main");
        assert_eq!(site.get_page(page).unwrap().path(), "/corp/shop");
        assert_eq!(
            definition.route("EXAMPLE.COM").unwrap().0.id(),
            "main"
        );
    }

    #[test]
    fn test_assemble_reports_failing_site() {
        let config = Config::from_toml(
            r#"
[[sites]]
id = "ok"

[[sites]]
id = "broken"

[[sites.hostnames]]
name = "example.com"
page = "missing"
"#,
        )
        .unwrap();

        let err = assemble(&config).unwrap_err();

        match err {
            CliError::Build { site, source } => {
                assert_eq!(site, "broken");
                assert_eq!(source.kind(), SiteErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_content_kind_is_rejected() {
        let config = Config::from_toml(
            r#"
[[sites]]
id = "s"

[[sites.content]]
id = "clip"
kind = "video"
"#,
        )
        .unwrap();

        let err = assemble(&config).unwrap_err();

        assert!(err.to_string().contains("video"));
    }

    #[test]
    fn test_resolver_uses_placeholder_table() {
        let config = Config::from_toml("[placeholders]\ncdn = \"/static\"\n").unwrap();

        let resolver = resolver(&config);

        assert_eq!(resolver.get("cdn"), Some("/static"));
    }
}
