//! Site definitions: factories that build and track sites.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{NodeKind, SiteError};
use crate::node::{PageId, require_id};
use crate::placeholder::PlaceholderResolver;
use crate::registry::{DefinitionKey, SiteRegistry};
use crate::site::{DEFAULT_LOCALE, DEFAULT_TIMEZONE, Site};

/// Locale and time zone given to every site a definition creates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteDefaults {
    /// Primary locale tag.
    pub primary_locale: String,
    /// Default time zone name.
    pub default_timezone: String,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        Self {
            primary_locale: DEFAULT_LOCALE.to_owned(),
            default_timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

/// Reusable definition from which sites are built.
///
/// A definition is shared as `Arc<SiteDefinition>`; the sites it creates hold
/// a weak reference back to it and use its [`PlaceholderResolver`] for path
/// resolution. The resolver is injected after construction, once.
pub struct SiteDefinition {
    key: DefinitionKey,
    definition_name: String,
    version: u32,
    defaults: SiteDefaults,
    placeholder_resolver: OnceLock<Arc<dyn PlaceholderResolver>>,
    registry: Arc<SiteRegistry>,
}

impl SiteDefinition {
    /// Create a definition tracked by `registry`.
    #[must_use]
    pub fn new(definition_name: impl Into<String>, version: u32, registry: &Arc<SiteRegistry>) -> Self {
        Self {
            key: registry.allocate_key(),
            definition_name: definition_name.into(),
            version,
            defaults: SiteDefaults::default(),
            placeholder_resolver: OnceLock::new(),
            registry: Arc::clone(registry),
        }
    }

    /// Override the locale and time zone given to new sites.
    #[must_use]
    pub fn with_defaults(mut self, defaults: SiteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Definition name.
    #[must_use]
    pub fn definition_name(&self) -> &str {
        &self.definition_name
    }

    /// Definition version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Registry key of this definition.
    #[must_use]
    pub fn key(&self) -> DefinitionKey {
        self.key
    }

    /// Defaults applied to new sites.
    #[must_use]
    pub fn defaults(&self) -> &SiteDefaults {
        &self.defaults
    }

    /// Inject the placeholder resolver.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::AlreadyInitialized` if a resolver was already set.
    pub fn set_placeholder_resolver(
        &self,
        resolver: Arc<dyn PlaceholderResolver>,
    ) -> Result<(), SiteError> {
        self.placeholder_resolver
            .set(resolver)
            .map_err(|_| SiteError::AlreadyInitialized("placeholder resolver"))
    }

    /// The injected resolver, if any.
    #[must_use]
    pub fn placeholder_resolver(&self) -> Option<&Arc<dyn PlaceholderResolver>> {
        self.placeholder_resolver.get()
    }

    /// Build a site bound to this definition.
    ///
    /// Runs `init` against the new site, appends the finished site to this
    /// definition's registry entry, then fires the site's construction
    /// callbacks in registration order. If `init` fails nothing is registered
    /// and no callback fires.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` for a blank id, or the first error raised
    /// by a builder call inside `init`.
    pub fn create_site<F>(self: &Arc<Self>, id: &str, init: F) -> Result<Arc<Site>, SiteError>
    where
        F: FnOnce(&mut Site) -> Result<(), SiteError>,
    {
        require_id(id, NodeKind::Site)?;

        let mut site = Site::new(id);
        site.primary_locale.clone_from(&self.defaults.primary_locale);
        site.default_timezone
            .clone_from(&self.defaults.default_timezone);
        site.set_definition(Arc::downgrade(self));

        if let Err(e) = init(&mut site) {
            tracing::warn!(
                definition = %self.definition_name,
                site = %id,
                error = %e,
                "Site construction failed"
            );
            return Err(e);
        }

        let callbacks = site.take_callbacks();
        let site = Arc::new(site);
        self.registry.register(self.key, Arc::clone(&site));
        tracing::info!(
            definition = %self.definition_name,
            version = self.version,
            site = %id,
            page_count = site.pages().len(),
            callback_count = callbacks.len(),
            "Site registered"
        );

        for callback in callbacks {
            callback(&site);
        }
        Ok(site)
    }

    /// Snapshot of the sites built from this definition, oldest first.
    ///
    /// Empty if no site was ever created.
    #[must_use]
    pub fn get_sites(&self) -> Vec<Arc<Site>> {
        self.registry.sites(self.key)
    }

    /// Welcome page for a host across this definition's sites, in creation
    /// order.
    #[must_use]
    pub fn route(&self, host: &str) -> Option<(Arc<Site>, PageId)> {
        self.get_sites().into_iter().find_map(|site| {
            let page = site.route(host)?.handle();
            Some((site, page))
        })
    }
}

impl fmt::Debug for SiteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteDefinition")
            .field("key", &self.key)
            .field("definition_name", &self.definition_name)
            .field("version", &self.version)
            .field("defaults", &self.defaults)
            .field("has_resolver", &self.placeholder_resolver.get().is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SiteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sites: Vec<String> = self.get_sites().iter().map(ToString::to_string).collect();
        write!(
            f,
            "SiteDefinition(definition_name='{}', sites=[{}])",
            self.definition_name,
            sites.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::SiteDefinition: Send, Sync);

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::Content;
    use crate::error::SiteErrorKind;
    use crate::node::ContentContainer;
    use crate::placeholder::VariableResolver;

    fn definition(registry: &Arc<SiteRegistry>) -> Arc<SiteDefinition> {
        let definition = Arc::new(SiteDefinition::new("corporate", 2, registry));
        definition
            .set_placeholder_resolver(Arc::new(
                VariableResolver::new().with_variable("root", "/corp"),
            ))
            .unwrap();
        definition
    }

    #[test]
    fn test_get_sites_empty_when_never_used() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        assert!(definition.get_sites().is_empty());
    }

    #[test]
    fn test_create_site_registers_in_order() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        definition
            .create_site("s1", |site| {
                site.page("a", "/a", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();

        let sites = definition.get_sites();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].id(), "s1");
        let pages: Vec<_> = sites[0]
            .children()
            .iter()
            .map(|&h| sites[0].get_page(h).unwrap().id().to_owned())
            .collect();
        assert_eq!(pages, vec!["a"]);

        definition.create_site("s2", |_| Ok(())).unwrap();

        let ids: Vec<_> = definition
            .get_sites()
            .iter()
            .map(|s| s.id().to_owned())
            .collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_definitions_do_not_share_entries() {
        let registry = Arc::new(SiteRegistry::new());
        let first = definition(&registry);
        let second = Arc::new(SiteDefinition::new("other", 1, &registry));

        first.create_site("s", |_| Ok(())).unwrap();

        assert_eq!(first.get_sites().len(), 1);
        assert!(second.get_sites().is_empty());
        assert_eq!(registry.site_count(), 1);
    }

    #[test]
    fn test_create_site_links_definition_and_defaults() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = Arc::new(
            SiteDefinition::new("intl", 1, &registry).with_defaults(SiteDefaults {
                primary_locale: "de".to_owned(),
                default_timezone: "Europe/Berlin".to_owned(),
            }),
        );

        let site = definition.create_site("s", |_| Ok(())).unwrap();

        assert_eq!(site.primary_locale, "de");
        assert_eq!(site.default_timezone, "Europe/Berlin");
        assert!(Arc::ptr_eq(&site.definition().unwrap(), &definition));
    }

    #[test]
    fn test_create_site_resolves_paths_through_definition() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        let site = definition
            .create_site("s", |site| {
                site.page("home", "${root}/home", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(site.child_page("home").unwrap().path(), "/corp/home");
    }

    #[test]
    fn test_callbacks_fire_once_in_order_with_built_site() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        let second = Arc::clone(&log);
        let site = definition
            .create_site("s", move |site| {
                site.on_constructed(move |s| {
                    first
                        .lock()
                        .unwrap()
                        .push(("first", s as *const Site as usize, s.pages().len()));
                });
                site.on_constructed(move |s| {
                    second
                        .lock()
                        .unwrap()
                        .push(("second", s as *const Site as usize, s.pages().len()));
                });
                site.page("late", "/late", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();

        let log = log.lock().unwrap();
        let address = Arc::as_ptr(&site) as usize;
        assert_eq!(
            *log,
            vec![("first", address, 1), ("second", address, 1)]
        );
        assert_eq!(site.pending_callbacks(), 0);
    }

    #[test]
    fn test_callbacks_see_site_registered() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);
        let seen = Arc::new(AtomicUsize::new(0));

        let observer = Arc::clone(&definition);
        let counter = Arc::clone(&seen);
        definition
            .create_site("s", move |site| {
                site.on_constructed(move |_| {
                    counter.store(observer.get_sites().len(), Ordering::SeqCst);
                });
                Ok(())
            })
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_create_site_registers_nothing() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let err = definition
            .create_site("broken", move |site| {
                site.on_constructed(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
                site.hostname("example.com", "home")?;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(err.kind(), SiteErrorKind::NotFound);
        assert!(definition.get_sites().is_empty());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_create_site_rejects_blank_id() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        let err = definition.create_site("", |_| Ok(())).unwrap_err();

        assert_eq!(err, SiteError::EmptyId(NodeKind::Site));
    }

    #[test]
    fn test_resolver_can_only_be_set_once() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        let err = definition
            .set_placeholder_resolver(Arc::new(VariableResolver::new()))
            .unwrap_err();

        assert_eq!(err.kind(), SiteErrorKind::InvalidState);
    }

    #[test]
    fn test_missing_resolver_fails_only_when_resolution_needed() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = Arc::new(SiteDefinition::new("bare", 1, &registry));

        definition
            .create_site("ok", |site| {
                site.content(Content::new("no-path"), |_| {})?;
                Ok(())
            })
            .unwrap();
        let err = definition
            .create_site("fails", |site| {
                site.page("home", "/home", |_| Ok(()))?;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(err.kind(), SiteErrorKind::Uninitialized);
        assert_eq!(definition.get_sites().len(), 1);
    }

    #[test]
    fn test_hostname_with_reuses_page_across_sites() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        let fresh = definition
            .create_site("fresh", |site| {
                site.hostname_with("example.com", "home", |p| p.set_path("/home"))?;
                Ok(())
            })
            .unwrap();
        let existing = definition
            .create_site("existing", |site| {
                site.page("home", "/welcome", |_| Ok(()))?;
                site.hostname_with("example.org", "home", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(fresh.pages().len(), 1);
        assert_eq!(fresh.route("example.com").unwrap().path(), "/home");
        assert_eq!(existing.pages().len(), 1);
        assert_eq!(existing.route("example.org").unwrap().path(), "/welcome");
    }

    #[test]
    fn test_route_searches_sites_in_creation_order() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);
        definition
            .create_site("a", |site| {
                site.page("home", "/a", |_| Ok(()))?;
                site.hostname("a.com", "home")?;
                Ok(())
            })
            .unwrap();
        definition
            .create_site("b", |site| {
                site.page("home", "/b", |_| Ok(()))?;
                site.hostname("b.com", "home")?;
                Ok(())
            })
            .unwrap();

        let (site, page) = definition.route("B.com").unwrap();

        assert_eq!(site.id(), "b");
        assert_eq!(site.get_page(page).unwrap().path(), "/b");
        assert!(definition.route("c.com").is_none());
    }

    #[test]
    fn test_concurrent_create_site_registers_every_site() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let definition = Arc::clone(&definition);
                thread::spawn(move || {
                    definition
                        .create_site(&format!("site-{i}"), |site| {
                            site.content(Content::new("c").with_path("${root}/c"), |_| {})?;
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let sites = definition.get_sites();
        assert_eq!(sites.len(), 8);
        assert!(sites.iter().all(|s| s.content_list()[0].path == "/corp/c"));
    }

    #[test]
    fn test_display_lists_sites() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = definition(&registry);
        definition.create_site("s", |_| Ok(())).unwrap();

        assert_eq!(
            definition.to_string(),
            "SiteDefinition(definition_name='corporate', sites=[Site(id='s', pages=[], hostnames=[], templates=[], layouts=[])])"
        );
    }
}
