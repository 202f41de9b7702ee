//! The site aggregate and its builder DSL.
//!
//! # Architecture
//!
//! Pages are stored in a flat arena (`Vec<Page>`) with parent/children
//! relationships tracked by [`PageId`]. Templates, layouts, hostnames and root
//! content are ordered vectors owned by the site. Every builder call
//! constructs the node first and then appends it to the right collection
//! itself; nodes never register themselves with their container.
//!
//! # Lookup order
//!
//! [`Site::get_content_by_id`] searches page content (page tree depth-first,
//! pre-order), then template content, then root content, and returns the
//! first match. Page content therefore shadows template content, which
//! shadows root content.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sitedef_site::{Content, SiteDefinition, SiteRegistry, VariableResolver};
//!
//! let registry = Arc::new(SiteRegistry::new());
//! let definition = Arc::new(SiteDefinition::new("corporate", 1, &registry));
//! definition
//!     .set_placeholder_resolver(Arc::new(
//!         VariableResolver::new().with_variable("root", "/corp"),
//!     ))
//!     .unwrap();
//!
//! let site = definition
//!     .create_site("main", |site| {
//!         site.page("home", "${root}/home", |page| {
//!             page.content(Content::text("welcome", "Hello"), |_| {})?;
//!             Ok(())
//!         })?;
//!         site.hostname("example.com", "home")?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(site.route("example.com").unwrap().path(), "/corp/home");
//! assert_eq!(site.get_content_by_id("welcome").unwrap().body, "Hello");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::artifact::{ArtifactScope, Layout, Template};
use crate::content::Content;
use crate::definition::SiteDefinition;
use crate::error::{NodeKind, SiteError};
use crate::hostname::{Hostname, normalize_host};
use crate::node::{
    ContentContainer, ContentStore, NodeState, PageId, ParentRef, ensure_unique_content, is_blank,
    require_id,
};
use crate::page::{Page, PageScope};
use crate::placeholder::PlaceholderResolver;

/// Locale assigned to new sites unless the definition overrides it.
pub const DEFAULT_LOCALE: &str = "en";

/// Time zone assigned to new sites unless the definition overrides it.
pub const DEFAULT_TIMEZONE: &str = "US/Central";

/// Callback fired once after a site is registered.
pub(crate) type SiteCallback = Box<dyn FnOnce(&Site) + Send>;

/// Addressable content container inside a site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Root,
    Page(PageId),
    Template(usize),
    Layout(usize),
}

/// A site: root of a page tree plus its templates, layouts, content and
/// hostnames.
///
/// Sites are normally built through
/// [`SiteDefinition::create_site`](crate::SiteDefinition::create_site), which
/// links the site to its definition (the source of placeholder resolution)
/// before running the caller's initializer.
pub struct Site {
    id: String,
    /// Primary locale tag (e.g. `en`).
    pub primary_locale: String,
    /// Default time zone name (e.g. `US/Central`).
    pub default_timezone: String,
    hostnames: Vec<Hostname>,
    templates: Vec<Template>,
    layouts: Vec<Layout>,
    content: Vec<Content>,
    content_to_remove: Vec<Content>,
    pages: Vec<Page>,
    children: Vec<PageId>,
    pages_to_remove: Vec<PageId>,
    parent: Weak<SiteDefinition>,
    // Mutex keeps `Site: Sync` with `Send`-only callbacks.
    callbacks: Mutex<Vec<SiteCallback>>,
}

impl Site {
    /// Create an empty site not linked to any definition.
    ///
    /// Builder calls that need placeholder resolution fail with
    /// `SiteError::Uninitialized` until the site is built through a
    /// [`SiteDefinition`].
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            primary_locale: DEFAULT_LOCALE.to_owned(),
            default_timezone: DEFAULT_TIMEZONE.to_owned(),
            hostnames: Vec::new(),
            templates: Vec::new(),
            layouts: Vec::new(),
            content: Vec::new(),
            content_to_remove: Vec::new(),
            pages: Vec::new(),
            children: Vec::new(),
            pages_to_remove: Vec::new(),
            parent: Weak::new(),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Site id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Definition this site was built from, if it is still alive.
    #[must_use]
    pub fn definition(&self) -> Option<Arc<SiteDefinition>> {
        self.parent.upgrade()
    }

    /// Root pages, in creation order.
    #[must_use]
    pub fn children(&self) -> &[PageId] {
        &self.children
    }

    /// Every page of the tree, in creation order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Page by handle.
    #[must_use]
    pub fn get_page(&self, handle: PageId) -> Option<&Page> {
        self.pages.get(handle.index())
    }

    /// Root page by id.
    #[must_use]
    pub fn child_page(&self, id: &str) -> Option<&Page> {
        self.children
            .iter()
            .map(|&handle| self.page_at(handle))
            .find(|page| page.id() == id)
    }

    /// First page with the given id anywhere in the tree (depth-first, pre-order).
    #[must_use]
    pub fn find_page(&self, id: &str) -> Option<&Page> {
        self.walk_pages().into_iter().find(|page| page.id() == id)
    }

    /// All pages in depth-first pre-order, starting from the root pages.
    #[must_use]
    pub fn walk_pages(&self) -> Vec<&Page> {
        let mut order = Vec::with_capacity(self.pages.len());
        let mut stack: Vec<PageId> = self.children.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let page = self.page_at(handle);
            order.push(page);
            stack.extend(page.children.iter().rev().copied());
        }
        order
    }

    /// Pages staged for removal, in staging order.
    pub fn pages_to_remove(&self) -> impl Iterator<Item = &Page> {
        self.pages_to_remove
            .iter()
            .map(|&handle| self.page_at(handle))
    }

    /// Create a root page with a placeholder-resolved path and run `init` on it.
    ///
    /// The page is appended to [`Site::children`] exactly once, before `init`
    /// runs. If `init` fails the page and everything `init` created under it
    /// are removed again.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` or `SiteError::DuplicateId` for a bad id,
    /// `SiteError::Uninitialized` if the path needs resolution and no resolver
    /// is available, or any error returned by `init`.
    pub fn page<F>(&mut self, id: &str, path: &str, init: F) -> Result<PageId, SiteError>
    where
        F: FnOnce(&mut PageScope<'_>) -> Result<(), SiteError>,
    {
        self.build_page(None, id, path, init)
    }

    /// Stage a page for removal. The page stays in the tree.
    ///
    /// Staging the same page twice has no further effect. Unknown handles are
    /// ignored.
    pub fn remove_page(&mut self, handle: PageId) {
        let Some(page) = self.pages.get_mut(handle.index()) else {
            return;
        };
        if page.state == NodeState::PendingRemoval {
            return;
        }
        page.state = NodeState::PendingRemoval;
        self.pages_to_remove.push(handle);
        tracing::debug!(site = %self.id, page = %self.page_at(handle).id(), "Page staged for removal");
    }

    /// Append root content, assign its parent, run `init`, then resolve its
    /// path if non-blank.
    ///
    /// Resolution runs once per non-blank path, after `init`, so a path set by
    /// `init` is resolved as well. Nested content added by `init` is resolved
    /// the same way.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` or `SiteError::DuplicateId` for a bad id,
    /// or `SiteError::Uninitialized` if a path needs resolution and no
    /// resolver is available.
    pub fn content<F>(&mut self, content: Content, init: F) -> Result<&Content, SiteError>
    where
        F: FnOnce(&mut Content),
    {
        self.add_content_to(Slot::Root, content, init)
    }

    /// Resolve an existing content id. Alias of [`Site::get_content_by_id`].
    ///
    /// # Errors
    ///
    /// Returns `SiteError::ContentNotFound` if no content has this id.
    pub fn content_by_id(&self, existing_id: &str) -> Result<&Content, SiteError> {
        self.get_content_by_id(existing_id)
    }

    /// Find content by id: page content first, then template content, then
    /// root content.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::ContentNotFound` if no content has this id.
    pub fn get_content_by_id(&self, existing_id: &str) -> Result<&Content, SiteError> {
        self.walk_pages()
            .into_iter()
            .find_map(|page| page.find_content(existing_id))
            .or_else(|| {
                self.templates
                    .iter()
                    .find_map(|template| template.find_content(existing_id))
            })
            .or_else(|| ContentContainer::find_content(self, existing_id))
            .ok_or_else(|| SiteError::ContentNotFound(existing_id.to_owned()))
    }

    /// Stage root content for deletion.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` for a blank id or `SiteError::Uninitialized`
    /// if its path needs resolution and no resolver is available.
    pub fn remove_content(&mut self, content: Content) -> Result<&Content, SiteError> {
        self.stage_content_in(Slot::Root, content)
    }

    /// Templates, in creation order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Layouts, in creation order.
    #[must_use]
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Template by id.
    #[must_use]
    pub fn get_template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id() == id)
    }

    /// Layout by id.
    #[must_use]
    pub fn get_layout(&self, id: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.id() == id)
    }

    /// Create a template and run `init` on it. A failed `init` leaves no template
    /// behind.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` or `SiteError::DuplicateId` for a bad id,
    /// or any error returned by `init`.
    pub fn template<F>(&mut self, id: &str, init: F) -> Result<&Template, SiteError>
    where
        F: FnOnce(&mut ArtifactScope<'_>) -> Result<(), SiteError>,
    {
        require_id(id, NodeKind::Template)?;
        if self.get_template(id).is_some() {
            return Err(SiteError::DuplicateId {
                kind: NodeKind::Template,
                id: id.to_owned(),
            });
        }

        let checkpoint = self.checkpoint(None);
        let idx = self.templates.len();
        self.templates
            .push(Template::new(id.to_owned(), self.id.clone()));
        tracing::debug!(site = %self.id, template = %id, "Template added");

        if let Err(err) = init(&mut ArtifactScope::new(self, Slot::Template(idx))) {
            self.rollback(checkpoint);
            return Err(err);
        }
        Ok(&self.templates[idx])
    }

    /// Create a layout and run `init` on it. A failed `init` leaves no layout
    /// behind.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` or `SiteError::DuplicateId` for a bad id,
    /// or any error returned by `init`.
    pub fn layout<F>(&mut self, id: &str, init: F) -> Result<&Layout, SiteError>
    where
        F: FnOnce(&mut ArtifactScope<'_>) -> Result<(), SiteError>,
    {
        require_id(id, NodeKind::Layout)?;
        if self.get_layout(id).is_some() {
            return Err(SiteError::DuplicateId {
                kind: NodeKind::Layout,
                id: id.to_owned(),
            });
        }

        let checkpoint = self.checkpoint(None);
        let idx = self.layouts.len();
        self.layouts.push(Layout::new(id.to_owned(), self.id.clone()));
        tracing::debug!(site = %self.id, layout = %id, "Layout added");

        if let Err(err) = init(&mut ArtifactScope::new(self, Slot::Layout(idx))) {
            self.rollback(checkpoint);
            return Err(err);
        }
        Ok(&self.layouts[idx])
    }

    /// Hostnames, in registration order.
    #[must_use]
    pub fn hostnames(&self) -> &[Hostname] {
        &self.hostnames
    }

    /// Bind `name` to an existing root page.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PageNotFound` if no root page has the id, or
    /// `SiteError::DuplicateHostname` if the address is already bound.
    pub fn hostname(&mut self, name: &str, welcome_page_id: &str) -> Result<&Hostname, SiteError> {
        self.ensure_unique_hostname(name)?;
        let page = self
            .child_page(welcome_page_id)
            .ok_or_else(|| SiteError::PageNotFound(welcome_page_id.to_owned()))?
            .handle();
        Ok(self.push_hostname(name, page))
    }

    /// Bind `name` to a root page, creating the page if it does not exist, and
    /// run `init` on it.
    ///
    /// On failure a page created by this call is removed and a reused page is
    /// restored to its prior state.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::MissingPath` if the page path is still blank after
    /// `init`, `SiteError::DuplicateHostname` if the address is already bound,
    /// or any error returned by `init`.
    pub fn hostname_with<F>(
        &mut self,
        name: &str,
        welcome_page_id: &str,
        init: F,
    ) -> Result<&Hostname, SiteError>
    where
        F: FnOnce(&mut PageScope<'_>) -> Result<(), SiteError>,
    {
        self.ensure_unique_hostname(name)?;
        let mut checkpoint = self.checkpoint(None);
        let page = match self.child_page(welcome_page_id) {
            Some(page) => {
                checkpoint.reused_page = Some(page.clone());
                page.handle()
            }
            None => {
                require_id(welcome_page_id, NodeKind::Page)?;
                self.push_page(None, welcome_page_id.to_owned(), String::new())
            }
        };

        let mut result = init(&mut PageScope::new(self, page));
        if result.is_ok() && is_blank(self.page_at(page).path()) {
            result = Err(SiteError::MissingPath(welcome_page_id.to_owned()));
        }
        if let Err(err) = result {
            self.rollback(checkpoint);
            return Err(err);
        }
        Ok(self.push_hostname(name, page))
    }

    /// Welcome page for a host. Matching ignores case, port and a trailing dot.
    #[must_use]
    pub fn route(&self, host: &str) -> Option<&Page> {
        self.hostnames
            .iter()
            .find(|hostname| hostname.matches(host))
            .map(|hostname| self.page_at(hostname.welcome_page()))
    }

    /// Register a callback fired once, after the site is registered with its
    /// definition. Callbacks fire in registration order.
    pub fn on_constructed<F>(&mut self, callback: F)
    where
        F: FnOnce(&Site) + Send + 'static,
    {
        self.callback_queue().push(Box::new(callback));
    }

    /// Number of callbacks waiting for construction to complete.
    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Resolve placeholders through the owning definition's resolver.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Uninitialized` if the site has no live definition
    /// or the definition has no resolver.
    pub fn resolve_placeholders(&self, template: &str) -> Result<String, SiteError> {
        Ok(self.resolver()?.resolve_placeholders(template))
    }

    pub(crate) fn set_definition(&mut self, definition: Weak<SiteDefinition>) {
        self.parent = definition;
    }

    pub(crate) fn take_callbacks(&mut self) -> Vec<SiteCallback> {
        std::mem::take(self.callback_queue())
    }

    fn callback_queue(&mut self) -> &mut Vec<SiteCallback> {
        self.callbacks
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn page_at(&self, handle: PageId) -> &Page {
        &self.pages[handle.index()]
    }

    pub(crate) fn page_at_mut(&mut self, handle: PageId) -> &mut Page {
        &mut self.pages[handle.index()]
    }

    pub(crate) fn resolve_if_present(&self, path: &str) -> Result<String, SiteError> {
        if is_blank(path) {
            return Ok(path.to_owned());
        }
        self.resolve_placeholders(path)
    }

    pub(crate) fn build_page<F>(
        &mut self,
        parent: Option<PageId>,
        id: &str,
        path: &str,
        init: F,
    ) -> Result<PageId, SiteError>
    where
        F: FnOnce(&mut PageScope<'_>) -> Result<(), SiteError>,
    {
        require_id(id, NodeKind::Page)?;
        let siblings: &[PageId] = match parent {
            Some(handle) => self.page_at(handle).children(),
            None => &self.children,
        };
        if siblings.iter().any(|&s| self.page_at(s).id() == id) {
            return Err(SiteError::DuplicateId {
                kind: NodeKind::Page,
                id: id.to_owned(),
            });
        }

        let path = self.resolve_if_present(path)?;
        let checkpoint = self.checkpoint(parent);
        let handle = self.push_page(parent, id.to_owned(), path);
        if let Err(err) = init(&mut PageScope::new(self, handle)) {
            self.rollback(checkpoint);
            return Err(err);
        }
        Ok(handle)
    }

    pub(crate) fn add_content_to<F>(
        &mut self,
        slot: Slot,
        content: Content,
        init: F,
    ) -> Result<&Content, SiteError>
    where
        F: FnOnce(&mut Content),
    {
        require_id(content.id(), NodeKind::Content)?;
        let container = self.container(slot);
        ensure_unique_content(container.content_list(), content.id())?;
        let parent = container.as_parent();

        let content = self.prepare_content(content, parent, NodeState::Active, init)?;
        tracing::debug!(
            site = %self.id,
            container = %self.slot_id(slot),
            content = %content.id(),
            "Content added"
        );

        let list = self.container_mut(slot).content_list_mut();
        let idx = list.len();
        list.push(content);
        Ok(&list[idx])
    }

    pub(crate) fn stage_content_in(
        &mut self,
        slot: Slot,
        content: Content,
    ) -> Result<&Content, SiteError> {
        require_id(content.id(), NodeKind::Content)?;
        let parent = self.container(slot).as_parent();
        let content = self.prepare_content(content, parent, NodeState::PendingRemoval, |_| {})?;

        let list = self.container_mut(slot).content_to_remove_mut();
        let idx = list.len();
        list.push(content);
        Ok(&list[idx])
    }

    pub(crate) fn container(&self, slot: Slot) -> &dyn ContentContainer {
        match slot {
            Slot::Root => self,
            Slot::Page(handle) => self.page_at(handle),
            Slot::Template(idx) => &self.templates[idx],
            Slot::Layout(idx) => &self.layouts[idx],
        }
    }

    fn container_mut(&mut self, slot: Slot) -> &mut dyn ContentStore {
        match slot {
            Slot::Root => self,
            Slot::Page(handle) => self.page_at_mut(handle),
            Slot::Template(idx) => &mut self.templates[idx],
            Slot::Layout(idx) => &mut self.layouts[idx],
        }
    }

    pub(crate) fn slot_id(&self, slot: Slot) -> &str {
        match slot {
            Slot::Root => &self.id,
            Slot::Page(handle) => self.page_at(handle).id(),
            Slot::Template(idx) => self.templates[idx].id(),
            Slot::Layout(idx) => self.layouts[idx].id(),
        }
    }

    fn resolver(&self) -> Result<Arc<dyn PlaceholderResolver>, SiteError> {
        let definition = self
            .parent
            .upgrade()
            .ok_or(SiteError::Uninitialized("site definition"))?;
        definition
            .placeholder_resolver()
            .map(Arc::clone)
            .ok_or(SiteError::Uninitialized("placeholder resolver"))
    }

    /// Adopt detached content, run its initializer and resolve every
    /// non-blank path in it.
    fn prepare_content<F>(
        &self,
        mut content: Content,
        parent: ParentRef,
        state: NodeState,
        init: F,
    ) -> Result<Content, SiteError>
    where
        F: FnOnce(&mut Content),
    {
        content.adopt(parent, state);
        init(&mut content);

        if content.has_path_in_tree() {
            let resolver = self.resolver()?;
            content.visit_mut(&mut |node: &mut Content| {
                if !is_blank(&node.path) {
                    node.path = resolver.resolve_placeholders(&node.path);
                }
            });
        }
        Ok(content)
    }

    fn checkpoint(&mut self, parent: Option<PageId>) -> Checkpoint {
        Checkpoint {
            pages: self.pages.len(),
            children: self.children.len(),
            pages_to_remove: self.pages_to_remove.len(),
            templates: self.templates.len(),
            layouts: self.layouts.len(),
            callbacks: self.callback_queue().len(),
            parent: parent.map(|handle| (handle, self.page_at(handle).children.len())),
            reused_page: None,
        }
    }

    /// Drop every node created since `checkpoint` and restore a reused page.
    fn rollback(&mut self, checkpoint: Checkpoint) {
        tracing::debug!(
            site = %self.id,
            pages = self.pages.len() - checkpoint.pages,
            "Rolling back failed builder call"
        );
        self.pages.truncate(checkpoint.pages);
        self.children.truncate(checkpoint.children);
        self.pages_to_remove.truncate(checkpoint.pages_to_remove);
        self.templates.truncate(checkpoint.templates);
        self.layouts.truncate(checkpoint.layouts);
        self.callback_queue().truncate(checkpoint.callbacks);
        if let Some((handle, len)) = checkpoint.parent {
            self.page_at_mut(handle).children.truncate(len);
        }
        if let Some(page) = checkpoint.reused_page {
            let handle = page.handle();
            *self.page_at_mut(handle) = page;
        }
    }

    fn push_page(&mut self, parent: Option<PageId>, id: String, path: String) -> PageId {
        let handle = PageId::new(self.pages.len());
        let parent_ref = parent.map_or_else(|| ParentRef::Site(self.id.clone()), ParentRef::Page);
        tracing::debug!(site = %self.id, page = %id, path = %path, "Page added");

        self.pages
            .push(Page::new(handle, id, path, self.id.clone(), parent_ref));
        match parent {
            Some(p) => self.page_at_mut(p).children.push(handle),
            None => self.children.push(handle),
        }
        handle
    }

    fn ensure_unique_hostname(&self, name: &str) -> Result<(), SiteError> {
        let normalized = normalize_host(name);
        if self
            .hostnames
            .iter()
            .any(|h| normalize_host(h.address()) == normalized)
        {
            return Err(SiteError::DuplicateHostname(name.to_owned()));
        }
        Ok(())
    }

    fn push_hostname(&mut self, name: &str, page: PageId) -> &Hostname {
        tracing::debug!(site = %self.id, hostname = %name, page = %self.page_at(page).id(), "Hostname added");
        let idx = self.hostnames.len();
        self.hostnames.push(Hostname::new(name.to_owned(), page));
        &self.hostnames[idx]
    }
}

/// Collection sizes recorded before a builder runs its initializer.
///
/// Initializers only append to the site, so truncating to these sizes undoes
/// them. The one page an initializer can change in place is the reused
/// hostname welcome page, which is kept whole.
struct Checkpoint {
    pages: usize,
    children: usize,
    pages_to_remove: usize,
    templates: usize,
    layouts: usize,
    callbacks: usize,
    parent: Option<(PageId, usize)>,
    reused_page: Option<Page>,
}

impl ContentContainer for Site {
    fn content_list(&self) -> &[Content] {
        &self.content
    }

    fn content_to_remove(&self) -> &[Content] {
        &self.content_to_remove
    }

    fn as_parent(&self) -> ParentRef {
        ParentRef::Site(self.id.clone())
    }
}

impl ContentStore for Site {
    fn content_list_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content
    }

    fn content_to_remove_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content_to_remove
    }
}

impl fmt::Debug for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("id", &self.id)
            .field("primary_locale", &self.primary_locale)
            .field("default_timezone", &self.default_timezone)
            .field("pages", &self.pages)
            .field("children", &self.children)
            .field("templates", &self.templates)
            .field("layouts", &self.layouts)
            .field("content", &self.content)
            .field("hostnames", &self.hostnames)
            .field("pending_callbacks", &self.pending_callbacks())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ids: Vec<&str>| ids.join(", ");
        write!(
            f,
            "Site(id='{}', pages=[{}], hostnames=[{}], templates=[{}], layouts=[{}])",
            self.id,
            join(self.children.iter().map(|&h| self.page_at(h).id()).collect()),
            join(self.hostnames.iter().map(Hostname::address).collect()),
            join(self.templates.iter().map(Template::id).collect()),
            join(self.layouts.iter().map(Layout::id).collect()),
        )
    }
}
