//! Pages and the page builder scope.

use crate::content::Content;
use crate::error::SiteError;
use crate::node::{ContentContainer, ContentStore, NodeState, PageId, ParentRef};
use crate::site::{Site, Slot};

/// A page in a site's page tree.
///
/// Pages live in the owning [`Site`]'s arena and reference each other by
/// [`PageId`]. A page is both a tree node (it may have child pages) and a
/// [`ContentContainer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    id: String,
    pub(crate) path: String,
    site: String,
    parent: ParentRef,
    pub(crate) children: Vec<PageId>,
    content: Vec<Content>,
    content_to_remove: Vec<Content>,
    pub(crate) state: NodeState,
    handle: PageId,
}

impl Page {
    pub(crate) fn new(
        handle: PageId,
        id: String,
        path: String,
        site: String,
        parent: ParentRef,
    ) -> Self {
        Self {
            id,
            path,
            site,
            parent,
            children: Vec::new(),
            content: Vec::new(),
            content_to_remove: Vec::new(),
            state: NodeState::Active,
            handle,
        }
    }

    /// Page id, unique among its siblings.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Arena handle of this page.
    #[must_use]
    pub fn handle(&self) -> PageId {
        self.handle
    }

    /// Resolved path. Blank only for pages whose path was never assigned.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Id of the owning site.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site
    }

    /// Enclosing node: the site for root pages, a page for nested ones.
    #[must_use]
    pub fn parent(&self) -> &ParentRef {
        &self.parent
    }

    /// Child pages, in creation order.
    #[must_use]
    pub fn children(&self) -> &[PageId] {
        &self.children
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// True if this page is staged for deletion.
    #[must_use]
    pub fn is_pending_removal(&self) -> bool {
        self.state == NodeState::PendingRemoval
    }
}

impl ContentContainer for Page {
    fn content_list(&self) -> &[Content] {
        &self.content
    }

    fn content_to_remove(&self) -> &[Content] {
        &self.content_to_remove
    }

    fn as_parent(&self) -> ParentRef {
        ParentRef::Page(self.handle)
    }
}

impl ContentStore for Page {
    fn content_list_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content
    }

    fn content_to_remove_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content_to_remove
    }
}

/// Builder scope handed to page initializers.
///
/// Holds the site under construction so that nested builder calls can
/// resolve placeholders and append child nodes.
pub struct PageScope<'a> {
    site: &'a mut Site,
    page: PageId,
}

impl<'a> PageScope<'a> {
    pub(crate) fn new(site: &'a mut Site, page: PageId) -> Self {
        Self { site, page }
    }

    /// Handle of the page being built.
    #[must_use]
    pub fn page_id(&self) -> PageId {
        self.page
    }

    /// The page being built.
    #[must_use]
    pub fn get(&self) -> &Page {
        self.site.page_at(self.page)
    }

    /// Id of the page being built.
    #[must_use]
    pub fn id(&self) -> &str {
        self.get().id()
    }

    /// Current path of the page being built.
    #[must_use]
    pub fn path(&self) -> &str {
        self.get().path()
    }

    /// Read access to the site under construction.
    #[must_use]
    pub fn site(&self) -> &Site {
        &*self.site
    }

    /// Assign the page path, resolving placeholders if it is non-blank.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Uninitialized` if placeholders cannot be resolved.
    pub fn set_path(&mut self, path: &str) -> Result<(), SiteError> {
        let resolved = self.site.resolve_if_present(path)?;
        self.site.page_at_mut(self.page).path = resolved;
        Ok(())
    }

    /// Append content to this page. See [`Site::content`].
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or taken, or if resolution fails.
    pub fn content<F>(&mut self, content: Content, init: F) -> Result<&Content, SiteError>
    where
        F: FnOnce(&mut Content),
    {
        self.site.add_content_to(Slot::Page(self.page), content, init)
    }

    /// Stage content of this page for deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or path resolution fails.
    pub fn remove_content(&mut self, content: Content) -> Result<&Content, SiteError> {
        self.site.stage_content_in(Slot::Page(self.page), content)
    }

    /// Create a child page. See [`Site::page`].
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or taken among siblings, if path
    /// resolution fails, or if `init` fails.
    pub fn page<F>(&mut self, id: &str, path: &str, init: F) -> Result<PageId, SiteError>
    where
        F: FnOnce(&mut PageScope<'_>) -> Result<(), SiteError>,
    {
        self.site.build_page(Some(self.page), id, path, init)
    }

    /// Stage this page for removal. It stays in the page tree.
    pub fn remove(&mut self) {
        self.site.remove_page(self.page);
    }

    /// Register a callback fired after the site is registered.
    pub fn on_site_constructed<F>(&mut self, callback: F)
    where
        F: FnOnce(&Site) + Send + 'static,
    {
        self.site.on_constructed(callback);
    }
}
