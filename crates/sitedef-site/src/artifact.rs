//! Site-scoped named artifacts: templates and layouts.

use crate::content::Content;
use crate::error::SiteError;
use crate::node::{ContentContainer, ContentStore, ParentRef};
use crate::site::{Site, Slot};

/// A named template owned by one site.
///
/// Template content is searched by [`Site::get_content_by_id`] after page
/// content and before root content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    id: String,
    site: String,
    content: Vec<Content>,
    content_to_remove: Vec<Content>,
}

impl Template {
    pub(crate) fn new(id: String, site: String) -> Self {
        Self {
            id,
            site,
            content: Vec::new(),
            content_to_remove: Vec::new(),
        }
    }

    /// Template id, unique within the site.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the owning site.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site
    }
}

impl ContentContainer for Template {
    fn content_list(&self) -> &[Content] {
        &self.content
    }

    fn content_to_remove(&self) -> &[Content] {
        &self.content_to_remove
    }

    fn as_parent(&self) -> ParentRef {
        ParentRef::Template(self.id.clone())
    }
}

impl ContentStore for Template {
    fn content_list_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content
    }

    fn content_to_remove_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content_to_remove
    }
}

/// A named layout owned by one site.
///
/// Layout content is not part of site-wide content lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    id: String,
    site: String,
    content: Vec<Content>,
    content_to_remove: Vec<Content>,
}

impl Layout {
    pub(crate) fn new(id: String, site: String) -> Self {
        Self {
            id,
            site,
            content: Vec::new(),
            content_to_remove: Vec::new(),
        }
    }

    /// Layout id, unique within the site.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the owning site.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site
    }
}

impl ContentContainer for Layout {
    fn content_list(&self) -> &[Content] {
        &self.content
    }

    fn content_to_remove(&self) -> &[Content] {
        &self.content_to_remove
    }

    fn as_parent(&self) -> ParentRef {
        ParentRef::Layout(self.id.clone())
    }
}

impl ContentStore for Layout {
    fn content_list_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content
    }

    fn content_to_remove_mut(&mut self) -> &mut Vec<Content> {
        &mut self.content_to_remove
    }
}

/// Builder scope handed to template and layout initializers.
pub struct ArtifactScope<'a> {
    site: &'a mut Site,
    slot: Slot,
}

impl<'a> ArtifactScope<'a> {
    pub(crate) fn new(site: &'a mut Site, slot: Slot) -> Self {
        Self { site, slot }
    }

    /// Id of the template or layout being built.
    #[must_use]
    pub fn id(&self) -> &str {
        self.site.slot_id(self.slot)
    }

    /// Read access to the site under construction.
    #[must_use]
    pub fn site(&self) -> &Site {
        &*self.site
    }

    /// Append content. See [`Site::content`].
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or taken, or if resolution fails.
    pub fn content<F>(&mut self, content: Content, init: F) -> Result<&Content, SiteError>
    where
        F: FnOnce(&mut Content),
    {
        self.site.add_content_to(self.slot, content, init)
    }

    /// Stage content for deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or path resolution fails.
    pub fn remove_content(&mut self, content: Content) -> Result<&Content, SiteError> {
        self.site.stage_content_in(self.slot, content)
    }
}
