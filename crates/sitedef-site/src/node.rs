//! Node identity, parent linkage and the content container capability.
//!
//! Nodes never own their parent. A [`ParentRef`] names the enclosing node by
//! id (or by [`PageId`] for pages, which live in the site's page arena), so a
//! back-reference can never keep a container alive or form a cycle.

use serde::Serialize;

use crate::content::Content;
use crate::error::{NodeKind, SiteError};

/// Handle to a page in a site's page arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(usize);

impl PageId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Non-owning reference from a node to its enclosing node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// Owned directly by the site with this id.
    Site(String),
    /// Owned by a page.
    Page(PageId),
    /// Owned by the template with this id.
    Template(String),
    /// Owned by the layout with this id.
    Layout(String),
    /// Nested inside the composite content with this id.
    Content(String),
}

/// Lifecycle tag used for two-phase removal.
///
/// A node marked [`NodeState::PendingRemoval`] stays in its live collection
/// until an external compaction step consumes the site's
/// [`RemovalPlan`](crate::RemovalPlan).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Live node.
    #[default]
    Active,
    /// Staged for deletion.
    PendingRemoval,
}

/// Read access shared by every node that holds [`Content`] children.
///
/// Implemented by [`Site`](crate::Site), [`Page`](crate::Page),
/// [`Template`](crate::Template), [`Layout`](crate::Layout) and
/// [`Content`] itself (composite content).
///
/// Attached containers are only mutated through the site builders, which
/// resolve paths and assign parents. The raw lists are not exposed:
///
/// ```compile_fail
/// use sitedef_site::{Content, ContentContainer, Site};
///
/// let mut site = Site::new("s");
/// site.content_list_mut().push(Content::new("x"));
/// ```
pub trait ContentContainer {
    /// Live content, in insertion order.
    fn content_list(&self) -> &[Content];

    /// Content staged for deletion, in staging order.
    fn content_to_remove(&self) -> &[Content];

    /// Back-reference that children of this container carry.
    fn as_parent(&self) -> ParentRef;

    /// Find content by id in this container, searching nested content depth-first.
    fn find_content(&self, id: &str) -> Option<&Content> {
        self.content_list()
            .iter()
            .find_map(|content| content.find_self_or_nested(id))
    }
}

/// Raw list access for the builders. Callers must resolve paths first.
pub(crate) trait ContentStore: ContentContainer {
    fn content_list_mut(&mut self) -> &mut Vec<Content>;

    fn content_to_remove_mut(&mut self) -> &mut Vec<Content>;

    /// Adopt `content` into the live list.
    fn push_live(&mut self, mut content: Content) -> Result<&mut Content, SiteError> {
        require_id(content.id(), NodeKind::Content)?;
        ensure_unique_content(self.content_list(), content.id())?;
        content.adopt(self.as_parent(), NodeState::Active);
        let list = self.content_list_mut();
        let idx = list.len();
        list.push(content);
        Ok(&mut list[idx])
    }

    /// Adopt `content` into the staging list.
    fn push_staged(&mut self, mut content: Content) -> Result<&mut Content, SiteError> {
        require_id(content.id(), NodeKind::Content)?;
        content.adopt(self.as_parent(), NodeState::PendingRemoval);
        let list = self.content_to_remove_mut();
        let idx = list.len();
        list.push(content);
        Ok(&mut list[idx])
    }
}

/// Reject blank ids.
pub(crate) fn require_id(id: &str, kind: NodeKind) -> Result<(), SiteError> {
    if id.trim().is_empty() {
        return Err(SiteError::EmptyId(kind));
    }
    Ok(())
}

/// Reject an id already used by live sibling content.
pub(crate) fn ensure_unique_content(siblings: &[Content], id: &str) -> Result<(), SiteError> {
    if siblings.iter().any(|c| c.id() == id) {
        return Err(SiteError::DuplicateId {
            kind: NodeKind::Content,
            id: id.to_owned(),
        });
    }
    Ok(())
}

/// Empty or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_content_sets_parent_from_container() {
        let mut group = Content::composite("gallery");

        let child = group.add_content(Content::text("caption", "Hi")).unwrap();

        assert_eq!(
            child.parent(),
            Some(&ParentRef::Content("gallery".to_owned()))
        );
        assert_eq!(child.state(), NodeState::Active);
    }

    #[test]
    fn test_add_content_rejects_duplicate_sibling() {
        let mut group = Content::composite("gallery");
        group.add_content(Content::new("a")).unwrap();

        let err = group.add_content(Content::new("a")).unwrap_err();

        assert_eq!(
            err,
            SiteError::DuplicateId {
                kind: NodeKind::Content,
                id: "a".to_owned()
            }
        );
    }

    #[test]
    fn test_add_content_rejects_blank_id() {
        let mut group = Content::composite("gallery");

        let err = group.add_content(Content::new("  ")).unwrap_err();

        assert_eq!(err, SiteError::EmptyId(NodeKind::Content));
    }

    #[test]
    fn test_stage_content_removal_keeps_live_list_untouched() {
        let mut group = Content::composite("gallery");
        group.add_content(Content::new("a")).unwrap();

        group.stage_content_removal(Content::new("a")).unwrap();

        assert_eq!(group.content_list().len(), 1);
        assert_eq!(group.content_to_remove().len(), 1);
        assert_eq!(
            group.content_to_remove()[0].state(),
            NodeState::PendingRemoval
        );
    }

    #[test]
    fn test_find_content_searches_nested() {
        let mut group = Content::composite("outer");
        let inner = group.add_content(Content::composite("inner")).unwrap();
        inner.add_content(Content::new("leaf")).unwrap();

        let found = group.find_content("leaf").unwrap();

        assert_eq!(found.parent(), Some(&ParentRef::Content("inner".to_owned())));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank("/a"));
    }
}
