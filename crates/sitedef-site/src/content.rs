//! Content nodes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SiteError;
use crate::node::{ContentContainer, ContentStore, NodeState, ParentRef, is_blank};

/// Kind of content payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Plain text.
    #[default]
    Text,
    /// Raw HTML fragment.
    Html,
    /// Image reference; `body` holds the source.
    Image,
    /// Hyperlink; `body` holds the target.
    Link,
    /// Grouping of nested content.
    Composite,
}

impl ContentKind {
    /// Lowercase name used in manifests and outlines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Image => "image",
            Self::Link => "link",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "image" => Ok(Self::Image),
            "link" => Ok(Self::Link),
            "composite" => Ok(Self::Composite),
            _ => Err(SiteError::UnknownContentKind(s.to_owned())),
        }
    }
}

/// A content item.
///
/// Content is created detached, configured, then handed to a builder call
/// (`Site::content`, `PageScope::content`, ...) which assigns its parent and
/// resolves path placeholders. Any content can hold nested content through
/// [`Content::add_content`]; [`ContentKind::Composite`] marks content that
/// exists only for grouping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    id: String,
    /// Path the content is published under. Blank means unpublished.
    pub path: String,
    /// Payload kind.
    pub kind: ContentKind,
    /// Payload: text, HTML, image source or link target depending on `kind`.
    pub body: String,
    parent: Option<ParentRef>,
    state: NodeState,
    children: Vec<Content>,
    children_to_remove: Vec<Content>,
}

impl Content {
    /// Create detached text content with no body and a blank path.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: String::new(),
            kind: ContentKind::Text,
            body: String::new(),
            parent: None,
            state: NodeState::Active,
            children: Vec::new(),
            children_to_remove: Vec::new(),
        }
    }

    /// Create text content.
    #[must_use]
    pub fn text(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id).with_body(body)
    }

    /// Create an HTML fragment.
    #[must_use]
    pub fn html(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id).with_kind(ContentKind::Html).with_body(body)
    }

    /// Create composite content for grouping nested items.
    #[must_use]
    pub fn composite(id: impl Into<String>) -> Self {
        Self::new(id).with_kind(ContentKind::Composite)
    }

    /// Set the path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the payload kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the payload body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Content id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Enclosing node, `None` while detached.
    #[must_use]
    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// True if this content is staged for deletion.
    #[must_use]
    pub fn is_pending_removal(&self) -> bool {
        self.state == NodeState::PendingRemoval
    }

    /// Nest `content` under this node, assigning its parent.
    ///
    /// Paths are stored as given and resolved once this node is handed to a
    /// site builder.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` for a blank id and `SiteError::DuplicateId`
    /// if a live sibling already uses the id.
    pub fn add_content(&mut self, content: Content) -> Result<&mut Content, SiteError> {
        self.push_live(content)
    }

    /// Stage nested content for deletion without touching the live list.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::EmptyId` for a blank id.
    pub fn stage_content_removal(&mut self, content: Content) -> Result<&mut Content, SiteError> {
        self.push_staged(content)
    }

    pub(crate) fn adopt(&mut self, parent: ParentRef, state: NodeState) {
        self.parent = Some(parent);
        self.state = state;
    }

    /// Depth-first match on this node, then its live nested content.
    pub(crate) fn find_self_or_nested(&self, id: &str) -> Option<&Content> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_self_or_nested(id))
    }

    /// True if this node or any nested node (live or staged) has a path.
    pub(crate) fn has_path_in_tree(&self) -> bool {
        !is_blank(&self.path)
            || self
                .children
                .iter()
                .chain(&self.children_to_remove)
                .any(Content::has_path_in_tree)
    }

    /// Visit this node and every nested node, live then staged.
    pub(crate) fn visit_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Content),
    {
        f(self);
        for child in self
            .children
            .iter_mut()
            .chain(self.children_to_remove.iter_mut())
        {
            child.visit_mut(f);
        }
    }
}

impl ContentContainer for Content {
    fn content_list(&self) -> &[Content] {
        &self.children
    }

    fn content_to_remove(&self) -> &[Content] {
        &self.children_to_remove
    }

    fn as_parent(&self) -> ParentRef {
        ParentRef::Content(self.id.clone())
    }
}

impl ContentStore for Content {
    fn content_list_mut(&mut self) -> &mut Vec<Content> {
        &mut self.children
    }

    fn content_to_remove_mut(&mut self) -> &mut Vec<Content> {
        &mut self.children_to_remove
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_content_is_detached_and_active() {
        let content = Content::new("intro");

        assert_eq!(content.id(), "intro");
        assert!(content.parent().is_none());
        assert_eq!(content.state(), NodeState::Active);
        assert!(content.path.is_empty());
        assert_eq!(content.kind, ContentKind::Text);
    }

    #[test]
    fn test_builders_set_fields() {
        let content = Content::html("banner", "<b>Hi</b>").with_path("/banner");

        assert_eq!(content.kind, ContentKind::Html);
        assert_eq!(content.body, "<b>Hi</b>");
        assert_eq!(content.path, "/banner");
    }

    #[test]
    fn test_content_kind_from_str_is_case_insensitive() {
        assert_eq!("HTML".parse::<ContentKind>().unwrap(), ContentKind::Html);
        assert_eq!(
            " composite ".parse::<ContentKind>().unwrap(),
            ContentKind::Composite
        );
    }

    #[test]
    fn test_content_kind_from_str_rejects_unknown() {
        let err = "video".parse::<ContentKind>().unwrap_err();
        assert_eq!(err, SiteError::UnknownContentKind("video".to_owned()));
    }

    #[test]
    fn test_has_path_in_tree_sees_nested_paths() {
        let mut group = Content::composite("group");
        assert!(!group.has_path_in_tree());

        group
            .add_content(Content::new("leaf").with_path("/leaf"))
            .unwrap();

        assert!(group.has_path_in_tree());
    }

    #[test]
    fn test_visit_mut_visits_live_and_staged() {
        let mut group = Content::composite("group");
        group.add_content(Content::new("a")).unwrap();
        group.stage_content_removal(Content::new("b")).unwrap();

        let mut seen = Vec::new();
        group.visit_mut(&mut |c: &mut Content| seen.push(c.id().to_owned()));

        assert_eq!(seen, vec!["group", "a", "b"]);
    }
}
