//! Error types for site construction and lookup.

use std::fmt;

/// Kind of node in a site hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A [`Site`](crate::Site) root.
    Site,
    /// A [`Page`](crate::Page) in the page tree.
    Page,
    /// A [`Content`](crate::Content) item.
    Content,
    /// A [`Template`](crate::Template).
    Template,
    /// A [`Layout`](crate::Layout).
    Layout,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Site => "site",
            Self::Page => "page",
            Self::Content => "content",
            Self::Template => "template",
            Self::Layout => "layout",
        };
        f.write_str(name)
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SiteErrorKind {
    /// A requested node does not exist.
    NotFound,
    /// A builder call left a node in an unusable state.
    InvalidState,
    /// A collaborator was used before it was assigned.
    Uninitialized,
    /// A node id collides with a sibling.
    DuplicateId,
    /// An id or value is malformed.
    Invalid,
}

/// Error raised by builder operations and lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    /// No content with the requested id in pages, templates or root content.
    #[error("No content with id: {0}")]
    ContentNotFound(String),
    /// No child page with the requested id.
    #[error("No such page: {0}")]
    PageNotFound(String),
    /// A welcome page still has a blank path after its initializer ran.
    #[error("Missing path for page: {0}")]
    MissingPath(String),
    /// A collaborator was needed before being assigned.
    #[error("{0} is not initialized")]
    Uninitialized(&'static str),
    /// A collaborator was assigned twice.
    #[error("{0} is already initialized")]
    AlreadyInitialized(&'static str),
    /// Id collides with an existing sibling of the same kind.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// Kind of the colliding node.
        kind: NodeKind,
        /// The colliding id.
        id: String,
    },
    /// Hostname address already routed by this site.
    #[error("Duplicate hostname: {0}")]
    DuplicateHostname(String),
    /// Blank id passed to a builder call.
    #[error("{0} id cannot be empty")]
    EmptyId(NodeKind),
    /// Unrecognized content kind name.
    #[error("Unknown content kind: {0}")]
    UnknownContentKind(String),
}

impl SiteError {
    /// Semantic category of this error.
    #[must_use]
    pub fn kind(&self) -> SiteErrorKind {
        match self {
            Self::ContentNotFound(_) | Self::PageNotFound(_) => SiteErrorKind::NotFound,
            Self::MissingPath(_) | Self::AlreadyInitialized(_) => SiteErrorKind::InvalidState,
            Self::Uninitialized(_) => SiteErrorKind::Uninitialized,
            Self::DuplicateId { .. } | Self::DuplicateHostname(_) => SiteErrorKind::DuplicateId,
            Self::EmptyId(_) | Self::UnknownContentKind(_) => SiteErrorKind::Invalid,
        }
    }
}
