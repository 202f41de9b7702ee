//! Staged deletions collected across a site.
//!
//! Builder calls only stage removals; nothing leaves the tree. A
//! [`RemovalPlan`] lists everything that is staged so a downstream
//! compaction step can apply it.

use serde::Serialize;

use crate::content::Content;
use crate::node::{ContentContainer, ParentRef};
use crate::site::Site;

/// A page staged for removal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StagedPage {
    /// Page id.
    pub id: String,
    /// Resolved page path.
    pub path: String,
}

/// A content item staged for removal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StagedContent {
    /// Container the content was staged in.
    #[serde(skip)]
    pub container: ParentRef,
    /// Container id, for display.
    pub container_id: String,
    /// Content id.
    pub id: String,
    /// Resolved content path.
    pub path: String,
}

/// Everything staged for deletion in one site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RemovalPlan {
    /// Staged pages, in staging order.
    pub pages: Vec<StagedPage>,
    /// Staged content, grouped by container.
    pub content: Vec<StagedContent>,
}

impl RemovalPlan {
    /// True if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.content.is_empty()
    }

    /// Number of staged nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len() + self.content.len()
    }

    fn collect_from(&mut self, container: &dyn ContentContainer, container_id: &str) {
        let parent = container.as_parent();
        for content in container.content_to_remove() {
            self.content.push(StagedContent {
                container: parent.clone(),
                container_id: container_id.to_owned(),
                id: content.id().to_owned(),
                path: content.path.clone(),
            });
        }
        for content in container.content_list() {
            self.collect_nested(content);
        }
    }

    fn collect_nested(&mut self, content: &Content) {
        let id = content.id().to_owned();
        self.collect_from(content, &id);
    }
}

impl Site {
    /// Collect every staged page and content item.
    ///
    /// Containers are visited root content first, then pages in pre-order,
    /// then templates and layouts.
    #[must_use]
    pub fn removal_plan(&self) -> RemovalPlan {
        let mut plan = RemovalPlan {
            pages: self
                .pages_to_remove()
                .map(|page| StagedPage {
                    id: page.id().to_owned(),
                    path: page.path().to_owned(),
                })
                .collect(),
            content: Vec::new(),
        };

        plan.collect_from(self, self.id());
        for page in self.walk_pages() {
            plan.collect_from(page, page.id());
        }
        for template in self.templates() {
            plan.collect_from(template, template.id());
        }
        for layout in self.layouts() {
            plan.collect_from(layout, layout.id());
        }

        if !plan.is_empty() {
            tracing::debug!(site = %self.id(), staged = plan.len(), "Removal plan collected");
        }
        plan
    }
}
