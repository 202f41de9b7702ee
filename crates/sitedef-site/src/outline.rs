//! Serializable snapshot of a built site.

use serde::Serialize;

use crate::content::{Content, ContentKind};
use crate::node::{ContentContainer, NodeState};
use crate::page::Page;
use crate::site::Site;

/// Content entry in an outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentOutline {
    /// Content id.
    pub id: String,
    /// Payload kind.
    pub kind: ContentKind,
    /// Resolved path.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Lifecycle state.
    pub state: NodeState,
    /// Nested content, live then staged.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentOutline>,
}

impl ContentOutline {
    fn from_content(content: &Content) -> Self {
        Self {
            id: content.id().to_owned(),
            kind: content.kind,
            path: content.path.clone(),
            state: content.state(),
            children: content_entries(content),
        }
    }
}

/// Page entry in an outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageOutline {
    /// Page id.
    pub id: String,
    /// Resolved path.
    pub path: String,
    /// Lifecycle state.
    pub state: NodeState,
    /// Page content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentOutline>,
    /// Child pages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageOutline>,
}

/// Template or layout entry in an outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContainerOutline {
    /// Template or layout id.
    pub id: String,
    /// Its content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentOutline>,
}

/// Hostname entry in an outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostnameOutline {
    /// Host address as registered.
    pub address: String,
    /// Id of the welcome page.
    pub page: String,
    /// Path of the welcome page.
    pub path: String,
}

/// Tree view of a site, suitable for JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteOutline {
    /// Site id.
    pub id: String,
    /// Primary locale.
    #[serde(rename = "primaryLocale")]
    pub primary_locale: String,
    /// Default time zone.
    #[serde(rename = "defaultTimezone")]
    pub default_timezone: String,
    /// Host bindings.
    pub hostnames: Vec<HostnameOutline>,
    /// Root pages with their subtrees.
    pub pages: Vec<PageOutline>,
    /// Templates.
    pub templates: Vec<ContainerOutline>,
    /// Layouts.
    pub layouts: Vec<ContainerOutline>,
    /// Root content.
    pub content: Vec<ContentOutline>,
}

fn content_entries(container: &dyn ContentContainer) -> Vec<ContentOutline> {
    container
        .content_list()
        .iter()
        .chain(container.content_to_remove())
        .map(ContentOutline::from_content)
        .collect()
}

impl Site {
    /// Snapshot the site as a serializable tree.
    #[must_use]
    pub fn outline(&self) -> SiteOutline {
        SiteOutline {
            id: self.id().to_owned(),
            primary_locale: self.primary_locale.clone(),
            default_timezone: self.default_timezone.clone(),
            hostnames: self
                .hostnames()
                .iter()
                .map(|hostname| {
                    let page = self.page_at(hostname.welcome_page());
                    HostnameOutline {
                        address: hostname.address().to_owned(),
                        page: page.id().to_owned(),
                        path: page.path().to_owned(),
                    }
                })
                .collect(),
            pages: self
                .children()
                .iter()
                .map(|&handle| self.page_outline(self.page_at(handle)))
                .collect(),
            templates: self
                .templates()
                .iter()
                .map(|t| ContainerOutline {
                    id: t.id().to_owned(),
                    content: content_entries(t),
                })
                .collect(),
            layouts: self
                .layouts()
                .iter()
                .map(|l| ContainerOutline {
                    id: l.id().to_owned(),
                    content: content_entries(l),
                })
                .collect(),
            content: content_entries(self),
        }
    }

    fn page_outline(&self, page: &Page) -> PageOutline {
        PageOutline {
            id: page.id().to_owned(),
            path: page.path().to_owned(),
            state: page.state(),
            content: content_entries(page),
            children: page
                .children()
                .iter()
                .map(|&child| self.page_outline(self.page_at(child)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::definition::SiteDefinition;
    use crate::placeholder::VariableResolver;
    use crate::registry::SiteRegistry;
    use crate::Content;

    #[test]
    fn test_outline_serializes_tree() {
        let registry = Arc::new(SiteRegistry::new());
        let definition = Arc::new(SiteDefinition::new("outline", 1, &registry));
        definition
            .set_placeholder_resolver(Arc::new(
                VariableResolver::new().with_variable("root", "/r"),
            ))
            .unwrap();

        let site = definition
            .create_site("main", |site| {
                site.page("home", "${root}", |home| {
                    home.content(Content::text("hello", "Hi"), |_| {})?;
                    home.page("about", "${root}/about", |about| {
                        about.remove();
                        Ok(())
                    })?;
                    Ok(())
                })?;
                site.hostname("example.com", "home")?;
                site.template("base", |t| {
                    t.content(Content::html("nav", "<nav/>").with_path("${root}/nav"), |_| {})?;
                    Ok(())
                })?;
                site.layout("wide", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();

        let value = serde_json::to_value(site.outline()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "main",
                "primaryLocale": "en",
                "defaultTimezone": "US/Central",
                "hostnames": [{"address": "example.com", "page": "home", "path": "/r"}],
                "pages": [{
                    "id": "home",
                    "path": "/r",
                    "state": "active",
                    "content": [{"id": "hello", "kind": "text", "state": "active"}],
                    "children": [{"id": "about", "path": "/r/about", "state": "pending_removal"}]
                }],
                "templates": [{
                    "id": "base",
                    "content": [{"id": "nav", "kind": "html", "path": "/r/nav", "state": "active"}]
                }],
                "layouts": [{"id": "wide"}],
                "content": []
            })
        );
    }

    #[test]
    fn test_outline_includes_staged_content() {
        let mut site = crate::Site::new("s");
        site.remove_content(Content::new("old")).unwrap();

        let outline = site.outline();

        assert_eq!(outline.content.len(), 1);
        assert_eq!(outline.content[0].state, crate::NodeState::PendingRemoval);
    }
}
