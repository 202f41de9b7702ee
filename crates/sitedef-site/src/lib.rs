//! Declarative site definitions for sitedef.
//!
//! This crate provides:
//! - [`SiteDefinition`]: factory that builds [`Site`]s and tracks them in a
//!   [`SiteRegistry`]
//! - [`Site`]: page tree, templates, layouts, root content and hostnames,
//!   built through a nested builder DSL ([`PageScope`], [`ArtifactScope`])
//! - [`ContentContainer`]: read access to the content held by sites, pages,
//!   templates, layouts and composite content
//! - [`PlaceholderResolver`]: path placeholder expansion, with
//!   [`VariableResolver`] as the stock implementation
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use sitedef_site::{Content, SiteDefinition, SiteRegistry, VariableResolver};
//!
//! let registry = Arc::new(SiteRegistry::new());
//! let definition = Arc::new(SiteDefinition::new("corporate", 1, &registry));
//! definition
//!     .set_placeholder_resolver(Arc::new(VariableResolver::new().with_variable("cdn", "/static")))
//!     .unwrap();
//!
//! definition
//!     .create_site("main", |site| {
//!         site.content(Content::new("logo").with_path("${cdn}/logo.png"), |_| {})?;
//!         site.hostname_with("example.com", "home", |home| home.set_path("/"))?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let sites = definition.get_sites();
//! assert_eq!(sites.len(), 1);
//! assert_eq!(sites[0].get_content_by_id("logo").unwrap().path, "/static/logo.png");
//! ```

mod artifact;
mod content;
mod definition;
mod error;
mod hostname;
mod node;
mod outline;
mod page;
mod placeholder;
mod registry;
mod removal;
mod site;

pub use artifact::{ArtifactScope, Layout, Template};
pub use content::{Content, ContentKind};
pub use definition::{SiteDefaults, SiteDefinition};
pub use error::{NodeKind, SiteError, SiteErrorKind};
pub use hostname::Hostname;
pub use node::{ContentContainer, NodeState, PageId, ParentRef};
pub use outline::{ContainerOutline, ContentOutline, HostnameOutline, PageOutline, SiteOutline};
pub use page::{Page, PageScope};
pub use placeholder::{PlaceholderResolver, VariableResolver};
pub use registry::{DefinitionKey, SiteRegistry};
pub use removal::{RemovalPlan, StagedContent, StagedPage};
pub use site::{DEFAULT_LOCALE, DEFAULT_TIMEZONE, Site};
