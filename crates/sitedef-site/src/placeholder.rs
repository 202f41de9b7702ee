//! Path placeholder resolution.
//!
//! The site builder resolves placeholders in page and content paths through a
//! [`PlaceholderResolver`] supplied to the owning
//! [`SiteDefinition`](crate::SiteDefinition). [`VariableResolver`] is the
//! standalone implementation backed by a variable table.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `${name}` or `${name:-default}`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.\-]*)(?::-([^}]*))?\}").unwrap()
});

/// Substitutes placeholders in path templates.
///
/// Implementations must be pure with respect to their input: resolving the
/// same template twice yields the same string, and no recognized placeholder
/// survives in the output.
pub trait PlaceholderResolver: Send + Sync {
    /// Resolve every recognized placeholder in `template`.
    fn resolve_placeholders(&self, template: &str) -> String;
}

impl<F> PlaceholderResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve_placeholders(&self, template: &str) -> String {
        self(template)
    }
}

/// Resolver backed by a name → value table.
///
/// Recognizes `${name}` and `${name:-default}`. A known name is replaced by its
/// value; an unknown name with a default is replaced by the default; an
/// unknown name without a default is not recognized and is left as written.
#[derive(Clone, Debug, Default)]
pub struct VariableResolver {
    variables: HashMap<String, String>,
}

impl VariableResolver {
    /// Create a resolver with no variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True if no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for VariableResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PlaceholderResolver for VariableResolver {
    fn resolve_placeholders(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures<'_>| {
                let name = &caps[1];
                match (self.variables.get(name), caps.get(2)) {
                    (Some(value), _) => value.clone(),
                    (None, Some(default)) => default.as_str().to_owned(),
                    (None, None) => caps[0].to_owned(),
                }
            })
            .into_owned()
    }
}
