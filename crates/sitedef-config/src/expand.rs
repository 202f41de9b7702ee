//! Environment variable expansion for placeholder values.
//!
//! `${VAR}` expands to the value of `VAR` and fails if it is unset;
//! `${VAR:-fallback}` uses `fallback` when `VAR` is unset. Bare `$VAR` is
//! left alone.

use std::collections::BTreeMap;

use crate::ConfigError;

/// Name of an environment variable that was referenced but not set.
struct UnsetVar(String);

/// Expand environment references in a single value.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    };

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

/// Expand every value of a `[section]` table in place.
pub(crate) fn expand_table(
    table: &mut BTreeMap<String, String>,
    section: &str,
) -> Result<(), ConfigError> {
    for (name, value) in table.iter_mut() {
        *value = expand_env(value, &format!("{section}.{name}"))?;
    }
    Ok(())
}
