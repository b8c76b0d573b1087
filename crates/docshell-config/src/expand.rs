//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;
use crate::raw::RawSiteConfig;

/// Expand environment variable references in the fields that support them:
///
/// - `base_path`
/// - `edit_link.pattern`
/// - `social_links[*].url`
pub(crate) fn expand_raw(raw: &mut RawSiteConfig) -> Result<(), ConfigError> {
    expand_in_place(&mut raw.base_path, "base_path")?;

    if let Some(edit_link) = raw.edit_link.as_mut() {
        expand_in_place(&mut edit_link.pattern, "edit_link.pattern")?;
    }

    for (i, social) in raw.social_links.iter_mut().enumerate() {
        expand_in_place(&mut social.url, &format!("social_links[{i}].url"))?;
    }

    Ok(())
}

fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if let Some(expanded) = expand_env(value, field)? {
        *value = expanded;
    }
    Ok(())
}

/// Expand a single string.
///
/// Returns `None` when the value has no `${` reference. Bare `$VAR` is left alone.
fn expand_env(value: &str, field: &str) -> Result<Option<String>, ConfigError> {
    if !value.contains("${") {
        return Ok(None);
    }

    shellexpand::env_with_context(value, |var| {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(|expanded| Some(expanded.into_owned()))
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Lookup failure carrying the variable name.
struct UnsetVar(String);
