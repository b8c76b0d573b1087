//! Link classification and base path resolution.

use crate::SiteConfig;

/// What a navigation link points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// Empty link: rendered as a non-clickable label.
    Placeholder,
    /// Path inside the site, subject to the base path.
    Internal,
    /// Absolute URL (`https://...`, `mailto:...`) or protocol-relative URL (`//host/...`).
    External,
}

/// Classify a link.
#[must_use]
pub fn classify(link: &str) -> LinkKind {
    if link.is_empty() {
        LinkKind::Placeholder
    } else if link.starts_with("//") || has_scheme(link) {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}

/// Check for a URI scheme prefix (`scheme:`).
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve a link against the configured base path.
///
/// Placeholders stay empty and external URLs pass through unchanged.
#[must_use]
pub fn resolve_link(config: &SiteConfig, link: &str) -> String {
    join_base(&config.metadata().base_path, link)
}

/// Prepend `base_path` to an internal link without doubling the separator.
pub(crate) fn join_base(base_path: &str, link: &str) -> String {
    match classify(link) {
        LinkKind::Placeholder => String::new(),
        LinkKind::External => link.to_owned(),
        LinkKind::Internal => format!(
            "{}/{}",
            base_path.trim_end_matches('/'),
            link.trim_start_matches('/')
        ),
    }
}
