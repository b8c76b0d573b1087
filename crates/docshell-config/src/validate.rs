//! Validation pass turning a [`RawSiteConfig`] into a [`SiteConfig`].
//!
//! Validation stops at the first violation; the returned [`ValidationError`]
//! carries the field path (e.g. `sidebar[2].items[0].link`).

use serde_json::Value;

use crate::SiteConfig;
use crate::link::{self, LinkKind};
use crate::model::{
    EditLink, Locale, NavLink, Plugin, SidebarSection, SiteMetadata, SocialIcon, SocialLink,
};
use crate::raw::{RawLocale, RawSiteConfig, RawSocialLink};

/// Violated configuration constraint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Path of the offending field (e.g. `locales[1].key`).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

type Result<T> = std::result::Result<T, ValidationError>;

/// Validate raw input and build the immutable configuration.
pub(crate) fn validate(raw: RawSiteConfig) -> Result<SiteConfig> {
    let metadata = validate_metadata(&raw)?;
    validate_locales(&raw.locales)?;
    validate_nav(&raw.nav)?;
    validate_sidebar(&raw.sidebar)?;
    let plugins = validate_plugins(raw.plugins)?;
    let social_links = validate_social_links(&raw.social_links)?;
    if let Some(edit_link) = &raw.edit_link {
        validate_edit_link(edit_link)?;
    }

    Ok(SiteConfig {
        metadata,
        locales: raw.locales.into_iter().map(into_locale).collect(),
        nav: raw.nav,
        sidebar: raw.sidebar,
        plugins,
        social_links,
        edit_link: raw.edit_link,
        footer: raw.footer,
    })
}

fn into_locale(raw: RawLocale) -> Locale {
    Locale {
        key: raw.key,
        label: raw.label,
        lang: raw.lang,
        directory: raw.directory,
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<()> {
    require_non_empty(url, field)?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::new(
            field,
            "must start with http:// or https://",
        ));
    }
    Ok(())
}

fn validate_metadata(raw: &RawSiteConfig) -> Result<SiteMetadata> {
    require_non_empty(&raw.title, "title")?;
    require_non_empty(&raw.description, "description")?;
    validate_base_path(&raw.base_path)?;

    Ok(SiteMetadata {
        title: raw.title.clone(),
        description: raw.description.clone(),
        base_path: raw.base_path.clone(),
    })
}

fn validate_base_path(base_path: &str) -> Result<()> {
    const FIELD: &str = "base_path";

    require_non_empty(base_path, FIELD)?;
    if !base_path.starts_with('/') || !base_path.ends_with('/') {
        return Err(ValidationError::new(
            FIELD,
            format!("must start and end with '/' (got \"{base_path}\")"),
        ));
    }
    if base_path.contains("//") {
        return Err(ValidationError::new(FIELD, "cannot contain empty segments"));
    }
    if base_path.chars().any(char::is_whitespace) {
        return Err(ValidationError::new(FIELD, "cannot contain whitespace"));
    }
    Ok(())
}

fn validate_locales(locales: &[RawLocale]) -> Result<()> {
    if locales.is_empty() {
        return Err(ValidationError::new(
            "locales",
            "at least one locale is required",
        ));
    }

    for (i, locale) in locales.iter().enumerate() {
        let path = format!("locales[{i}]");
        require_non_empty(&locale.key, &format!("{path}.key"))?;
        require_non_empty(&locale.label, &format!("{path}.label"))?;
        require_non_empty(&locale.lang, &format!("{path}.lang"))?;
        if let Some(directory) = &locale.directory {
            validate_locale_directory(directory, &format!("{path}.directory"))?;
        }

        if let Some(first) = locales[..i].iter().position(|l| l.key == locale.key) {
            return Err(ValidationError::new(
                format!("{path}.key"),
                format!(
                    "duplicate locale key \"{}\" (already defined at locales[{first}].key)",
                    locale.key
                ),
            ));
        }
    }
    Ok(())
}

fn validate_locale_directory(directory: &str, field: &str) -> Result<()> {
    require_non_empty(directory, field)?;
    if directory.starts_with('/') || directory.ends_with('/') {
        return Err(ValidationError::new(
            field,
            "must be relative, without leading or trailing '/'",
        ));
    }
    if directory.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(ValidationError::new(
            field,
            "cannot contain empty or '..' segments",
        ));
    }
    Ok(())
}

fn validate_nav(nav: &[NavLink]) -> Result<()> {
    for (i, item) in nav.iter().enumerate() {
        validate_nav_link(item, &format!("nav[{i}]"))?;
    }
    Ok(())
}

fn validate_sidebar(sidebar: &[SidebarSection]) -> Result<()> {
    for (i, section) in sidebar.iter().enumerate() {
        let path = format!("sidebar[{i}]");
        require_non_empty(&section.text, &format!("{path}.text"))?;
        for (j, item) in section.items.iter().enumerate() {
            validate_nav_link(item, &format!("{path}.items[{j}]"))?;
        }
    }
    Ok(())
}

/// Navigation links must be placeholders or internal paths.
fn validate_nav_link(item: &NavLink, path: &str) -> Result<()> {
    require_non_empty(&item.text, &format!("{path}.text"))?;

    let field = format!("{path}.link");
    match link::classify(&item.link) {
        LinkKind::Placeholder => Ok(()),
        LinkKind::External => Err(ValidationError::new(
            field,
            format!(
                "external URL \"{}\" is not allowed in navigation, use social_links",
                item.link
            ),
        )),
        LinkKind::Internal if !item.link.starts_with('/') => Err(ValidationError::new(
            field,
            format!("must be an absolute site path starting with '/' (got \"{}\")", item.link),
        )),
        LinkKind::Internal if item.link.chars().any(char::is_whitespace) => {
            Err(ValidationError::new(field, "cannot contain whitespace"))
        }
        LinkKind::Internal => Ok(()),
    }
}

fn validate_plugins(plugins: Vec<Plugin>) -> Result<Vec<Plugin>> {
    let mut validated: Vec<Plugin> = Vec::with_capacity(plugins.len());
    for (i, mut plugin) in plugins.into_iter().enumerate() {
        let field = format!("plugins[{i}].name");
        require_non_empty(&plugin.name, &field)?;
        if let Some(first) = validated.iter().position(|p| p.name == plugin.name) {
            return Err(ValidationError::new(
                field,
                format!(
                    "plugin \"{}\" is already registered at plugins[{first}]",
                    plugin.name
                ),
            ));
        }
        for (key, value) in &mut plugin.options {
            normalize_option(value, &format!("plugins[{i}].options.{key}"))?;
        }
        validated.push(plugin);
    }
    Ok(validated)
}

/// Key the TOML deserializer uses to hand datetimes to self-describing targets.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Keep plugin options representable in both TOML and JSON.
///
/// `null` has no TOML form (TOML `nan`/`inf` also arrive as `null`), and TOML
/// datetimes are stored as their string form.
fn normalize_option(value: &mut Value, field: &str) -> Result<()> {
    if let Value::Object(map) = value
        && let Some(datetime) = toml_datetime(map)
    {
        *value = Value::String(datetime);
        return Ok(());
    }

    match value {
        Value::Null => Err(ValidationError::new(
            field,
            "must be a string, number, boolean, array or table (null, nan and inf are not allowed)",
        )),
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                normalize_option(item, &format!("{field}[{i}]"))?;
            }
            Ok(())
        }
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                normalize_option(nested, &format!("{field}.{key}"))?;
            }
            Ok(())
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
    }
}

fn toml_datetime(map: &serde_json::Map<String, Value>) -> Option<String> {
    match map.get(TOML_DATETIME_KEY) {
        Some(Value::String(datetime)) if map.len() == 1 => Some(datetime.clone()),
        _ => None,
    }
}

fn validate_social_links(links: &[RawSocialLink]) -> Result<Vec<SocialLink>> {
    links
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let path = format!("social_links[{i}]");
            let icon = SocialIcon::from_name(&raw.icon).ok_or_else(|| {
                let known: Vec<&str> = SocialIcon::ALL.iter().map(|icon| icon.as_str()).collect();
                ValidationError::new(
                    format!("{path}.icon"),
                    format!(
                        "unknown icon \"{}\" (expected one of: {})",
                        raw.icon,
                        known.join(", ")
                    ),
                )
            })?;
            require_http_url(&raw.url, &format!("{path}.url"))?;
            Ok(SocialLink {
                icon,
                url: raw.url.clone(),
            })
        })
        .collect()
}

fn validate_edit_link(edit_link: &EditLink) -> Result<()> {
    require_http_url(&edit_link.pattern, "edit_link.pattern")?;
    if !edit_link.pattern.contains(EditLink::PATH_PLACEHOLDER) {
        return Err(ValidationError::new(
            "edit_link.pattern",
            format!("must contain the {} placeholder", EditLink::PATH_PLACEHOLDER),
        ));
    }
    require_non_empty(&edit_link.text, "edit_link.text")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(key: &str) -> RawLocale {
        RawLocale {
            key: key.to_owned(),
            label: key.to_uppercase(),
            lang: key.to_owned(),
            directory: None,
        }
    }

    fn valid_raw() -> RawSiteConfig {
        RawSiteConfig {
            title: "Forms".to_owned(),
            description: "Forms documentation".to_owned(),
            base_path: "/forms-docs-demo/".to_owned(),
            locales: vec![locale("root")],
            ..RawSiteConfig::default()
        }
    }

    fn link(text: &str, link: &str) -> NavLink {
        NavLink {
            text: text.to_owned(),
            link: link.to_owned(),
        }
    }

    /// Assert that validation fails on `field` with a message containing each substring.
    fn assert_rejected(raw: RawSiteConfig, field: &str, expected_substrings: &[&str]) {
        let err = validate(raw).expect_err("Expected validation to fail");
        assert_eq!(err.field, field, "unexpected field in {err}");
        for s in expected_substrings {
            assert!(
                err.message.contains(s),
                "Expected error to contain '{s}', got: {err}"
            );
        }
    }

    #[test]
    fn test_valid_minimal() {
        let config = validate(valid_raw()).unwrap();
        assert_eq!(config.metadata().title, "Forms");
        assert_eq!(config.locales().len(), 1);
    }

    #[test]
    fn test_empty_title() {
        let raw = RawSiteConfig {
            title: String::new(),
            ..valid_raw()
        };
        assert_rejected(raw, "title", &["empty"]);
    }

    #[test]
    fn test_blank_description() {
        let raw = RawSiteConfig {
            description: "   ".to_owned(),
            ..valid_raw()
        };
        assert_rejected(raw, "description", &["empty"]);
    }

    #[test]
    fn test_base_path_without_slashes() {
        let raw = RawSiteConfig {
            base_path: "forms-docs-demo".to_owned(),
            ..valid_raw()
        };
        assert_rejected(raw, "base_path", &["'/'", "forms-docs-demo"]);
    }

    #[test]
    fn test_base_path_without_trailing_slash() {
        let raw = RawSiteConfig {
            base_path: "/forms-docs-demo".to_owned(),
            ..valid_raw()
        };
        assert_rejected(raw, "base_path", &["end with '/'"]);
    }

    #[test]
    fn test_base_path_root_accepted() {
        let raw = RawSiteConfig {
            base_path: "/".to_owned(),
            ..valid_raw()
        };
        assert!(validate(raw).is_ok());
    }

    #[test]
    fn test_base_path_double_slash() {
        let raw = RawSiteConfig {
            base_path: "/a//b/".to_owned(),
            ..valid_raw()
        };
        assert_rejected(raw, "base_path", &["empty segments"]);
    }

    #[test]
    fn test_no_locales() {
        let raw = RawSiteConfig {
            locales: Vec::new(),
            ..valid_raw()
        };
        assert_rejected(raw, "locales", &["at least one"]);
    }

    #[test]
    fn test_duplicate_locale_cites_both_paths() {
        let raw = RawSiteConfig {
            locales: vec![locale("root"), locale("ru"), locale("ru")],
            ..valid_raw()
        };
        assert_rejected(raw, "locales[2].key", &["\"ru\"", "locales[1].key"]);
    }

    #[test]
    fn test_locale_missing_lang() {
        let raw = RawSiteConfig {
            locales: vec![RawLocale {
                lang: String::new(),
                ..locale("root")
            }],
            ..valid_raw()
        };
        assert_rejected(raw, "locales[0].lang", &["empty"]);
    }

    #[test]
    fn test_locale_directory_must_be_relative() {
        let raw = RawSiteConfig {
            locales: vec![
                locale("root"),
                RawLocale {
                    directory: Some("/ru".to_owned()),
                    ..locale("ru")
                },
            ],
            ..valid_raw()
        };
        assert_rejected(raw, "locales[1].directory", &["relative"]);
    }

    #[test]
    fn test_locale_directory_rejects_parent_segment() {
        let raw = RawSiteConfig {
            locales: vec![RawLocale {
                directory: Some("docs/../ru".to_owned()),
                ..locale("ru")
            }],
            ..valid_raw()
        };
        assert_rejected(raw, "locales[0].directory", &[".."]);
    }

    #[test]
    fn test_sidebar_section_requires_text() {
        let raw = RawSiteConfig {
            sidebar: vec![
                SidebarSection {
                    text: "Guide".to_owned(),
                    ..SidebarSection::default()
                },
                SidebarSection::default(),
            ],
            ..valid_raw()
        };
        assert_rejected(raw, "sidebar[1].text", &["empty"]);
    }

    #[test]
    fn test_sidebar_placeholder_accepted() {
        let raw = RawSiteConfig {
            sidebar: vec![SidebarSection {
                text: "Guide".to_owned(),
                collapsed: false,
                items: vec![link("X", "")],
            }],
            ..valid_raw()
        };
        assert!(validate(raw).is_ok());
    }

    #[test]
    fn test_sidebar_external_link_rejected() {
        let raw = RawSiteConfig {
            sidebar: vec![SidebarSection {
                text: "Guide".to_owned(),
                collapsed: false,
                items: vec![link("Intro", "/intro"), link("GitHub", "https://github.com")],
            }],
            ..valid_raw()
        };
        assert_rejected(raw, "sidebar[0].items[1].link", &["external", "social_links"]);
    }

    #[test]
    fn test_nav_relative_link_rejected() {
        let raw = RawSiteConfig {
            nav: vec![link("Guide", "guide/intro")],
            ..valid_raw()
        };
        assert_rejected(raw, "nav[0].link", &["starting with '/'"]);
    }

    #[test]
    fn test_nav_link_requires_text() {
        let raw = RawSiteConfig {
            nav: vec![link("", "/guide")],
            ..valid_raw()
        };
        assert_rejected(raw, "nav[0].text", &["empty"]);
    }

    #[test]
    fn test_unknown_social_icon() {
        let raw = RawSiteConfig {
            social_links: vec![RawSocialLink {
                icon: "myspace".to_owned(),
                url: "https://myspace.com/acme".to_owned(),
            }],
            ..valid_raw()
        };
        assert_rejected(raw, "social_links[0].icon", &["myspace", "github"]);
    }

    #[test]
    fn test_social_link_requires_http_url() {
        let raw = RawSiteConfig {
            social_links: vec![RawSocialLink {
                icon: "github".to_owned(),
                url: "github.com/acme".to_owned(),
            }],
            ..valid_raw()
        };
        assert_rejected(raw, "social_links[0].url", &["http"]);
    }

    #[test]
    fn test_duplicate_plugin() {
        let plugin = Plugin {
            name: "form-preview".to_owned(),
            options: serde_json::Map::new(),
        };
        let raw = RawSiteConfig {
            plugins: vec![plugin.clone(), plugin],
            ..valid_raw()
        };
        assert_rejected(raw, "plugins[1].name", &["plugins[0]"]);
    }

    fn plugin_with_options(options: Value) -> Plugin {
        let Value::Object(options) = options else {
            panic!("plugin options must be an object");
        };
        Plugin {
            name: "form-preview".to_owned(),
            options,
        }
    }

    #[test]
    fn test_plugin_option_null_rejected() {
        let raw = RawSiteConfig {
            plugins: vec![plugin_with_options(serde_json::json!({ "theme": "light", "x": null }))],
            ..valid_raw()
        };
        assert_rejected(raw, "plugins[0].options.x", &["null"]);
    }

    #[test]
    fn test_plugin_option_nested_null_rejected() {
        let raw = RawSiteConfig {
            plugins: vec![plugin_with_options(
                serde_json::json!({ "sandbox": { "allow": ["forms", null] } }),
            )],
            ..valid_raw()
        };
        assert_rejected(raw, "plugins[0].options.sandbox.allow[1]", &["null"]);
    }

    #[test]
    fn test_plugin_option_toml_datetime_becomes_string() {
        let raw = RawSiteConfig {
            plugins: vec![plugin_with_options(serde_json::json!({
                "released": { "$__toml_private_datetime": "1979-05-27" },
                "builds": [{ "$__toml_private_datetime": "1979-05-27T07:32:00Z" }]
            }))],
            ..valid_raw()
        };
        let config = validate(raw).unwrap();
        assert_eq!(
            Value::Object(config.plugins()[0].options.clone()),
            serde_json::json!({
                "released": "1979-05-27",
                "builds": ["1979-05-27T07:32:00Z"]
            })
        );
    }

    #[test]
    fn test_edit_link_requires_http_pattern() {
        let raw = RawSiteConfig {
            edit_link: Some(EditLink {
                pattern: "ftp://example.com/docs/:path".to_owned(),
                text: "Edit".to_owned(),
            }),
            ..valid_raw()
        };
        assert_rejected(raw, "edit_link.pattern", &["http"]);
    }

    #[test]
    fn test_edit_link_requires_text() {
        let raw = RawSiteConfig {
            edit_link: Some(EditLink {
                pattern: "https://github.com/acme/docs/edit/main/:path".to_owned(),
                text: String::new(),
            }),
            ..valid_raw()
        };
        assert_rejected(raw, "edit_link.text", &["empty"]);
    }

    #[test]
    fn test_edit_link_requires_placeholder() {
        let raw = RawSiteConfig {
            edit_link: Some(EditLink {
                pattern: "https://github.com/acme/docs/edit/main/".to_owned(),
                text: "Edit".to_owned(),
            }),
            ..valid_raw()
        };
        assert_rejected(raw, "edit_link.pattern", &[":path"]);
    }

    #[test]
    fn test_error_display_includes_field() {
        let err = ValidationError::new("sidebar[0].text", "cannot be empty");
        assert_eq!(err.to_string(), "sidebar[0].text: cannot be empty");
    }
}
