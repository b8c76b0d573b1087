//! Site configuration model for docshell.
//!
//! Describes the shell of a documentation site: metadata, locales, the top
//! navigation bar, the sidebar tree, build-tool plugins and social links.
//! Raw input (TOML, JSON or an in-memory [`serde_json::Value`]) is parsed into
//! [`RawSiteConfig`], validated, and returned as an immutable [`SiteConfig`]
//! that renderers receive by reference.
//!
//! ```
//! use docshell_config::SiteConfig;
//!
//! let config = SiteConfig::from_toml_str(r#"
//! title = "Forms"
//! description = "Forms documentation"
//! base_path = "/forms-docs-demo/"
//!
//! [locales.root]
//! label = "English"
//! lang = "en"
//!
//! [[sidebar]]
//! text = "Getting started"
//! items = [{ text = "Quick start", link = "/quick-start" }]
//! "#)?;
//!
//! assert_eq!(config.resolve_link("/quick-start"), "/forms-docs-demo/quick-start");
//! # Ok::<(), docshell_config::ConfigError>(())
//! ```
//!
//! ## Environment Variable Expansion
//!
//! When loading from text or a file, these fields support `${VAR}` (error if
//! unset) and `${VAR:-default}`:
//! - `base_path`
//! - `edit_link.pattern`
//! - `social_links[*].url`

mod expand;
pub mod link;
mod model;
mod raw;
mod validate;

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

pub use link::{LinkKind, resolve_link};
pub use model::{
    EditLink, Footer, Locale, NavLink, Plugin, SidebarSection, SiteMetadata, SocialIcon,
    SocialLink,
};
pub use raw::{RawLocale, RawSiteConfig, RawSocialLink};
pub use validate::ValidationError;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docshell.toml";

/// Caller-supplied values that take precedence over the authored configuration.
///
/// Applied before validation, so overridden values obey the same constraints.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the base path (e.g. for preview deployments).
    pub base_path: Option<String>,
    /// Override the site title.
    pub title: Option<String>,
}

impl Overrides {
    fn apply(&self, raw: &mut RawSiteConfig) {
        if let Some(base_path) = &self.base_path {
            raw.base_path.clone_from(base_path);
        }
        if let Some(title) = &self.title {
            raw.title.clone_from(title);
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is neither `.toml` nor `.json`.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(#[from] ValidationError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`social_links[0].url`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} not set").
        message: String,
    },
}

/// Validated, immutable site configuration.
///
/// Built once by [`SiteConfig::load`] (or one of the parsing entry points)
/// and shared read-only afterwards. Serializes back to the authored shape.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    metadata: SiteMetadata,
    locales: Vec<Locale>,
    nav: Vec<NavLink>,
    sidebar: Vec<SidebarSection>,
    plugins: Vec<Plugin>,
    social_links: Vec<SocialLink>,
    edit_link: Option<EditLink>,
    footer: Option<Footer>,
}

impl SiteConfig {
    /// Validate raw input and build the configuration.
    ///
    /// No environment expansion happens here: `raw` is taken as final.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first violated constraint.
    pub fn load(raw: RawSiteConfig) -> Result<Self, ConfigError> {
        let config = validate::validate(raw)?;
        tracing::info!(
            title = %config.metadata.title,
            base_path = %config.metadata.base_path,
            locales = config.locales.len(),
            sidebar_sections = config.sidebar.len(),
            "Loaded site configuration"
        );
        Ok(config)
    }

    /// Parse TOML text, expand environment variables and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::prepare(toml::from_str(content)?, None)
    }

    /// Parse JSON text, expand environment variables and validate.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::prepare(serde_json::from_str(content)?, None)
    }

    /// Convert an in-memory JSON value, expand environment variables and validate.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Self::prepare(serde_json::from_value(value)?, None)
    }

    /// Load configuration from an explicit file or by discovery.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `docshell.toml` in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the explicit file doesn't exist or
    /// discovery finds nothing, and any parse or validation error.
    pub fn open(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load_file(path, overrides),
            None => Self::discover(overrides),
        }
    }

    /// Search for `docshell.toml` from the current directory upwards and load it.
    pub fn discover(overrides: Option<&Overrides>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd, overrides)
    }

    /// Search for `docshell.toml` from `start` upwards and load it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` naming `start/docshell.toml` when no
    /// config file exists in `start` or any parent.
    pub fn discover_from(
        start: &Path,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let path = find_config_file(start)
            .ok_or_else(|| ConfigError::NotFound(start.join(CONFIG_FILENAME)))?;
        Self::load_file(&path, overrides)
    }

    /// Load configuration from a specific `.toml` or `.json` file.
    pub fn load_file(path: &Path, overrides: Option<&Overrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "Reading site configuration");

        let content = std::fs::read_to_string(path)?;
        let raw: RawSiteConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        Self::prepare(raw, overrides)
    }

    /// Expand environment variables, apply overrides, then validate.
    fn prepare(mut raw: RawSiteConfig, overrides: Option<&Overrides>) -> Result<Self, ConfigError> {
        expand::expand_raw(&mut raw)?;
        if let Some(overrides) = overrides {
            overrides.apply(&mut raw);
        }
        Self::load(raw)
    }

    /// Site metadata.
    #[must_use]
    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// Locales in authored order.
    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Look up a locale by key.
    #[must_use]
    pub fn locale(&self, key: &str) -> Option<&Locale> {
        self.locales.iter().find(|locale| locale.key == key)
    }

    /// Default locale: `root` if defined, otherwise the first authored locale.
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        self.locales
            .iter()
            .find(|locale| locale.is_root())
            .unwrap_or(&self.locales[0])
    }

    /// Locale whose content directory contains an internal link.
    ///
    /// The longest matching `directory` wins; links outside every locale
    /// directory (and placeholders or external URLs) map to [`Self::default_locale`].
    #[must_use]
    pub fn locale_for_link(&self, link: &str) -> &Locale {
        if link::classify(link) != LinkKind::Internal {
            return self.default_locale();
        }
        let path = link.trim_start_matches('/');

        self.locales
            .iter()
            .filter_map(|locale| {
                let dir = locale.directory.as_deref()?;
                let rest = path.strip_prefix(dir)?;
                (rest.is_empty() || rest.starts_with('/')).then_some((dir.len(), locale))
            })
            .max_by_key(|(len, _)| *len)
            .map_or_else(|| self.default_locale(), |(_, locale)| locale)
    }

    /// Top navigation bar entries.
    #[must_use]
    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    /// Sidebar sections in display order.
    #[must_use]
    pub fn sidebar(&self) -> &[SidebarSection] {
        &self.sidebar
    }

    /// Registered build-tool plugins.
    #[must_use]
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Header icon links.
    #[must_use]
    pub fn social_links(&self) -> &[SocialLink] {
        &self.social_links
    }

    /// "Edit this page" configuration.
    #[must_use]
    pub fn edit_link(&self) -> Option<&EditLink> {
        self.edit_link.as_ref()
    }

    /// Edit URL for a page source path, if an edit link is configured.
    #[must_use]
    pub fn edit_url(&self, page_path: &str) -> Option<String> {
        self.edit_link.as_ref().map(|edit| edit.url_for(page_path))
    }

    /// Page footer.
    #[must_use]
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Resolve a link against the base path. See [`resolve_link`].
    #[must_use]
    pub fn resolve_link(&self, link: &str) -> String {
        resolve_link(self, link)
    }

    /// Convert back to the authored shape.
    #[must_use]
    pub fn to_raw(&self) -> RawSiteConfig {
        RawSiteConfig {
            title: self.metadata.title.clone(),
            description: self.metadata.description.clone(),
            base_path: self.metadata.base_path.clone(),
            edit_link: self.edit_link.clone(),
            footer: self.footer.clone(),
            locales: self
                .locales
                .iter()
                .map(|locale| RawLocale {
                    key: locale.key.clone(),
                    label: locale.label.clone(),
                    lang: locale.lang.clone(),
                    directory: locale.directory.clone(),
                })
                .collect(),
            nav: self.nav.clone(),
            sidebar: self.sidebar.clone(),
            plugins: self.plugins.clone(),
            social_links: self
                .social_links
                .iter()
                .map(|social| RawSocialLink {
                    icon: social.icon.as_str().to_owned(),
                    url: social.url.clone(),
                })
                .collect(),
        }
    }
}

impl Serialize for SiteConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

/// Search for the config file in `start` and its parents.
#[must_use]
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Discovered site configuration");
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
