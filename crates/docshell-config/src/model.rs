//! Validated site configuration entities.
//!
//! Types that are shared verbatim between authored input and the loaded
//! [`SiteConfig`](crate::SiteConfig) (navigation links, sidebar sections,
//! plugins) derive both `Serialize` and `Deserialize`. Types whose authored
//! form differs from the validated form ([`Locale`], [`SocialLink`]) have a
//! raw counterpart in [`crate::raw`].

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::link::{self, LinkKind};

/// Site-wide metadata injected into every generated page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteMetadata {
    /// Site title.
    pub title: String,
    /// Site description (HTML `<meta name="description">`).
    pub description: String,
    /// URL prefix applied to every internal link (starts and ends with `/`).
    pub base_path: String,
}

/// Language or region variant of the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Unique locale key (e.g. "root", "ru").
    pub key: String,
    /// Display label shown in the locale switcher.
    pub label: String,
    /// Language code for the HTML `lang` attribute.
    pub lang: String,
    /// Content directory relative to the docs root, without slashes at either end.
    pub directory: Option<String>,
}

impl Locale {
    /// Key of the locale serving content from the docs root.
    pub const ROOT_KEY: &'static str = "root";

    /// Whether this is the root locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.key == Self::ROOT_KEY
    }
}

/// Single navigation entry.
///
/// An empty `link` marks a placeholder: the entry is rendered as a
/// non-clickable label instead of a broken link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Display text.
    #[serde(default)]
    pub text: String,
    /// Internal path (e.g. "/ru/quick-start") or empty for a placeholder.
    #[serde(default)]
    pub link: String,
}

impl NavLink {
    /// Whether the entry is an unpublished placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(link::classify(&self.link), LinkKind::Placeholder)
    }

    /// Resolved link target, or `None` for a placeholder.
    #[must_use]
    pub fn href(&self, base_path: &str) -> Option<String> {
        if self.is_placeholder() {
            return None;
        }
        Some(link::join_base(base_path, &self.link))
    }
}

/// Named group of links in the side navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarSection {
    /// Section heading.
    #[serde(default)]
    pub text: String,
    /// Whether the renderer should show the section collapsed initially.
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
    /// Links in display order.
    #[serde(default)]
    pub items: Vec<NavLink>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Build-tool plugin registration.
///
/// Options are opaque to this crate and kept in authored order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plugin {
    /// Plugin name as known to the build tool.
    #[serde(default)]
    pub name: String,
    /// Plugin options.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// "Edit this page" link configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditLink {
    /// URL pattern containing the `:path` placeholder.
    pub pattern: String,
    /// Link label.
    #[serde(default = "default_edit_link_text")]
    pub text: String,
}

fn default_edit_link_text() -> String {
    "Edit this page".to_owned()
}

impl EditLink {
    /// Placeholder replaced with the page source path.
    pub const PATH_PLACEHOLDER: &'static str = ":path";

    /// Edit URL for a page source path (e.g. "ru/quick-start.md").
    #[must_use]
    pub fn url_for(&self, page_path: &str) -> String {
        self.pattern
            .replace(Self::PATH_PLACEHOLDER, page_path.trim_start_matches('/'))
    }
}

/// Page footer text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    /// Footer message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Copyright line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Icon links rendered in the site header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Provider icon.
    pub icon: SocialIcon,
    /// Absolute URL of the profile or repository.
    pub url: String,
}

/// Social providers with a bundled icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocialIcon {
    /// Discord server.
    Discord,
    /// Facebook page.
    Facebook,
    /// GitHub repository or organization.
    GitHub,
    /// Instagram profile.
    Instagram,
    /// `LinkedIn` page.
    LinkedIn,
    /// Mastodon account.
    Mastodon,
    /// npm package.
    Npm,
    /// Slack workspace.
    Slack,
    /// Telegram channel or chat.
    Telegram,
    /// Twitter profile.
    Twitter,
    /// X (formerly Twitter) profile.
    X,
    /// `YouTube` channel.
    YouTube,
}

impl SocialIcon {
    /// All known icons.
    pub const ALL: [Self; 12] = [
        Self::Discord,
        Self::Facebook,
        Self::GitHub,
        Self::Instagram,
        Self::LinkedIn,
        Self::Mastodon,
        Self::Npm,
        Self::Slack,
        Self::Telegram,
        Self::Twitter,
        Self::X,
        Self::YouTube,
    ];

    /// Identifier used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Facebook => "facebook",
            Self::GitHub => "github",
            Self::Instagram => "instagram",
            Self::LinkedIn => "linkedin",
            Self::Mastodon => "mastodon",
            Self::Npm => "npm",
            Self::Slack => "slack",
            Self::Telegram => "telegram",
            Self::Twitter => "twitter",
            Self::X => "x",
            Self::YouTube => "youtube",
        }
    }

    /// Look up an icon by its configuration identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.as_str() == name)
    }
}

impl fmt::Display for SocialIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SocialIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
