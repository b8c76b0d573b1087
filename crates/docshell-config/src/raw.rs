//! Authored configuration shape, before validation.
//!
//! Required strings default to empty so that a missing field is reported by
//! validation with its field path rather than as a bare parse error.
//! Unknown fields are rejected everywhere.
//!
//! Locales may be written either as a table keyed by locale key:
//!
//! ```toml
//! [locales.root]
//! label = "English"
//! lang = "en"
//!
//! [locales.ru]
//! label = "Русский"
//! lang = "ru"
//! directory = "ru"
//! ```
//!
//! or as an array of tables with an explicit `key`:
//!
//! ```toml
//! [[locales]]
//! key = "root"
//! label = "English"
//! lang = "en"
//! ```
//!
//! Both forms keep authored order and keep duplicate keys, so validation can
//! report them.

use serde::{Deserialize, Serialize};

use crate::model::{EditLink, Footer, NavLink, Plugin, SidebarSection};

/// Site configuration as authored.
///
/// Scalar fields come first so the TOML serializer never has to emit a value
/// after a table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSiteConfig {
    /// Site title.
    #[serde(default)]
    pub title: String,
    /// Site description.
    #[serde(default)]
    pub description: String,
    /// URL prefix for internal links.
    #[serde(default)]
    pub base_path: String,
    /// "Edit this page" link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLink>,
    /// Page footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    /// Locales in authored order.
    #[serde(default, with = "locales")]
    pub locales: Vec<RawLocale>,
    /// Top navigation bar.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nav: Vec<NavLink>,
    /// Sidebar sections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sidebar: Vec<SidebarSection>,
    /// Build-tool plugins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
    /// Header icon links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<RawSocialLink>,
}

/// Locale as authored in array form (`[[locales]]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLocale {
    /// Locale key.
    #[serde(default)]
    pub key: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Language code.
    #[serde(default)]
    pub lang: String,
    /// Content directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

/// Social link as authored; the icon is checked against the known set during validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSocialLink {
    /// Icon identifier (e.g. "github").
    #[serde(default)]
    pub icon: String,
    /// Target URL.
    #[serde(default)]
    pub url: String,
}

/// Locale collection (de)serialization.
///
/// Serializes as a keyed table; deserializes from either a keyed table or an array.
mod locales {
    use std::fmt;

    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::RawLocale;

    /// Locale body inside a keyed table (the key is the table name).
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct LocaleBody {
        #[serde(default)]
        label: String,
        #[serde(default)]
        lang: String,
        #[serde(default)]
        directory: Option<String>,
    }

    #[derive(Serialize)]
    struct LocaleBodyRef<'a> {
        label: &'a str,
        lang: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        directory: Option<&'a str>,
    }

    pub(super) fn serialize<S: Serializer>(
        locales: &[RawLocale],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(locales.len()))?;
        for locale in locales {
            map.serialize_entry(
                &locale.key,
                &LocaleBodyRef {
                    label: &locale.label,
                    lang: &locale.lang,
                    directory: locale.directory.as_deref(),
                },
            )?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<RawLocale>, D::Error> {
        deserializer.deserialize_any(LocalesVisitor)
    }

    struct LocalesVisitor;

    impl<'de> Visitor<'de> for LocalesVisitor {
        type Value = Vec<RawLocale>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of locales keyed by locale key, or an array of locales")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut locales = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, body)) = map.next_entry::<String, LocaleBody>()? {
                locales.push(RawLocale {
                    key,
                    label: body.label,
                    lang: body.lang,
                    directory: body.directory,
                });
            }
            Ok(locales)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut locales = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(locale) = seq.next_element::<RawLocale>()? {
                locales.push(locale);
            }
            Ok(locales)
        }
    }
}
