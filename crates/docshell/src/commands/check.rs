//! `docshell check` command implementation.

use clap::Args;
use docshell_config::{SidebarSection, SiteConfig};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        output.highlight(&config.metadata().title);
        output.info(&format!("Base path: {}", config.metadata().base_path));
        output.info(&format!("Locales: {}", locale_summary(&config)));
        output.info(&format!("Navigation: {} entries", config.nav().len()));
        output.info(&format!("Sidebar: {} sections", config.sidebar().len()));
        for section in config.sidebar() {
            output.detail(&format!("  {}", section_summary(section)));
        }
        if !config.plugins().is_empty() {
            let names: Vec<&str> = config.plugins().iter().map(|p| p.name.as_str()).collect();
            output.info(&format!("Plugins: {}", names.join(", ")));
        }
        if !config.social_links().is_empty() {
            let icons: Vec<String> = config
                .social_links()
                .iter()
                .map(|s| s.icon.to_string())
                .collect();
            output.info(&format!("Social links: {}", icons.join(", ")));
        }

        output.success("Configuration is valid");
        Ok(())
    }
}

/// One-line locale list, e.g. `root (en), ru (ru) -> ru/`.
fn locale_summary(config: &SiteConfig) -> String {
    config
        .locales()
        .iter()
        .map(|locale| match &locale.directory {
            Some(dir) => format!("{} ({}) -> {dir}/", locale.key, locale.lang),
            None => format!("{} ({})", locale.key, locale.lang),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Section heading with item and placeholder counts.
fn section_summary(section: &SidebarSection) -> String {
    let placeholders = section.items.iter().filter(|i| i.is_placeholder()).count();
    if placeholders == 0 {
        format!("{}: {} items", section.text, section.items.len())
    } else {
        format!(
            "{}: {} items ({placeholders} unpublished)",
            section.text,
            section.items.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use docshell_config::NavLink;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_locale_summary() {
        let config = SiteConfig::from_toml_str(
            r#"
title = "Forms"
description = "Docs"
base_path = "/forms-docs-demo/"

[locales.root]
label = "English"
lang = "en"

[locales.ru]
label = "Русский"
lang = "ru"
directory = "ru"
"#,
        )
        .unwrap();
        assert_eq!(locale_summary(&config), "root (en), ru (ru) -> ru/");
    }

    #[test]
    fn test_section_summary_counts_placeholders() {
        let section = SidebarSection {
            text: "Guide".to_owned(),
            collapsed: false,
            items: vec![
                NavLink {
                    text: "Intro".to_owned(),
                    link: "/intro".to_owned(),
                },
                NavLink {
                    text: "Soon".to_owned(),
                    link: String::new(),
                },
            ],
        };
        assert_eq!(section_summary(&section), "Guide: 2 items (1 unpublished)");
    }
}
