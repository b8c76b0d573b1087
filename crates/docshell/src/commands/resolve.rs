//! `docshell resolve` command implementation.

use clap::Args;
use docshell_config::{LinkKind, SiteConfig, link};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Links to resolve (e.g. "/ru/quick-start").
    #[arg(required = true)]
    links: Vec<String>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        for link in &self.links {
            output.data(&describe(&config, link));
        }
        Ok(())
    }
}

/// Tab-separated line: authored link, resolved href, locale key.
fn describe(config: &SiteConfig, link: &str) -> String {
    let href = match link::classify(link) {
        LinkKind::Placeholder => "(placeholder)".to_owned(),
        LinkKind::Internal | LinkKind::External => config.resolve_link(link),
    };
    let locale = &config.locale_for_link(link).key;
    format!("{link}\t{href}\t{locale}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::from_toml_str(
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
        .unwrap()
    }

    #[test]
    fn test_describe_internal() {
        assert_eq!(
            describe(&config(), "/ru/quick-start"),
            "/ru/quick-start\t/forms-docs-demo/ru/quick-start\tru"
        );
    }

    #[test]
    fn test_describe_placeholder() {
        assert_eq!(describe(&config(), ""), "\t(placeholder)\troot");
    }

    #[test]
    fn test_describe_external() {
        assert_eq!(
            describe(&config(), "https://github.com/acme"),
            "https://github.com/acme\thttps://github.com/acme\troot"
        );
    }
}
