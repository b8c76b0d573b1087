//! `docshell dump` command implementation.

use clap::{Args, ValueEnum};
use docshell_config::SiteConfig;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Output format for the dump command.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum DumpFormat {
    #[default]
    Toml,
    Json,
}

/// Arguments for the dump command.
#[derive(Args)]
pub(crate) struct DumpArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: DumpFormat,
}

impl DumpArgs {
    /// Execute the dump command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load()?;
        let rendered = render(&config, self.format)?;
        Output::new().data(rendered.trim_end());
        Ok(())
    }
}

/// Serialize the validated configuration in its authored shape.
fn render(config: &SiteConfig, format: DumpFormat) -> Result<String, CliError> {
    match format {
        DumpFormat::Toml => {
            toml::to_string(config).map_err(|e| CliError::Serialize(e.to_string()))
        }
        DumpFormat::Json => {
            serde_json::to_string_pretty(config).map_err(|e| CliError::Serialize(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
title = "Forms"
description = "Docs"
base_path = "/forms-docs-demo/"

[locales.root]
label = "English"
lang = "en"

[[sidebar]]
text = "Guide"
items = [{ text = "X", link = "" }]
"#;

    #[test]
    fn test_render_toml_reloads() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let rendered = render(&config, DumpFormat::Toml).unwrap();
        assert_eq!(SiteConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_render_json_reloads() {
        let config = SiteConfig::from_toml_str(CONFIG).unwrap();
        let rendered = render(&config, DumpFormat::Json).unwrap();
        assert!(rendered.contains("\"base_path\": \"/forms-docs-demo/\""));
        assert_eq!(SiteConfig::from_json_str(&rendered).unwrap(), config);
    }
}
