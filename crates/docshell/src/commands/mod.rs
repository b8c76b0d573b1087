//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod dump;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use docshell_config::{Overrides, SiteConfig};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use dump::DumpArgs;
pub(crate) use resolve::ResolveArgs;

/// Configuration source shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover docshell.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path for internal links (overrides config).
    #[arg(long, env = "DOCSHELL_BASE_PATH")]
    base_path: Option<String>,

    /// Site title (overrides config).
    #[arg(long)]
    title: Option<String>,
}

impl ConfigArgs {
    /// Load and validate the site configuration.
    pub(crate) fn load(&self) -> Result<SiteConfig, CliError> {
        let overrides = Overrides {
            base_path: self.base_path.clone(),
            title: self.title.clone(),
        };
        let config = SiteConfig::open(self.config.as_deref(), Some(&overrides))?;
        Ok(config)
    }
}
