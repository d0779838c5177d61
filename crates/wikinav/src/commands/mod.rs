//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::PathBuf;

use clap::Args;
use wikinav_config::{CliSettings, Config};
use wikinav_sidebar::FsSource;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover wikinav.toml).
    #[arg(short, long, env = "WIKINAV_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (per-topic logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConfigArgs {
    /// Load configuration, applying CLI overrides.
    pub(crate) fn load(&self, output: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let out = Output::new();
        if let Some(path) = &config.config_path {
            out.info(&format!("Config: {}", path.display()));
        }
        out.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));

        Ok(config)
    }
}

/// Create the document source described by the configuration.
pub(crate) fn document_source(config: &Config) -> FsSource {
    FsSource::with_extension(
        config.docs_resolved.source_dir.clone(),
        &config.docs_resolved.extension,
    )
}
