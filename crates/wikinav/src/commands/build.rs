//! `wikinav build` command implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use wikinav_sidebar::{FailurePolicy, build_navigation};

use super::{ConfigArgs, document_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub common: ConfigArgs,

    /// Output file for the sidebar JSON (overrides config).
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the sidebar JSON to stdout instead of a file.
    #[arg(long)]
    stdout: bool,

    /// Leave out topics whose directory is missing instead of failing.
    #[arg(long)]
    keep_going: bool,

    /// Fail if any topic produces no entries.
    #[arg(long)]
    strict: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a topic cannot be built,
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load(self.output.clone())?;
        let topics = config.require_topics()?;

        let source = document_source(&config);
        let build = build_navigation(&source, topics, self.failure_policy())?;

        for failure in &build.failures {
            output.warning(&format!("Skipped topic: {failure}"));
        }
        let empty = build.tree.empty_topics();
        for key in &empty {
            output.warning(&format!("Topic {key} has no documents"));
        }
        if self.strict && !empty.is_empty() {
            return Err(CliError::Validation(format!(
                "{} topic(s) produced no entries",
                empty.len()
            )));
        }

        let json = build.tree.to_json_pretty()?;
        if self.stdout {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        } else {
            write_sidebar(&config.output_resolved.path, &json)?;
            output.success(&format!(
                "Sidebar with {} topics and {} entries written to {}",
                build.tree.len(),
                build.tree.entry_count(),
                config.output_resolved.path.display()
            ));
        }

        Ok(())
    }

    fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        }
    }
}

/// Write sidebar JSON, creating parent directories as needed.
fn write_sidebar(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{json}\n"))?;
    Ok(())
}
