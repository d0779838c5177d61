//! `wikinav check` command implementation.

use clap::Args;
use wikinav_sidebar::{FailurePolicy, NavigationBuild, Topic, build_navigation};

use super::{ConfigArgs, document_source};
use crate::error::CliError;
use crate::output::{Output, Status};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: ConfigArgs,
}

/// Outcome of building one topic.
#[derive(Debug, PartialEq, Eq)]
enum TopicStatus {
    /// Built with this many entries.
    Ok(usize),
    /// Built, but no documents were found.
    Empty,
    /// Could not be built.
    Failed(String),
}

impl TopicStatus {
    fn is_problem(&self) -> bool {
        !matches!(self, Self::Ok(_))
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any topic is missing or empty.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load(None)?;
        let topics = config.require_topics()?;

        let source = document_source(&config);
        let build = build_navigation(&source, topics, FailurePolicy::Skip)?;

        let statuses = topic_statuses(topics, &build);
        output.heading(&format!("Checked {} topics", statuses.len()));
        for (topic, status) in topics.iter().zip(&statuses) {
            match status {
                TopicStatus::Ok(count) => {
                    output.topic(Status::Ok, &topic.path, &topic.label, &format!("{count} entries"));
                }
                TopicStatus::Empty => {
                    output.topic(Status::Warn, &topic.path, &topic.label, "no documents");
                }
                TopicStatus::Failed(reason) => {
                    output.topic(Status::Fail, &topic.path, &topic.label, reason);
                }
            }
        }

        let problems = statuses.iter().filter(|s| s.is_problem()).count();
        if problems > 0 {
            return Err(CliError::Validation(format!(
                "{problems} of {} topics have problems",
                statuses.len()
            )));
        }

        output.success("All topics OK");
        Ok(())
    }
}

/// Status of each topic, in configuration order.
fn topic_statuses(topics: &[Topic], build: &NavigationBuild) -> Vec<TopicStatus> {
    topics
        .iter()
        .map(|topic| {
            if let Some(group) = build.tree.get(&topic.key()) {
                if group.items.is_empty() {
                    TopicStatus::Empty
                } else {
                    TopicStatus::Ok(group.items.len())
                }
            } else {
                let reason = build
                    .failures
                    .iter()
                    .find(|err| err.topic() == Some(topic.path.as_str()))
                    .map_or_else(|| "not built".to_owned(), ToString::to_string);
                TopicStatus::Failed(reason)
            }
        })
        .collect()
}
