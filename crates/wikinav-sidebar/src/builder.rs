//! Per-topic sidebar building.
//!
//! [`SidebarBuilder`] lists a topic's documents, classifies them according to
//! the topic's role, reads each document's title and emits navigation entries
//! in display order.

use crate::classify::{
    CollectionClass, PRIMARY_MARKER, TopicClass, classify_collection, classify_topic, order,
};
use crate::error::SidebarError;
use crate::navigation::NavEntry;
use crate::source::DocumentSource;
use crate::title::{extract_title, fallback_label};
use crate::topic::{Topic, TopicRole};

/// Label for a roadmap document without a heading.
pub const PRIMARY_FALLBACK: &str = "Roadmap";

/// A document snapshot taken at scan time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// File name, unique within its topic.
    pub name: String,
    /// Title extracted from content, if any.
    pub title: Option<String>,
}

/// Builds ordered navigation entries for single topics.
pub struct SidebarBuilder<'a> {
    source: &'a dyn DocumentSource,
}

impl<'a> SidebarBuilder<'a> {
    /// Create a builder reading documents from `source`.
    #[must_use]
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self { source }
    }

    /// Build the ordered entries of one topic.
    ///
    /// An empty topic directory yields an empty list. Unreadable documents
    /// keep their entry with a filename label.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] if the topic directory is missing or cannot
    /// be listed.
    pub fn build_topic(&self, topic: &Topic) -> Result<Vec<NavEntry>, SidebarError> {
        let mut names = self.source.list(&topic.path)?;
        // Listing order is platform dependent; sort before picking the primary.
        names.sort();

        let role = topic.role();
        tracing::debug!(topic = %topic.path, ?role, documents = names.len(), "Building topic sidebar");

        let entries = match role {
            TopicRole::Topic => self.topic_entries(topic, &names),
            TopicRole::Collection => self.collection_entries(topic, &names),
        };

        if entries.is_empty() {
            tracing::debug!(topic = %topic.path, "Topic has no documents");
        }
        Ok(entries)
    }

    /// Load a document snapshot, extracting its title.
    ///
    /// Read failures are logged and produce a document without a title.
    #[must_use]
    pub fn load_document(&self, topic: &Topic, name: &str) -> Document {
        let title = match self.source.read(&topic.path, name) {
            Ok(content) => {
                let title = extract_title(&content);
                if title.is_none() {
                    tracing::debug!(topic = %topic.path, document = name, "No heading, using fallback label");
                }
                title
            }
            Err(e) => {
                tracing::warn!(
                    topic = %topic.path,
                    document = name,
                    error = %e,
                    "Failed to read document, using fallback label"
                );
                None
            }
        };

        Document {
            name: name.to_owned(),
            title,
        }
    }

    fn topic_entries(&self, topic: &Topic, names: &[String]) -> Vec<NavEntry> {
        let candidates: Vec<_> = names
            .iter()
            .filter(|name| name.contains(PRIMARY_MARKER))
            .collect();
        if let [selected, _, ..] = candidates.as_slice() {
            tracing::warn!(
                topic = %topic.path,
                selected = %selected,
                candidates = candidates.len(),
                "Multiple roadmap documents, using the first by name"
            );
        }

        let extension = self.source.extension();
        order(classify_topic(names))
            .into_iter()
            .map(|(name, class)| {
                let fallback = match class {
                    TopicClass::Primary => PRIMARY_FALLBACK.to_owned(),
                    TopicClass::Module | TopicClass::Extra => fallback_label(name, extension),
                };
                self.entry(topic, name, fallback)
            })
            .collect()
    }

    fn collection_entries(&self, topic: &Topic, names: &[String]) -> Vec<NavEntry> {
        let extension = self.source.extension();
        order(classify_collection(names, extension))
            .into_iter()
            .map(|(name, class)| {
                let fallback = match class {
                    CollectionClass::Readme => topic.path.clone(),
                    CollectionClass::Other => fallback_label(name, extension),
                };
                self.entry(topic, name, fallback)
            })
            .collect()
    }

    fn entry(&self, topic: &Topic, name: &str, fallback: String) -> NavEntry {
        let document = self.load_document(topic, name);
        NavEntry {
            text: document.title.unwrap_or(fallback),
            link: topic.link(&document.name),
        }
    }
}
