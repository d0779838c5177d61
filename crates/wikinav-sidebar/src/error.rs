//! Sidebar generation error types.

use std::path::PathBuf;

/// Error raised while building a topic sidebar or the navigation tree.
///
/// Only inventory failures are errors. Unreadable document content degrades
/// to a filename label and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// Configured topic directory does not exist.
    #[error("Topic directory not found: {} (topic: {topic})", .path.display())]
    MissingTopic {
        /// Topic path as configured.
        topic: String,
        /// Resolved directory path.
        path: PathBuf,
    },
    /// Configured topic path exists but is not a directory.
    #[error("Topic path is not a directory: {} (topic: {topic})", .path.display())]
    NotADirectory {
        /// Topic path as configured.
        topic: String,
        /// Resolved path.
        path: PathBuf,
    },
    /// Listing the topic directory failed.
    #[error("Failed to list topic {topic}: {source}")]
    Io {
        /// Topic path as configured.
        topic: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Navigation tree could not be serialized.
    #[error("Failed to serialize navigation: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SidebarError {
    /// Topic the error belongs to, if any.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::MissingTopic { topic, .. }
            | Self::NotADirectory { topic, .. }
            | Self::Io { topic, .. } => Some(topic),
            Self::Serialize(_) => None,
        }
    }
}
