//! Topic configuration.

use serde::Deserialize;

/// Marker in a topic path that makes it a collection when no role is set.
const COLLECTION_MARKER: &str = "awesome-";

/// How a topic's documents are classified and ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicRole {
    /// Learning-roadmap directory: roadmap, then modules, then extras.
    #[default]
    Topic,
    /// Curated-list directory: README, then everything else.
    #[serde(alias = "awesome")]
    Collection,
}

impl TopicRole {
    /// Infer the role from a topic path.
    ///
    /// ```
    /// use wikinav_sidebar::TopicRole;
    ///
    /// assert_eq!(TopicRole::infer("resources/awesome-love2d"), TopicRole::Collection);
    /// assert_eq!(TopicRole::infer("engines/love2d"), TopicRole::Topic);
    /// ```
    #[must_use]
    pub fn infer(topic_path: &str) -> Self {
        if topic_path.contains(COLLECTION_MARKER) {
            Self::Collection
        } else {
            Self::Topic
        }
    }
}

/// A configured topic: one directory, one sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Topic {
    /// Directory path relative to the docs root (e.g. `"engines/godot"`).
    pub path: String,
    /// Group label shown in the sidebar.
    pub label: String,
    /// Explicit role. Inferred from the path when absent.
    #[serde(default)]
    pub role: Option<TopicRole>,
}

impl Topic {
    /// Create a topic whose role is inferred from its path.
    #[must_use]
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            role: None,
        }
    }

    /// Set an explicit role.
    #[must_use]
    pub fn with_role(mut self, role: TopicRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Effective role.
    #[must_use]
    pub fn role(&self) -> TopicRole {
        self.role.unwrap_or_else(|| TopicRole::infer(&self.path))
    }

    /// Navigation tree key (`/<path>/`).
    #[must_use]
    pub fn key(&self) -> String {
        format!("/{}/", self.path)
    }

    /// Link to a document of this topic. The file name keeps its extension.
    #[must_use]
    pub fn link(&self, file_name: &str) -> String {
        format!("/{}/{file_name}", self.path)
    }
}
