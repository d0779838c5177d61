//! Navigation tree assembly.
//!
//! Builds every configured topic and collects the results into a
//! [`NavigationTree`] keyed by `/<topic path>/`. The serialized tree matches
//! the sidebar shape expected by VitePress:
//!
//! ```json
//! {
//!   "/engines/love2d/": [
//!     {
//!       "text": "LOVE2D",
//!       "items": [
//!         { "text": "LOVE2D Learning Roadmap", "link": "/engines/love2d/love2d-learning-roadmap.md" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use wikinav_sidebar::{FailurePolicy, FsSource, Topic, build_navigation};
//!
//! let temp_dir = tempfile::tempdir().unwrap();
//! let dir = temp_dir.path().to_path_buf();
//! std::fs::create_dir_all(dir.join("programming/ecs")).unwrap();
//! std::fs::write(dir.join("programming/ecs/ecs-learning-roadmap.md"), "# ECS Roadmap").unwrap();
//!
//! let source = FsSource::new(dir);
//! let topics = vec![Topic::new("programming/ecs", "ECS")];
//! let build = build_navigation(&source, &topics, FailurePolicy::Abort).unwrap();
//!
//! let group = build.tree.get("/programming/ecs/").unwrap();
//! assert_eq!(group.text, "ECS");
//! assert_eq!(group.items[0].text, "ECS Roadmap");
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::builder::SidebarBuilder;
use crate::error::SidebarError;
use crate::source::DocumentSource;
use crate::topic::Topic;

/// One clickable sidebar item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display text.
    pub text: String,
    /// Link target (`/<topic>/<file name>`).
    pub link: String,
}

/// A topic's sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Topic display label.
    pub text: String,
    /// Entries in display order.
    pub items: Vec<NavEntry>,
}

/// Sidebar configuration for the whole site.
///
/// Keys iterate and serialize in sorted order, so output is byte-stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavigationTree {
    groups: BTreeMap<String, [NavGroup; 1]>,
}

impl NavigationTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a topic's entries, replacing any previous group for it.
    pub fn insert(&mut self, topic: &Topic, items: Vec<NavEntry>) {
        let group = NavGroup {
            text: topic.label.clone(),
            items,
        };
        self.groups.insert(topic.key(), [group]);
    }

    /// Group for a key such as `"/engines/godot/"`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NavGroup> {
        self.groups.get(key).map(|[group]| group)
    }

    /// Number of topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the tree has no topics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over `(key, group)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavGroup)> {
        self.groups
            .iter()
            .map(|(key, [group])| (key.as_str(), group))
    }

    /// Keys of topics that produced no entries.
    ///
    /// An empty topic usually means a misconfigured topic path.
    #[must_use]
    pub fn empty_topics(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, group)| group.items.is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    /// Total number of entries across all topics.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.iter().map(|(_, group)| group.items.len()).sum()
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Serialize`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SidebarError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What to do when a topic cannot be built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the whole build on the first broken topic.
    #[default]
    Abort,
    /// Leave broken topics out of the tree and report them.
    Skip,
}

/// Result of [`build_navigation`].
#[derive(Debug, Default)]
pub struct NavigationBuild {
    /// Assembled navigation tree.
    pub tree: NavigationTree,
    /// Topics left out under [`FailurePolicy::Skip`], in configuration order.
    pub failures: Vec<SidebarError>,
}

/// Build the navigation tree for all topics.
///
/// Topics are built in parallel. Per-topic ordering does not depend on
/// scheduling, and the tree is keyed, so the result is deterministic.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], returns the error of the first failing
/// topic in configuration order.
pub fn build_navigation(
    source: &dyn DocumentSource,
    topics: &[Topic],
    policy: FailurePolicy,
) -> Result<NavigationBuild, SidebarError> {
    let builder = SidebarBuilder::new(source);
    let results: Vec<_> = topics
        .par_iter()
        .map(|topic| (topic, builder.build_topic(topic)))
        .collect();

    let mut build = NavigationBuild::default();
    for (topic, result) in results {
        match result {
            Ok(items) => build.tree.insert(topic, items),
            Err(err) if policy == FailurePolicy::Skip => {
                tracing::warn!(topic = %topic.path, error = %err, "Skipping topic");
                build.failures.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        topics = build.tree.len(),
        entries = build.tree.entry_count(),
        skipped = build.failures.len(),
        "Navigation built"
    );
    Ok(build)
}
