//! Document sources.
//!
//! [`DocumentSource`] separates listing and reading documents from sidebar
//! building, so ordering and labeling can be tested without a filesystem.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::SidebarError;

/// Default document extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// Access to the documents of each topic.
///
/// Topic arguments are topic paths as configured (e.g. `"engines/godot"`),
/// never filesystem paths.
pub trait DocumentSource: Send + Sync {
    /// Recognized document extension, without the leading dot.
    fn extension(&self) -> &str;

    /// List document file names in a topic.
    ///
    /// Only names ending in `.{extension}` are returned. Order is the
    /// backend's natural listing order and carries no meaning.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] if the topic does not exist or cannot be listed.
    fn list(&self, topic: &str) -> Result<Vec<String>, SidebarError>;

    /// Read a document's full content.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the document cannot be read as UTF-8 text.
    fn read(&self, topic: &str, name: &str) -> io::Result<String>;
}

/// Check whether a file name carries the given extension.
pub(crate) fn has_extension(name: &str, extension: &str) -> bool {
    name.strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Filesystem-backed document source rooted at a docs directory.
///
/// Each topic maps to `root/<topic>`. Only regular files (or symlinks to
/// them) directly inside the topic directory are listed.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
    extension: String,
}

impl FsSource {
    /// Create a source for `.md` documents under `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    /// Create a source recognizing a custom extension.
    #[must_use]
    pub fn with_extension(root: PathBuf, extension: &str) -> Self {
        Self {
            root,
            extension: extension.trim_start_matches('.').to_owned(),
        }
    }

    /// Resolve a topic path to its directory.
    #[must_use]
    pub fn topic_dir(&self, topic: &str) -> PathBuf {
        self.root.join(topic)
    }
}

impl DocumentSource for FsSource {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn list(&self, topic: &str) -> Result<Vec<String>, SidebarError> {
        let dir = self.topic_dir(topic);
        let io_error = |source: io::Error| SidebarError::Io {
            topic: topic.to_owned(),
            source,
        };

        let metadata = match fs::metadata(&dir) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SidebarError::MissingTopic {
                    topic: topic.to_owned(),
                    path: dir,
                });
            }
            Err(e) => return Err(io_error(e)),
        };
        if !metadata.is_dir() {
            return Err(SidebarError::NotADirectory {
                topic: topic.to_owned(),
                path: dir,
            });
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let path = entry.path();
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(
                        topic,
                        name = %raw.to_string_lossy(),
                        "Skipping document with non UTF-8 file name"
                    );
                    continue;
                }
            };
            if !has_extension(&name, &self.extension) {
                continue;
            }
            // Follows symlinks, so a link to a document counts as one.
            match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => names.push(name),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        topic,
                        document = %name,
                        error = %e,
                        "Skipping document that cannot be inspected"
                    );
                }
            }
        }

        Ok(names)
    }

    fn read(&self, topic: &str, name: &str) -> io::Result<String> {
        fs::read_to_string(self.topic_dir(topic).join(name))
    }
}

/// In-memory document source for testing.
///
/// Documents keep their insertion order as listing order, which lets tests
/// exercise listing-order independence.
///
/// # Example
///
/// ```ignore
/// use wikinav_sidebar::{DocumentSource, MemorySource};
///
/// let source = MemorySource::new()
///     .with_document("engines/godot", "module-01-basics.md", "# Basics")
///     .with_unreadable("engines/godot", "broken.md");
///
/// assert_eq!(source.list("engines/godot").unwrap().len(), 2);
/// ```
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MemorySource {
    topics: std::collections::HashMap<String, Vec<(String, Option<String>)>>,
}

#[cfg(any(test, feature = "mock"))]
impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic with no documents.
    #[must_use]
    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topics.entry(topic.to_owned()).or_default();
        self
    }

    /// Add a readable document.
    #[must_use]
    pub fn with_document(mut self, topic: &str, name: &str, content: &str) -> Self {
        self.topics
            .entry(topic.to_owned())
            .or_default()
            .push((name.to_owned(), Some(content.to_owned())));
        self
    }

    /// Add a document whose content cannot be read.
    #[must_use]
    pub fn with_unreadable(mut self, topic: &str, name: &str) -> Self {
        self.topics
            .entry(topic.to_owned())
            .or_default()
            .push((name.to_owned(), None));
        self
    }
}

#[cfg(any(test, feature = "mock"))]
impl DocumentSource for MemorySource {
    fn extension(&self) -> &str {
        DEFAULT_EXTENSION
    }

    fn list(&self, topic: &str) -> Result<Vec<String>, SidebarError> {
        let docs = self
            .topics
            .get(topic)
            .ok_or_else(|| SidebarError::MissingTopic {
                topic: topic.to_owned(),
                path: PathBuf::from(topic),
            })?;
        Ok(docs
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| has_extension(name, DEFAULT_EXTENSION))
            .collect())
    }

    fn read(&self, topic: &str, name: &str) -> io::Result<String> {
        self.topics
            .get(topic)
            .and_then(|docs| docs.iter().find(|(n, _)| n == name))
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?
            .1
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "unreadable document"))
    }
}
