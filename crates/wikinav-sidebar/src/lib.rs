//! Sidebar navigation generation for Markdown wikis.
//!
//! Scans configured topic directories, orders their documents and labels
//! each one with its first top-level heading. The result is a
//! [`NavigationTree`] ready to be serialized as a site renderer's sidebar.
//!
//! # Topic roles
//!
//! - [`TopicRole::Topic`]: the roadmap document first, then `module-*`
//!   documents, then everything else, each group sorted by name.
//! - [`TopicRole::Collection`]: `README` first, then everything else sorted
//!   by name.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wikinav_sidebar::{FailurePolicy, FsSource, Topic, build_navigation};
//!
//! let source = FsSource::new(PathBuf::from("wiki"));
//! let topics = vec![Topic::new("engines/godot", "Godot 4")];
//! let build = build_navigation(&source, &topics, FailurePolicy::Abort)?;
//! println!("{}", build.tree.to_json_pretty()?);
//! ```

mod builder;
pub mod classify;
mod error;
mod navigation;
mod source;
mod title;
mod topic;

pub use builder::{Document, PRIMARY_FALLBACK, SidebarBuilder};
pub use error::SidebarError;
pub use navigation::{
    FailurePolicy, NavEntry, NavGroup, NavigationBuild, NavigationTree, build_navigation,
};
#[cfg(feature = "mock")]
pub use source::MemorySource;
pub use source::{DEFAULT_EXTENSION, DocumentSource, FsSource};
pub use title::{extract_title, fallback_label};
pub use topic::{Topic, TopicRole};
