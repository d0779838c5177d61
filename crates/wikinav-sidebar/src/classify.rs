//! Document classification and ordering.
//!
//! Classification is a pure function of file names. Ordering consumes the
//! classified names and sorts by class, then by name.

/// Substring marking a topic's roadmap document.
pub const PRIMARY_MARKER: &str = "roadmap";

/// Prefix marking a module document.
pub const MODULE_PREFIX: &str = "module-";

/// Stem of a collection's primary document.
pub const README_STEM: &str = "README";

/// Document class within a topic-role directory.
///
/// Variant order is display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TopicClass {
    /// The roadmap document.
    Primary,
    /// A `module-*` document.
    Module,
    /// Anything else.
    Extra,
}

/// Document class within a collection-role directory.
///
/// Variant order is display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CollectionClass {
    /// `README.<ext>`.
    Readme,
    /// Anything else.
    Other,
}

/// Classify topic-role documents.
///
/// Only the first name containing [`PRIMARY_MARKER`] becomes
/// [`TopicClass::Primary`]; later ones fall through to the remaining rules.
/// Pass names sorted for a deterministic primary.
#[must_use]
pub fn classify_topic(names: &[String]) -> Vec<(&str, TopicClass)> {
    let mut primary_taken = false;
    names
        .iter()
        .map(|name| {
            let class = if !primary_taken && name.contains(PRIMARY_MARKER) {
                primary_taken = true;
                TopicClass::Primary
            } else if name.starts_with(MODULE_PREFIX) {
                TopicClass::Module
            } else {
                TopicClass::Extra
            };
            (name.as_str(), class)
        })
        .collect()
}

/// Classify collection-role documents.
#[must_use]
pub fn classify_collection<'a>(
    names: &'a [String],
    extension: &str,
) -> Vec<(&'a str, CollectionClass)> {
    let readme = format!("{README_STEM}.{extension}");
    names
        .iter()
        .map(|name| {
            let class = if *name == readme {
                CollectionClass::Readme
            } else {
                CollectionClass::Other
            };
            (name.as_str(), class)
        })
        .collect()
}

/// Sort classified documents into display order: by class, then by name.
#[must_use]
pub fn order<C: Ord>(mut classified: Vec<(&str, C)>) -> Vec<(&str, C)> {
    classified.sort_by(|(a_name, a_class), (b_name, b_class)| {
        a_class.cmp(b_class).then_with(|| a_name.cmp(b_name))
    });
    classified
}
