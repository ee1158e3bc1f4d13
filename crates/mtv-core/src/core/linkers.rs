use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CatalogueError {
    #[error("Linker catalogue must contain at least one linker type")]
    Empty,
    #[error("Linker type '{0}' appears more than once in the catalogue")]
    Duplicate(String),
    #[error("Linker type '{0}' is not a valid label; use ASCII letters, digits or '_'")]
    InvalidLabel(String),
}

/// The ordered set of linker types available for assignment.
///
/// Order is significant: the position of a label in the catalogue is its type index,
/// and therefore the offset of its bit inside every site's block of the solution vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerCatalogue {
    labels: Vec<String>,
}

impl LinkerCatalogue {
    /// Builds a catalogue from labels, preserving their order.
    ///
    /// # Errors
    ///
    /// * [`CatalogueError::Empty`] for an empty list.
    /// * [`CatalogueError::InvalidLabel`] if a label is empty or has a character other than
    ///   an ASCII letter, digit or `_`. Labels end up in variable names and in the
    ///   comma-joined site labels, where `-` marks an empty site.
    /// * [`CatalogueError::Duplicate`] if any label is repeated.
    pub fn new<I, S>(labels: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(CatalogueError::Empty);
        }
        for (i, label) in labels.iter().enumerate() {
            if !is_valid_label(label) {
                return Err(CatalogueError::InvalidLabel(label.clone()));
            }
            if labels[..i].contains(label) {
                return Err(CatalogueError::Duplicate(label.clone()));
            }
        }
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Maps `(site, type_index)` pairs onto positions of the flat binary vector.
///
/// Site `i` owns the contiguous block `[i * type_count, (i + 1) * type_count)`, with
/// types laid out in catalogue order. Variable creation and solution decoding both go
/// through this type so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    site_count: usize,
    type_count: usize,
}

impl VariableLayout {
    pub fn new(site_count: usize, type_count: usize) -> Self {
        Self {
            site_count,
            type_count,
        }
    }

    pub fn site_count(&self) -> usize {
        self.site_count
    }

    pub fn type_count(&self) -> usize {
        self.type_count
    }

    /// Total number of decision variables.
    pub fn len(&self) -> usize {
        self.site_count * self.type_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, site: usize, type_index: usize) -> usize {
        debug_assert!(site < self.site_count && type_index < self.type_count);
        site * self.type_count + type_index
    }

    #[inline]
    pub fn site_range(&self, site: usize) -> Range<usize> {
        let start = site * self.type_count;
        start..start + self.type_count
    }

    pub fn variable_name(site: usize, label: &str) -> String {
        format!("q_{}_{}", site, label)
    }
}
