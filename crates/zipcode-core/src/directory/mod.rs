//! In-memory zip code directory
//!
//! The [`Directory`] is built exactly once at start-up by the
//! [`DatasetLoader`] and never changes afterwards. It is shared behind an
//! `Arc` so any number of readers can scan it without locking.
//!
//! # Example
//!
//! ```rust
//! use zipcode_core::{DatasetLoader, Directory};
//!
//! let csv = "00501,Holtsville,New York,NY,Suffolk,40.8154,-73.0451\n";
//! let directory = DatasetLoader::new().load_reader(csv.as_bytes()).unwrap();
//!
//! assert_eq!(directory.len(), 1);
//! assert_eq!(directory.exact_lookup("00501").unwrap().city, "Holtsville");
//! assert!(directory.exact_lookup("99999").is_none());
//! ```

mod error;
pub mod loader;

pub use error::{LoadError, LoadResult};
pub use loader::DatasetLoader;

use crate::entry::Entry;

/// Ordered, immutable collection of entries.
///
/// Order is the order of the source dataset. Duplicate zip codes are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    entries: Vec<Entry>,
}

impl Directory {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first entry having any field equal to `token`.
    ///
    /// The match is not restricted to the zip code: a token equal to a city,
    /// state code or coordinate also matches. Clients rely on this.
    pub fn exact_lookup(&self, token: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.has_field_value(token))
    }
}

impl FromIterator<Entry> for Directory {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
