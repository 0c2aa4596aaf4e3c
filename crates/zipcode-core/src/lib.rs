//! Zip Code Directory Engine
//!
//! The computational core behind the zip code API: an immutable in-memory
//! directory of postal records, exact lookup by token, and ranking of records
//! by similarity of their city name to a free-text query.
//!
//! # Components
//!
//! - [`loader`](directory::loader) - parses the seven-field CSV dataset into [`Entry`] values
//! - [`Directory`] - ordered, immutable entry collection with exact-token lookup
//! - [`similarity`] - ratio-of-matching-characters scoring via longest common blocks
//! - [`rank`] - stable top-K selection over scored candidates
//! - [`QueryService`] - the facade consumed by the network layer
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zipcode_core::{Directory, Entry, QueryService};
//!
//! let directory = Directory::new(vec![
//!     Entry::builder().zipcode("00501").city("Holtsville").state_code("NY").build(),
//!     Entry::builder().zipcode("00544").city("Holtsville").state_code("NY").build(),
//!     Entry::builder().zipcode("10001").city("New York").state_code("NY").build(),
//! ]);
//! let service = QueryService::new(Arc::new(directory));
//!
//! let entry = service.lookup_by_token("10001").unwrap();
//! assert_eq!(entry.city, "New York");
//!
//! let ranked = service.rank_by_name("holtsvile");
//! assert_eq!(ranked[0].zipcode, "00501");
//! assert_eq!(ranked.len(), 3);
//! ```

pub mod directory;
pub mod entry;
pub mod query;
pub mod rank;
pub mod similarity;

// Re-export main types at crate root
pub use directory::{DatasetLoader, Directory, LoadError, LoadResult};
pub use entry::{Entry, EntryBuilder};
pub use query::{QueryService, DEFAULT_RANK_LIMIT};
pub use rank::{select_top, ScoredCandidate};
pub use similarity::{similarity, BlockMatcher, MatchingBlock};
