//! QueryService - the read-only facade over the directory

use std::sync::Arc;

use tracing::debug;

use crate::directory::Directory;
use crate::entry::Entry;
use crate::rank::{select_top, ScoredCandidate};
use crate::similarity::BlockMatcher;

/// Number of entries returned by [`QueryService::rank_by_name`] unless configured otherwise
pub const DEFAULT_RANK_LIMIT: usize = 3;

/// Exact lookup and city-name ranking over a shared [`Directory`].
///
/// Cloning is cheap; clones share the same directory.
#[derive(Debug, Clone)]
pub struct QueryService {
    directory: Arc<Directory>,
    rank_limit: usize,
}

impl QueryService {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self {
            directory,
            rank_limit: DEFAULT_RANK_LIMIT,
        }
    }

    /// Override how many entries a ranking returns
    pub fn with_limit(mut self, rank_limit: usize) -> Self {
        self.rank_limit = rank_limit;
        self
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// First entry with any field equal to `token`, or `None`
    pub fn lookup_by_token(&self, token: &str) -> Option<&Entry> {
        self.directory.exact_lookup(token)
    }

    /// Entries whose city best matches `name`, best first.
    ///
    /// Every entry is scored, so the result always holds
    /// `min(limit, directory size)` entries, even for an empty `name`.
    pub fn rank_by_name(&self, name: &str) -> Vec<&Entry> {
        let query = name.to_lowercase();
        let candidates: Vec<ScoredCandidate<'_>> = self
            .directory
            .iter()
            .map(|entry| {
                let score = BlockMatcher::new(&query, &entry.city.to_lowercase()).ratio();
                ScoredCandidate::new(entry, score)
            })
            .collect();

        debug!(
            query = name,
            candidates = candidates.len(),
            limit = self.rank_limit,
            "Ranking entries by city name"
        );

        select_top(candidates, self.rank_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::similarity;
    use pretty_assertions::assert_eq;

    fn scenario_service() -> QueryService {
        let directory = Directory::new(vec![
            Entry::builder().zipcode("12345").city("Testville").build(),
            Entry::builder().zipcode("23456").city("Example City").build(),
            Entry::builder().zipcode("34567").city("Sample City").build(),
        ]);
        QueryService::new(Arc::new(directory))
    }

    fn zipcodes(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.zipcode.clone()).collect()
    }

    #[test]
    fn test_rank_scenario() {
        let service = scenario_service();
        let ranked = service.rank_by_name("Testville");

        // Sample City scores 0.3, Example City 0.2857
        assert_eq!(zipcodes(&ranked), vec!["12345", "34567", "23456"]);
    }

    #[test]
    fn test_rank_is_case_insensitive() {
        let service = scenario_service();
        assert_eq!(service.rank_by_name("TESTVILLE")[0].zipcode, "12345");
        assert_eq!(service.rank_by_name("sample city")[0].zipcode, "34567");
    }

    #[test]
    fn test_rank_matches_case_insensitive_similarity() {
        let directory = Directory::new(vec![
            Entry::builder().zipcode("00501").city("HOLTSVILLE").build(),
            Entry::builder().zipcode("10001").city("New York").build(),
            Entry::builder().zipcode("60601").city("Chicago").build(),
            Entry::builder().zipcode("94101").city("San Francisco").build(),
        ]);
        let service = QueryService::new(Arc::new(directory)).with_limit(4);

        let mut expected: Vec<&Entry> = service.directory().iter().collect();
        expected.sort_by(|a, b| {
            similarity("NeW yOrK", &b.city)
                .partial_cmp(&similarity("NeW yOrK", &a.city))
                .unwrap()
        });

        assert_eq!(service.rank_by_name("NeW yOrK"), expected);
        assert_eq!(
            zipcodes(&service.rank_by_name("holtsvile")),
            zipcodes(&service.rank_by_name("HOLTSVILE"))
        );
    }

    #[test]
    fn test_rank_empty_name_keeps_dataset_order() {
        let service = scenario_service();
        // Everything scores 0.0 against the empty string
        assert_eq!(
            zipcodes(&service.rank_by_name("")),
            vec!["12345", "23456", "34567"]
        );
    }

    #[test]
    fn test_rank_returns_at_most_limit() {
        let directory: Directory = (0..10)
            .map(|i| {
                Entry::builder()
                    .zipcode(format!("{:05}", i))
                    .city(format!("City {}", i))
                    .build()
            })
            .collect();
        let service = QueryService::new(Arc::new(directory));

        assert_eq!(service.rank_by_name("City 7").len(), DEFAULT_RANK_LIMIT);
        assert_eq!(service.rank_by_name("City 7")[0].zipcode, "00007");
        assert_eq!(service.clone().with_limit(5).rank_by_name("x").len(), 5);
    }

    #[test]
    fn test_rank_small_directory() {
        let directory = Directory::new(vec![Entry::builder().zipcode("1").city("Only").build()]);
        let service = QueryService::new(Arc::new(directory));
        assert_eq!(service.rank_by_name("anything").len(), 1);

        let empty = QueryService::new(Arc::new(Directory::default()));
        assert!(empty.rank_by_name("anything").is_empty());
    }

    #[test]
    fn test_rank_ties_resolve_to_dataset_order() {
        let directory = Directory::new(vec![
            Entry::builder().zipcode("00501").city("Holtsville").build(),
            Entry::builder().zipcode("10001").city("New York").build(),
            Entry::builder().zipcode("00544").city("Holtsville").build(),
            Entry::builder().zipcode("00601").city("Holtsville").build(),
        ]);
        let service = QueryService::new(Arc::new(directory));

        assert_eq!(
            zipcodes(&service.rank_by_name("Holtsville")),
            vec!["00501", "00544", "00601"]
        );
    }

    #[test]
    fn test_lookup_by_token() {
        let service = scenario_service();

        assert_eq!(service.lookup_by_token("23456").unwrap().city, "Example City");
        assert_eq!(service.lookup_by_token("Sample City").unwrap().zipcode, "34567");
        assert!(service.lookup_by_token("0000000").is_none());
    }

    #[test]
    fn test_shared_directory_across_threads() {
        let service = scenario_service();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || service.rank_by_name("Testville")[0].zipcode.clone())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "12345");
        }
        assert_eq!(service.directory().len(), 3);
    }
}
