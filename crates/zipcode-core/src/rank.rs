//! Top-K selection over scored entries

use std::cmp::Ordering;

use crate::entry::Entry;

/// An entry paired with its similarity score for the duration of one query
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a Entry,
    pub score: f64,
}

impl<'a> ScoredCandidate<'a> {
    pub fn new(entry: &'a Entry, score: f64) -> Self {
        Self { entry, score }
    }
}

/// Return the entries of the `k` highest-scoring candidates, best first.
///
/// The sort is stable, so candidates with equal scores keep their input
/// order. Callers feed candidates in directory order, which makes ties
/// resolve to the earlier dataset record.
pub fn select_top<'a>(mut candidates: Vec<ScoredCandidate<'a>>, k: usize) -> Vec<&'a Entry> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    candidates
        .into_iter()
        .take(k)
        .map(|candidate| candidate.entry)
        .collect()
}
