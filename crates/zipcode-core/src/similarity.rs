//! String similarity via longest common blocks
//!
//! The score is the classic "ratio of matching characters": find the longest
//! contiguous block shared by both strings, recurse into the unmatched
//! regions on either side of it, and sum the block lengths as `M`. With `T`
//! the combined length of both strings the score is `2 * M / T`, or `1.0`
//! when both strings are empty.
//!
//! Lengths are counted in `char`s, not bytes.

use ahash::AHashMap;

/// Sequences at least this long get the popular-character heuristic
const POPULAR_MIN_LEN: usize = 200;

/// A block shared by both sequences:
/// `a[a_start..a_start + len] == b[b_start..b_start + len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Longest-common-block matcher over two character sequences.
///
/// Positions of every character of `b` are indexed once up front. When `b`
/// has 200 characters or more, characters occurring in more
/// than 1% of its positions (plus one) are dropped from the index: they never
/// seed a block, though a block found elsewhere may still be extended across
/// them.
pub struct BlockMatcher {
    a: Vec<char>,
    b: Vec<char>,
    b_index: AHashMap<char, Vec<usize>>,
}

impl BlockMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let b_index = index_positions(&b);

        Self { a, b, b_index }
    }

    /// Longest block within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// Returns a zero-length block at `(a_lo, b_lo)` when nothing matches.
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_len) = (a_lo, b_lo, 0usize);

        // run_lengths[j] = length of the match ending at a[i - 1], b[j]
        let mut run_lengths: AHashMap<usize, usize> = AHashMap::new();

        for i in a_lo..a_hi {
            let mut next_run_lengths = AHashMap::new();

            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }

                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_lengths.insert(j, k);

                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }

            run_lengths = next_run_lengths;
        }

        // Grow across characters left out of the index
        while best_i > a_lo && best_j > b_lo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < a_hi
            && best_j + best_len < b_hi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        MatchingBlock {
            a_start: best_i,
            b_start: best_j,
            len: best_len,
        }
    }

    /// All matching blocks, ordered by position, adjacent blocks merged
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let block = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.len == 0 {
                continue;
            }

            let a_end = block.a_start + block.len;
            let b_end = block.b_start + block.len;

            if a_lo < block.a_start && b_lo < block.b_start {
                pending.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            if a_end < a_hi && b_end < b_hi {
                pending.push((a_end, a_hi, b_end, b_hi));
            }

            blocks.push(block);
        }

        blocks.sort_by_key(|block| (block.a_start, block.b_start));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }

        merged
    }

    /// Total number of matched characters (`M`)
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|block| block.len).sum()
    }

    /// `2 * M / T`, or 1.0 when both sequences are empty
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }
}

/// Case-insensitive similarity of two strings in `[0.0, 1.0]`
pub fn similarity(a: &str, b: &str) -> f64 {
    BlockMatcher::new(&a.to_lowercase(), &b.to_lowercase()).ratio()
}

fn index_positions(b: &[char]) -> AHashMap<char, Vec<usize>> {
    let mut index: AHashMap<char, Vec<usize>> = AHashMap::new();
    for (j, &c) in b.iter().enumerate() {
        index.entry(c).or_default().push(j);
    }

    if b.len() >= POPULAR_MIN_LEN {
        let threshold = b.len() / 100 + 1;
        index.retain(|_, positions| positions.len() <= threshold);
    }

    index
}
