//! Case-insensitive, whole-word matching of fixed terms.
//!
//! Text is split on Unicode word boundaries (UAX #29) and terms are matched
//! as sequences of those segments, so a term can only start and end where
//! the text has a word boundary. `"moet"` matches in `"Dat moet."` but not in
//! `"moeten"`.

use std::collections::HashMap;
use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// A set of terms compiled for single-pass, longest-first matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMatcher {
    /// Each term as its lowercased word-boundary segments.
    terms: Vec<Vec<String>>,
    /// Term indices keyed by their first segment, longest term first.
    by_first: HashMap<String, Vec<usize>>,
}

impl TermMatcher {
    /// Compile a set of terms. Blank terms are ignored and duplicates
    /// (after lowercasing) are merged.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut split: Vec<Vec<String>> = terms
            .into_iter()
            .map(|term| segments_lowercase(term.as_ref().trim()))
            .filter(|segments| !segments.is_empty())
            .collect();
        // Longest first, then lexical, so matching and rendering are deterministic.
        split.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        split.dedup();

        let mut by_first: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, segments) in split.iter().enumerate() {
            by_first
                .entry(segments[0].clone())
                .or_default()
                .push(index);
        }

        Self {
            terms: split,
            by_first,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// The compiled terms, rejoined, in matching priority order.
    pub fn terms(&self) -> impl Iterator<Item = String> + '_ {
        self.terms.iter().map(|segments| segments.concat())
    }

    /// Byte ranges of every non-overlapping occurrence, left to right.
    ///
    /// At each position the longest matching term wins.
    pub fn find_iter(&self, text: &str) -> Vec<Range<usize>> {
        if self.terms.is_empty() {
            return Vec::new();
        }
        let segments: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
        let lowered: Vec<String> = segments.iter().map(|(_, s)| s.to_lowercase()).collect();

        let mut found = Vec::new();
        let mut i = 0;
        while i < segments.len() {
            let matched = self.by_first.get(&lowered[i]).and_then(|candidates| {
                candidates.iter().map(|&t| &self.terms[t]).find(|term| {
                    i + term.len() <= lowered.len()
                        && term.iter().zip(&lowered[i..]).all(|(a, b)| a == b)
                })
            });
            match matched {
                Some(term) => {
                    let (last_start, last) = segments[i + term.len() - 1];
                    found.push(segments[i].0..last_start + last.len());
                    i += term.len();
                }
                None => i += 1,
            }
        }
        found
    }
}

fn segments_lowercase(term: &str) -> Vec<String> {
    term.split_word_bounds().map(str::to_lowercase).collect()
}
