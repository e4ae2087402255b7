//! Weighted prefix autocomplete.
//!
//! Terms are kept in lexicographic order so the entries sharing a prefix
//! form one contiguous run that two binary searches can locate. Within that
//! run the heaviest `limit` terms win; equal weights fall back to
//! lexicographic order of the term text, which keeps results deterministic.

use std::{cmp::Ordering, fmt, ops::Range};

use thiserror::Error;

/// Number of suggestions returned when no limit has been configured.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Malformed input handed to the autocomplete engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutocompleteError {
    /// Terms must contain at least one character.
    #[error("autocomplete term must not be empty")]
    EmptyTerm,
    /// Weights must be zero or greater.
    #[error("term weight must be non-negative (got {0})")]
    NegativeWeight(i64),
    /// The suggestion limit must be at least one.
    #[error("suggestion limit must be positive (got {0})")]
    InvalidLimit(usize),
}

/// A vocabulary entry and its ranking weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    text: String,
    weight: u64,
}

impl Term {
    /// Validate and build a term.
    pub fn new(text: impl Into<String>, weight: i64) -> Result<Self, AutocompleteError> {
        let text = text.into();
        if text.is_empty() {
            return Err(AutocompleteError::EmptyTerm);
        }
        let weight = u64::try_from(weight).map_err(|_| AutocompleteError::NegativeWeight(weight))?;
        Ok(Self { text, weight })
    }

    /// Term text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ranking weight.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Descending weight, then ascending text.
    pub fn by_rank(a: &Term, b: &Term) -> Ordering {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.text.cmp(&b.text))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.weight, self.text)
    }
}

/// Append-only index answering "top-K terms starting with a prefix".
#[derive(Debug, Clone)]
pub struct Autocomplete {
    terms: Vec<Term>,
    limit: usize,
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl Autocomplete {
    /// Empty index with the default suggestion limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty index returning at most `limit` suggestions.
    pub fn with_limit(limit: usize) -> Result<Self, AutocompleteError> {
        let mut engine = Self::default();
        engine.configure(limit)?;
        Ok(engine)
    }

    /// Set the maximum number of suggestions returned from now on.
    pub fn configure(&mut self, limit: usize) -> Result<(), AutocompleteError> {
        if limit == 0 {
            return Err(AutocompleteError::InvalidLimit(limit));
        }
        self.limit = limit;
        Ok(())
    }

    /// Current suggestion limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of indexed terms, duplicates included.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether nothing has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index one term. Duplicate texts are kept as separate entries.
    pub fn insert(&mut self, text: impl Into<String>, weight: i64) -> Result<(), AutocompleteError> {
        let term = Term::new(text, weight)?;
        let index = self
            .terms
            .partition_point(|existing| existing.text <= term.text);
        self.terms.insert(index, term);
        Ok(())
    }

    /// Whether `text` is indexed exactly.
    pub fn contains(&self, text: &str) -> bool {
        self.terms
            .binary_search_by(|term| term.text.as_str().cmp(text))
            .is_ok()
    }

    /// Index a batch of terms. Nothing is indexed if any entry is invalid.
    pub fn extend<I, S>(&mut self, entries: I) -> Result<(), AutocompleteError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let batch = entries
            .into_iter()
            .map(|(text, weight)| Term::new(text, weight))
            .collect::<Result<Vec<_>, _>>()?;
        self.terms.extend(batch);
        self.terms.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(())
    }

    /// Up to `limit` terms starting with `prefix`, heaviest first.
    ///
    /// Matching is a case-sensitive byte prefix test. An empty prefix yields
    /// no suggestions.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Term> = self.terms[self.prefix_range(prefix)].iter().collect();
        if matches.len() > self.limit {
            matches.select_nth_unstable_by(self.limit - 1, |a, b| Term::by_rank(a, b));
            matches.truncate(self.limit);
        }
        matches.sort_by(|a, b| Term::by_rank(a, b));
        matches.into_iter().map(|term| term.text.clone()).collect()
    }

    /// Number of indexed terms starting with `prefix`.
    pub fn count_matches(&self, prefix: &str) -> usize {
        if prefix.is_empty() {
            return 0;
        }
        self.prefix_range(prefix).len()
    }

    fn prefix_range(&self, prefix: &str) -> Range<usize> {
        let prefix = prefix.as_bytes();
        let start = self
            .terms
            .partition_point(|term| compare_prefix(&term.text, prefix) == Ordering::Less);
        let end = self
            .terms
            .partition_point(|term| compare_prefix(&term.text, prefix) != Ordering::Greater);
        start..end
    }
}

/// Compare `text` truncated to the prefix length against `prefix`.
fn compare_prefix(text: &str, prefix: &[u8]) -> Ordering {
    let bytes = text.as_bytes();
    let len = bytes.len().min(prefix.len());
    bytes[..len].cmp(prefix)
}
