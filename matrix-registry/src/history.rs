//! Append-only operation history

use std::iter::FusedIterator;
use std::slice;

/// Chronological log of performed actions
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> HistoryIter<'_> {
        HistoryIter { inner: self.entries.iter() }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a str;
    type IntoIter = HistoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over history entries
///
/// A clone continues from the same position. Call [`History::iter`] again
/// to start over.
#[derive(Debug, Clone)]
pub struct HistoryIter<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for HistoryIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for HistoryIter<'_> {}

impl FusedIterator for HistoryIter<'_> {}
