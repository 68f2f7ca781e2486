use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Fitted term -> column mapping plus the IDF weight of each column.
///
/// Columns are dense, 0-based, and follow lexicographic term order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// `terms` and `idf` must be the same length
    pub(crate) fn new(terms: IndexSet<Box<str>>, idf: Vec<f32>) -> Self {
        debug_assert_eq!(terms.len(), idf.len());
        Self { terms, idf }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, col: usize) -> Option<&str> {
        self.terms.get_index(col).map(|t| &**t)
    }

    /// IDF weight of column `col`, 0.0 out of range
    #[inline]
    pub fn idf(&self, col: usize) -> f32 {
        self.idf.get(col).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.terms.iter().map(|t| &**t).zip(self.idf.iter().copied())
    }

    /// Term and weight lists agree in length
    pub(crate) fn is_consistent(&self) -> bool {
        self.terms.len() == self.idf.len()
    }
}
