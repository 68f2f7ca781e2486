use serde::{Deserialize, Serialize};

use crate::utils::math::vector::SpVec;

/// Sparse item-by-term matrix of L2-normalized TF-IDF weights.
/// Row `i` belongs to catalog item `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermMatrix {
    rows: Vec<SpVec<f32>>,
    cols: usize,
}

impl TermMatrix {
    pub(crate) fn new(rows: Vec<SpVec<f32>>, cols: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == cols));
        Self { rows, cols }
    }

    #[inline]
    pub fn row_num(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn col_num(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&SpVec<f32>> {
        self.rows.get(i)
    }

    #[inline]
    pub fn rows(&self) -> &[SpVec<f32>] {
        &self.rows
    }

    /// Stored entries across all rows
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SpVec::nnz).sum()
    }

    /// Every row has the declared column count
    pub(crate) fn is_consistent(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.cols)
    }
}
