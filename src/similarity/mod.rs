pub mod hits;

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vectorizer::matrix::TermMatrix;

/// Dense, symmetric item-by-item cosine similarity matrix (row-major).
///
/// Built from L2-normalized rows, so cosine similarity is the plain dot
/// product. The diagonal is 1.0 for items with at least one term and 0.0
/// for items with none; off-diagonal values never exceed 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    dim: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// All-pairs cosine similarity.
    ///
    /// Goes through a column -> (row, weight) reverse index so only
    /// term pairs that are both non-zero are multiplied. Only the upper
    /// triangle is computed (one rayon task per row) and then mirrored.
    pub fn from_term_matrix(terms: &TermMatrix) -> Self {
        let start = Instant::now();
        let n = terms.row_num();

        // reverse index: rows are pushed in order, so each posting list is sorted by row
        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); terms.col_num()];
        for (row_idx, row) in terms.rows().iter().enumerate() {
            for (col, w) in row.raw_iter() {
                postings[col].push((row_idx as u32, w));
            }
        }

        let upper: Vec<Vec<f32>> = terms
            .rows()
            .par_iter()
            .enumerate()
            .map_init(
                || vec![0_f32; n],
                |acc, (i, row)| {
                    for (col, wi) in row.raw_iter() {
                        let list = &postings[col];
                        // skip rows <= i
                        let from = list.partition_point(|&(r, _)| (r as usize) <= i);
                        for &(j, wj) in &list[from..] {
                            acc[j as usize] += wi * wj;
                        }
                    }
                    let diag = if row.nnz() > 0 { 1.0 } else { 0.0 };
                    let mut out = Vec::with_capacity(n - i);
                    out.push(diag);
                    for v in &mut acc[i + 1..] {
                        out.push(v.min(1.0));
                        *v = 0.0;
                    }
                    out
                },
            )
            .collect();

        let mut values = vec![0_f32; n * n];
        for (i, tail) in upper.into_iter().enumerate() {
            for (off, v) in tail.into_iter().enumerate() {
                let j = i + off;
                values[i * n + j] = v;
                values[j * n + i] = v;
            }
        }

        debug!("Similarity matrix {}x{} built in {:.2}ms", n, n, start.elapsed().as_secs_f64() * 1000.0);
        Self { dim: n, values }
    }

    /// Side length (number of items)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.dim {
            return None;
        }
        Some(&self.values[i * self.dim..(i + 1) * self.dim])
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.dim || j >= self.dim {
            return None;
        }
        Some(self.values[i * self.dim + j])
    }

    /// Value buffer matches the declared side length
    pub(crate) fn is_consistent(&self) -> bool {
        self.values.len() == self.dim * self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::CatalogItem, vectorizer::{tfidf::DefaultTFIDFEngine, TfIdfVectorizer}};

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "A").with_genres(&["rock", "blues"]).with_artists(&["Cream"]).with_album("Wheels"),
            CatalogItem::new("2", "B").with_genres(&["rock"]).with_artists(&["Cream"]).with_album("Disraeli"),
            CatalogItem::new("3", "C").with_genres(&["jazz"]).with_artists(&["Monk"]).with_album("Brilliant").with_explicit(true),
            CatalogItem::new("4", "D").with_genres(&["blues"]).with_artists(&["King"]).with_album("Live"),
        ]
    }

    fn build() -> (TermMatrix, SimilarityMatrix) {
        let (_, terms) = TfIdfVectorizer::<DefaultTFIDFEngine>::fit(&catalog()).unwrap();
        let sim = SimilarityMatrix::from_term_matrix(&terms);
        (terms, sim)
    }

    #[test]
    fn matches_direct_dot_products() {
        let (terms, sim) = build();
        for i in 0..4 {
            for j in 0..4 {
                if i == j {
                    continue;
                }
                let direct = terms.row(i).unwrap().dot(terms.row(j).unwrap()) as f32;
                assert!((sim.get(i, j).unwrap() - direct).abs() < 1e-5, "({i},{j})");
            }
        }
    }

    #[test]
    fn symmetric_with_dominant_diagonal() {
        let (_, sim) = build();
        assert_eq!(sim.dim(), 4);
        for i in 0..4 {
            let row = sim.row(i).unwrap();
            assert_eq!(row[i], 1.0);
            for j in 0..4 {
                assert_eq!(sim.get(i, j), sim.get(j, i));
                assert!(row[j] <= row[i]);
                assert!(row[j] >= 0.0);
            }
        }
        assert_eq!(sim.row(4), None);
    }

    #[test]
    fn zero_rows_have_zero_similarity() {
        let terms = TermMatrix::new(
            vec![crate::utils::math::vector::SpVec::new(2), crate::utils::math::vector::SpVec::new(2)],
            2,
        );
        let sim = SimilarityMatrix::from_term_matrix(&terms);
        assert_eq!(sim.row(0).unwrap(), &[0.0, 0.0]);
    }
}
