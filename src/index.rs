use std::time::Instant;

use tracing::{debug, info};

use crate::{
    catalog::CatalogItem,
    error::{Error, Result},
    similarity::{hits::{HitEntry, Hits}, SimilarityMatrix},
    vectorizer::{matrix::TermMatrix, tfidf::DefaultTFIDFEngine, vocabulary::Vocabulary, TfIdfVectorizer},
};

/// Number of recommendations when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 5;

/// Everything built from one catalog snapshot.
///
/// Items, term matrix rows and similarity rows share one ordering.
/// Immutable once built; a refresh builds a new `Index`.
#[derive(Debug, Clone)]
pub struct Index {
    items: Vec<CatalogItem>,
    vocabulary: Vocabulary,
    terms: TermMatrix,
    similarity: SimilarityMatrix,
}

impl Index {
    /// Vectorize the catalog and compute all pairwise similarities.
    pub fn build(items: Vec<CatalogItem>) -> Result<Self> {
        let start = Instant::now();
        let (vectorizer, terms) = TfIdfVectorizer::<DefaultTFIDFEngine>::fit(&items)?;
        let similarity = SimilarityMatrix::from_term_matrix(&terms);
        let index = Self { items, vocabulary: vectorizer.into_vocabulary(), terms, similarity };
        info!(
            "Index built: items={} vocab={} nnz={} in {:.2}ms",
            index.len(),
            index.vocabulary.len(),
            index.terms.nnz(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(index)
    }

    /// Reassemble an index from stored parts, checking that they fit together.
    pub fn from_parts(
        items: Vec<CatalogItem>,
        vocabulary: Vocabulary,
        terms: TermMatrix,
        similarity: SimilarityMatrix,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if !vocabulary.is_consistent() {
            return Err(Error::Artifact("vocabulary terms and weights differ in length".into()));
        }
        if terms.row_num() != items.len() || terms.col_num() != vocabulary.len() || !terms.is_consistent() {
            return Err(Error::Artifact(format!(
                "term matrix is {}x{}, expected {}x{}",
                terms.row_num(),
                terms.col_num(),
                items.len(),
                vocabulary.len()
            )));
        }
        if similarity.dim() != items.len() || !similarity.is_consistent() {
            return Err(Error::Artifact(format!(
                "similarity matrix dimension {} does not match {} items",
                similarity.dim(),
                items.len()
            )));
        }
        Ok(Self { items, vocabulary, terms, similarity })
    }

    /// Row of the first item whose name equals `name`, ignoring case
    pub fn resolve(&self, name: &str) -> Option<usize> {
        let lowered = name.to_lowercase();
        self.items.iter().position(|item| item.name_matches(&lowered))
    }

    /// Up to `top_n` items most similar to the item named `name`.
    ///
    /// The query item itself is excluded by row, never by score. Ties keep
    /// catalog order. `top_n == 0` or a one-item catalog gives an empty result.
    pub fn recommend(&self, name: &str, top_n: usize) -> Result<Hits<'_>> {
        let row_idx = self.resolve(name).ok_or_else(|| Error::ItemNotFound(name.to_string()))?;
        let row = self
            .similarity
            .row(row_idx)
            .ok_or_else(|| Error::Artifact(format!("similarity row {row_idx} missing")))?;

        let mut hits = Hits::new(
            row.iter()
                .enumerate()
                .filter(|&(j, _)| j != row_idx)
                .map(|(j, &score)| HitEntry { item: &self.items[j], score })
                .collect(),
        );
        hits.sort_by_score_desc().truncate(top_n);
        debug!("recommend {:?} -> row {}, {} hits", name, row_idx, hits.len());
        Ok(hits)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn term_matrix(&self) -> &TermMatrix {
        &self.terms
    }

    pub fn similarity_matrix(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Vectorizer over this index's vocabulary
    pub fn vectorizer(&self) -> TfIdfVectorizer<DefaultTFIDFEngine> {
        TfIdfVectorizer::from_vocabulary(self.vocabulary.clone())
    }
}

/// Build an index from an ordered catalog.
/// Fails with `EmptyCatalog` on an empty catalog.
pub fn build_index(catalog: Vec<CatalogItem>) -> Result<Index> {
    Index::build(catalog)
}

/// Items most similar to the one named `query_name`, best first.
/// Fails with `ItemNotFound` when no item has that name.
pub fn recommend<'a>(index: &'a Index, query_name: &str, top_n: usize) -> Result<Hits<'a>> {
    index.recommend(query_name, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, name: &str, genre: &str, artist: &str, album: &str) -> CatalogItem {
        CatalogItem::new(id, name).with_genres(&[genre]).with_artists(&[artist]).with_album(album)
    }

    #[test]
    fn resolve_is_case_insensitive_first_match() {
        let index = build_index(vec![
            song("1", "Dup", "rock", "Ann", "One"),
            song("2", "dup", "jazz", "Bob", "Two"),
            song("3", "Other", "rock", "Cid", "Three"),
        ])
        .unwrap();
        assert_eq!(index.resolve("DUP"), Some(0));
        assert_eq!(index.resolve("other"), Some(2));
        assert_eq!(index.resolve("Othe"), None);
    }

    #[test]
    fn query_item_is_excluded_even_on_exact_duplicate() {
        let index = build_index(vec![
            song("1", "First", "rock", "Ann", "Same"),
            song("2", "Twin", "rock", "Ann", "Same"),
        ])
        .unwrap();
        let hits = index.recommend("First", 5).unwrap();
        assert_eq!(hits.names(), vec!["Twin"]);
        assert!((hits.list[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn top_n_zero_is_empty_not_error() {
        let index = build_index(vec![song("1", "A", "rock", "Ann", "X1"), song("2", "B", "pop", "Bob", "X2")]).unwrap();
        assert!(index.recommend("A", 0).unwrap().is_empty());
    }

    #[test]
    fn ties_keep_catalog_order() {
        let index = build_index(vec![
            song("1", "Query", "rock", "Ann", "Alpha"),
            song("2", "Far1", "jazz", "Bob", "Beta"),
            song("3", "Far2", "folk", "Cid", "Gamma"),
            song("4", "Far3", "soul", "Dee", "Delta"),
        ])
        .unwrap();
        // only the shared "false" term links them, all scores equal
        let hits = index.recommend("Query", 3).unwrap();
        assert_eq!(hits.names(), vec!["Far1", "Far2", "Far3"]);
    }

    #[test]
    fn from_parts_rejects_mismatched_shapes() {
        let a = build_index(vec![song("1", "A", "rock", "Ann", "X1"), song("2", "B", "pop", "Bob", "X2")]).unwrap();
        let b = build_index(vec![song("1", "A", "rock", "Ann", "X1")]).unwrap();
        let res = Index::from_parts(
            a.items().to_vec(),
            a.vocabulary().clone(),
            a.term_matrix().clone(),
            b.similarity_matrix().clone(),
        );
        assert!(matches!(res, Err(Error::Artifact(_))));

        let ok = Index::from_parts(
            a.items().to_vec(),
            a.vocabulary().clone(),
            a.term_matrix().clone(),
            a.similarity_matrix().clone(),
        );
        assert!(ok.is_ok());
    }
}
