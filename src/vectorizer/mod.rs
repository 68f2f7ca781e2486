pub mod corpus;
pub mod matrix;
pub mod tfidf;
pub mod token;
pub mod tokenizer;
pub mod vocabulary;

use std::time::Instant;

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    catalog::CatalogItem,
    error::{Error, Result},
    utils::math::vector::SpVec,
    vectorizer::{corpus::Corpus, matrix::TermMatrix, tfidf::{DefaultTFIDFEngine, TFIDFEngine}, token::TokenFrequency, vocabulary::Vocabulary},
};

/// TF-IDF Vectorizer
///
/// Fitted once on a whole catalog. Holds the vocabulary (term columns and
/// IDF weights) and turns text into L2-normalized sparse rows.
///
/// `E` selects the weighting engine, `DefaultTFIDFEngine` by default.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    vocabulary: Vocabulary,
    _marker: std::marker::PhantomData<E>,
}

impl<E> TfIdfVectorizer<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Fit on the catalog and vectorize every item.
    ///
    /// Rows of the returned matrix follow catalog order.
    /// Fails with `EmptyCatalog` when there are no items.
    pub fn fit(items: &[CatalogItem]) -> Result<(Self, TermMatrix)> {
        if items.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let start = Instant::now();

        let freqs: Vec<TokenFrequency> = items
            .par_iter()
            .map(|item| TokenFrequency::from_text(&item.content()))
            .collect();

        let mut corpus = Corpus::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }

        let terms = corpus.sorted_tokens();
        let idf = E::idf_vec(&corpus, &terms);
        let terms: IndexSet<Box<str>> = terms.into_iter().map(Box::from).collect();
        let vocabulary = Vocabulary::new(terms, idf);
        if vocabulary.is_empty() {
            warn!("Vocabulary is empty, every item text was stop words or too short");
        }

        let rows: Vec<SpVec<f32>> = freqs
            .par_iter()
            .map(|freq| E::tfidf_vec(freq, &vocabulary))
            .collect();
        let matrix = TermMatrix::new(rows, vocabulary.len());

        debug!(
            "Vectorized {} items: vocab={} nnz={} in {:.2}ms",
            matrix.row_num(),
            vocabulary.len(),
            matrix.nnz(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok((Self::from_vocabulary(vocabulary), matrix))
    }
}

impl<E> TfIdfVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Rebuild from a previously fitted vocabulary
    pub fn from_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary, _marker: std::marker::PhantomData }
    }

    /// Vectorize arbitrary text against the fitted vocabulary.
    /// Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SpVec<f32> {
        E::tfidf_vec(&TokenFrequency::from_text(text), &self.vocabulary)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }
}
