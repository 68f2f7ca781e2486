use crate::{utils::math::vector::SpVec, vectorizer::{corpus::Corpus, token::TokenFrequency, vocabulary::Vocabulary}};

/// Weighting strategy used by `TfIdfVectorizer`.
///
/// Implement `tf` and `idf`; the vector builders come for free.
pub trait TFIDFEngine {
    /// Weight of a token occurring `count` times in a document of `token_sum` tokens
    fn tf(count: u32, token_sum: u64) -> f32;
    /// Weight of a token found in `doc_freq` of `doc_num` documents
    fn idf(doc_num: u64, doc_freq: u64) -> f32;

    /// IDF weight per vocabulary column
    fn idf_vec(corpus: &Corpus, terms: &[&str]) -> Vec<f32> {
        let doc_num = corpus.get_doc_num();
        terms
            .iter()
            .map(|t| Self::idf(doc_num, corpus.get_token_count(t)))
            .collect()
    }

    /// L2-normalized TF-IDF row for one document.
    /// Tokens outside the vocabulary are ignored.
    fn tfidf_vec(freq: &TokenFrequency, vocab: &Vocabulary) -> SpVec<f32> {
        let token_sum = freq.token_sum();
        let mut inds = Vec::with_capacity(freq.token_num());
        let mut vals = Vec::with_capacity(freq.token_num());
        for (token, count) in freq.iter() {
            if let Some(col) = vocab.index_of(token) {
                inds.push(col as u32);
                vals.push(Self::tf(count, token_sum) * vocab.idf(col));
            }
        }
        let mut row = SpVec::from_unsorted(vocab.len(), inds, vals);
        row.l2_normalize();
        row
    }
}

/// Textbook TF-IDF.
/// - tf: raw count
/// - idf: ln((1 + N) / (1 + df)) + 1 (smoothed, never zero)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(count: u32, _token_sum: u64) -> f32 {
        count as f32
    }

    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f32 {
        (((1 + doc_num) as f64 / (1 + doc_freq) as f64).ln() + 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothed_idf_values() {
        // term in every document -> 1.0
        assert!((DefaultTFIDFEngine::idf(3, 3) - 1.0).abs() < 1e-6);
        // ln(4/2) + 1
        assert!((DefaultTFIDFEngine::idf(3, 1) - (2.0f32.ln() + 1.0)).abs() < 1e-6);
        // rarer term weighs more
        assert!(DefaultTFIDFEngine::idf(10, 1) > DefaultTFIDFEngine::idf(10, 5));
    }

    #[test]
    fn tf_is_raw_count() {
        assert_eq!(DefaultTFIDFEngine::tf(3, 10), 3.0);
    }
}
