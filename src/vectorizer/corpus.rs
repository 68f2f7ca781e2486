use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// Document count and per-token document frequency over a whole catalog.
/// Base data for the IDF side of TF-IDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// documents added
    pub doc_num: u64,
    /// token -> number of documents containing it
    #[serde(with = "indexmap::map::serde_seq")]
    pub token_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's distinct tokens
    pub fn add_set<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for token in tokens {
            if let Some(count) = self.token_counts.get_mut(token.as_ref()) {
                *count += 1;
            } else {
                self.token_counts.insert(token.as_ref().into(), 1);
            }
        }
    }

    pub fn add_doc(&mut self, freq: &TokenFrequency) {
        self.add_set(&freq.token_set_ref_str());
    }

    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Documents containing `token`
    #[inline]
    pub fn get_token_count(&self, token: &str) -> u64 {
        self.token_counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.token_counts.len()
    }

    /// All tokens in lexicographic order
    pub fn sorted_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.token_counts.keys().map(|k| &**k).collect();
        tokens.sort_unstable();
        tokens
    }
}
