use std::collections::{BTreeMap, HashSet};

use ndarray::Array2;

use super::Tokenizer;
use crate::TopicError;

/// Document-term count matrix with its alphabetical vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTermMatrix {
    pub vocabulary: Vec<String>,
    /// `documents × vocabulary` term counts.
    pub counts: Array2<usize>,
}

impl DocumentTermMatrix {
    pub fn n_documents(&self) -> usize {
        self.counts.nrows()
    }

    /// In-vocabulary token count of one document.
    pub fn document_length(&self, document: usize) -> usize {
        self.counts.row(document).sum()
    }
}

/// Bag-of-words vectorizer with document-frequency pruning.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f64,
    pub tokenizer: Tokenizer,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self {
            min_df: 20,
            max_df: 0.95,
            tokenizer: Tokenizer::english(),
        }
    }
}

impl CountVectorizer {
    pub fn new(min_df: usize, max_df: f64) -> Self {
        Self {
            min_df,
            max_df,
            ..Self::default()
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn fit_transform<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<DocumentTermMatrix, TopicError> {
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(TopicError::InvalidParameter {
                name: "max_df",
                reason: format!("must be in (0, 1], got {}", self.max_df),
            });
        }
        if documents.is_empty() {
            return Err(TopicError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenizer.tokenize(doc.as_ref()))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let max_count = self.max_df * documents.len() as f64;
        let vocabulary: Vec<String> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df && *df as f64 <= max_count)
            .map(|(term, _)| term.to_owned())
            .collect();
        if vocabulary.is_empty() {
            return Err(TopicError::EmptyVocabulary {
                min_df: self.min_df,
                max_df: self.max_df,
            });
        }

        let mut counts = Array2::<usize>::zeros((documents.len(), vocabulary.len()));
        for (doc, tokens) in tokenized.iter().enumerate() {
            for token in tokens {
                if let Ok(column) = vocabulary.binary_search(token) {
                    counts[[doc, column]] += 1;
                }
            }
        }

        Ok(DocumentTermMatrix { vocabulary, counts })
    }
}
