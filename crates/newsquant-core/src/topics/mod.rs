//! # Topic Modeling
//!
//! Headline topics from a bag-of-words LDA model.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`Tokenizer`] | lowercase word split, English stop words |
//! | [`CountVectorizer`] | document-term counts with `min_df` / `max_df` pruning |
//! | [`LdaModel`] | seeded collapsed Gibbs sampler, a [`TopicModel`] |
//! | [`extract_topic_words`] | top terms per topic |
//! | [`dominant_topics`] | most likely topic per headline |

mod lda;
mod tokenizer;
mod vectorizer;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::TopicError;

pub use lda::LdaModel;
pub use tokenizer::Tokenizer;
pub use vectorizer::{CountVectorizer, DocumentTermMatrix};

/// Fitted topic/word and document/topic probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicDistribution {
    /// `topics × vocabulary`, rows sum to 1.
    pub topic_word: Array2<f64>,
    /// `documents × topics`, rows sum to 1.
    pub doc_topic: Array2<f64>,
}

/// A topic model over a document-term matrix.
pub trait TopicModel {
    fn fit(&self, dtm: &DocumentTermMatrix) -> Result<TopicDistribution, TopicError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub index: usize,
    pub terms: Vec<TopicTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopic {
    pub document: usize,
    pub topic: usize,
    pub weight: f64,
}

/// The `n` heaviest terms of each topic; equal weights keep vocabulary order.
pub fn extract_topic_words(
    distribution: &TopicDistribution,
    vocabulary: &[String],
    n: usize,
) -> Vec<Topic> {
    distribution
        .topic_word
        .rows()
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let mut order: Vec<usize> = (0..row.len()).collect();
            order.sort_by(|a, b| row[*b].total_cmp(&row[*a]));
            Topic {
                index,
                terms: order
                    .into_iter()
                    .take(n)
                    .filter_map(|w| {
                        Some(TopicTerm {
                            term: vocabulary.get(w)?.clone(),
                            weight: row[w],
                        })
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Most probable topic of each document; ties go to the lower topic index.
pub fn dominant_topics(distribution: &TopicDistribution) -> Vec<DocumentTopic> {
    distribution
        .doc_topic
        .rows()
        .into_iter()
        .enumerate()
        .filter_map(|(document, row)| {
            let (topic, weight) = row
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (t, w)| match best {
                    Some((_, bw)) if bw >= *w => best,
                    _ => Some((t, *w)),
                })?;
            Some(DocumentTopic {
                document,
                topic,
                weight,
            })
        })
        .collect()
}

/// Parameters for a full headline topic run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    pub n_topics: usize,
    pub top_words: usize,
    pub min_df: usize,
    pub max_df: f64,
    pub iterations: usize,
    pub seed: u64,
    pub remove_stop_words: bool,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            n_topics: 5,
            top_words: 10,
            min_df: 20,
            max_df: 0.95,
            iterations: 200,
            seed: 42,
            remove_stop_words: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    pub documents: usize,
    pub vocabulary_size: usize,
    pub topics: Vec<Topic>,
    /// One entry per document that kept at least one vocabulary term.
    pub dominant: Vec<DocumentTopic>,
}

/// Vectorize, fit [`LdaModel`] and summarize.
pub fn topic_model_from_texts<S: AsRef<str>>(
    texts: &[S],
    config: &TopicConfig,
) -> Result<TopicReport, TopicError> {
    let tokenizer = if config.remove_stop_words {
        Tokenizer::english()
    } else {
        Tokenizer::plain()
    };
    let dtm = CountVectorizer::new(config.min_df, config.max_df)
        .with_tokenizer(tokenizer)
        .fit_transform(texts)?;

    let model = LdaModel {
        n_topics: config.n_topics,
        iterations: config.iterations,
        seed: config.seed,
        ..LdaModel::default()
    };
    let distribution = model.fit(&dtm)?;

    let dominant = dominant_topics(&distribution)
        .into_iter()
        .filter(|doc| dtm.document_length(doc.document) > 0)
        .collect();

    info!(
        documents = dtm.n_documents(),
        vocabulary = dtm.vocabulary.len(),
        topics = config.n_topics,
        "topic model fitted"
    );

    Ok(TopicReport {
        documents: dtm.n_documents(),
        vocabulary_size: dtm.vocabulary.len(),
        topics: extract_topic_words(&distribution, &dtm.vocabulary, config.top_words),
        dominant,
    })
}
