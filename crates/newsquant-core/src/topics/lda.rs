use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DocumentTermMatrix, TopicDistribution, TopicModel};
use crate::TopicError;

/// Latent Dirichlet Allocation fitted by collapsed Gibbs sampling.
///
/// `alpha` and `beta` default to `1 / n_topics`. A fixed `seed` makes the
/// fit reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdaModel {
    pub n_topics: usize,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LdaModel {
    fn default() -> Self {
        Self {
            n_topics: 5,
            alpha: None,
            beta: None,
            iterations: 200,
            seed: 42,
        }
    }
}

impl LdaModel {
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    fn priors(&self) -> Result<(f64, f64), TopicError> {
        if self.n_topics == 0 {
            return Err(TopicError::InvalidParameter {
                name: "n_topics",
                reason: "must be at least 1".to_owned(),
            });
        }
        let default = 1.0 / self.n_topics as f64;
        let alpha = self.alpha.unwrap_or(default);
        let beta = self.beta.unwrap_or(default);
        for (name, value) in [("alpha", alpha), ("beta", beta)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TopicError::InvalidParameter {
                    name,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        Ok((alpha, beta))
    }
}

struct Token {
    document: usize,
    word: usize,
}

impl TopicModel for LdaModel {
    fn fit(&self, dtm: &DocumentTermMatrix) -> Result<TopicDistribution, TopicError> {
        let (alpha, beta) = self.priors()?;
        let k = self.n_topics;
        let (n_docs, n_words) = dtm.counts.dim();
        if n_docs == 0 {
            return Err(TopicError::EmptyCorpus);
        }

        let tokens: Vec<Token> = dtm
            .counts
            .indexed_iter()
            .flat_map(|((document, word), count)| {
                std::iter::repeat_with(move || Token { document, word }).take(*count)
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut doc_topic = Array2::<usize>::zeros((n_docs, k));
        let mut topic_word = Array2::<usize>::zeros((k, n_words));
        let mut topic_total = Array1::<usize>::zeros(k);
        let mut assignment: Vec<usize> = Vec::with_capacity(tokens.len());

        for token in &tokens {
            let topic = rng.gen_range(0..k);
            doc_topic[[token.document, topic]] += 1;
            topic_word[[topic, token.word]] += 1;
            topic_total[topic] += 1;
            assignment.push(topic);
        }

        let beta_sum = beta * n_words as f64;
        let mut weights = vec![0.0; k];
        for _ in 0..self.iterations {
            for (token, topic) in tokens.iter().zip(assignment.iter_mut()) {
                doc_topic[[token.document, *topic]] -= 1;
                topic_word[[*topic, token.word]] -= 1;
                topic_total[*topic] -= 1;

                let mut total = 0.0;
                for (t, weight) in weights.iter_mut().enumerate() {
                    total += (doc_topic[[token.document, t]] as f64 + alpha)
                        * (topic_word[[t, token.word]] as f64 + beta)
                        / (topic_total[t] as f64 + beta_sum);
                    *weight = total;
                }

                let draw = rng.gen::<f64>() * total;
                *topic = weights.iter().position(|w| draw < *w).unwrap_or(k - 1);

                doc_topic[[token.document, *topic]] += 1;
                topic_word[[*topic, token.word]] += 1;
                topic_total[*topic] += 1;
            }
        }

        debug!(
            documents = n_docs,
            vocabulary = n_words,
            tokens = tokens.len(),
            topics = k,
            iterations = self.iterations,
            "fitted lda"
        );

        let topic_word = Array2::from_shape_fn((k, n_words), |(t, w)| {
            (topic_word[[t, w]] as f64 + beta) / (topic_total[t] as f64 + beta_sum)
        });
        let alpha_sum = alpha * k as f64;
        let doc_topic = Array2::from_shape_fn((n_docs, k), |(d, t)| {
            (doc_topic[[d, t]] as f64 + alpha) / (dtm.document_length(d) as f64 + alpha_sum)
        });

        Ok(TopicDistribution {
            topic_word,
            doc_topic,
        })
    }
}
