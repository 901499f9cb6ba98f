//! # Sentiment
//!
//! Headline polarity scoring behind the [`SentimentScorer`] trait.
//!
//! [`LexiconScorer`] is the bundled scorer: a finance-news word list with
//! intensifiers and negation handling. Any `Fn(&str) -> f64` closure is also a
//! scorer, which keeps the numeric stages testable with fixed scores.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Polarity in `[-1, 1]` and subjectivity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl SentimentScore {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: clamp_or_zero(polarity, -1.0, 1.0),
            subjectivity: clamp_or_zero(subjectivity, 0.0, 1.0),
        }
    }
}

fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        0.0
    }
}

/// Deterministic text → sentiment capability.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> SentimentScore;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> SentimentScore {
        SentimentScore::new(self(text), 0.0)
    }
}

/// Lexicon entry for one opinion word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

const NEGATION_DAMPING: f64 = -0.5;

const POSITIVE_WORDS: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("strong", 0.43, 0.73),
    ("stronger", 0.45, 0.7),
    ("beat", 0.4, 0.4),
    ("beats", 0.4, 0.4),
    ("surge", 0.6, 0.5),
    ("surges", 0.6, 0.5),
    ("soar", 0.7, 0.5),
    ("soars", 0.7, 0.5),
    ("jump", 0.4, 0.3),
    ("jumps", 0.4, 0.3),
    ("gain", 0.4, 0.3),
    ("gains", 0.4, 0.3),
    ("rally", 0.5, 0.4),
    ("rallies", 0.5, 0.4),
    ("rise", 0.3, 0.2),
    ("rises", 0.3, 0.2),
    ("record", 0.3, 0.3),
    ("upgrade", 0.5, 0.3),
    ("upgrades", 0.5, 0.3),
    ("upgraded", 0.5, 0.3),
    ("outperform", 0.5, 0.4),
    ("bullish", 0.6, 0.6),
    ("growth", 0.3, 0.2),
    ("profit", 0.4, 0.4),
    ("profitable", 0.45, 0.45),
    ("positive", 0.23, 0.55),
    ("optimistic", 0.5, 0.8),
    ("buy", 0.2, 0.2),
    ("higher", 0.25, 0.5),
    ("high", 0.16, 0.54),
    ("top", 0.5, 0.5),
    ("win", 0.5, 0.4),
    ("wins", 0.5, 0.4),
    ("success", 0.75, 0.95),
    ("successful", 0.75, 0.95),
    ("approval", 0.4, 0.3),
    ("approved", 0.4, 0.3),
    ("boost", 0.4, 0.3),
    ("boosts", 0.4, 0.3),
    ("recovery", 0.3, 0.3),
    ("recovers", 0.3, 0.3),
    ("exceeds", 0.4, 0.3),
];

const NEGATIVE_WORDS: &[(&str, f64, f64)] = &[
    ("bad", -0.7, 0.67),
    ("weak", -0.375, 0.625),
    ("weaker", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("miss", -0.4, 0.4),
    ("misses", -0.4, 0.4),
    ("fall", -0.3, 0.2),
    ("falls", -0.3, 0.2),
    ("drop", -0.3, 0.2),
    ("drops", -0.3, 0.2),
    ("plunge", -0.7, 0.5),
    ("plunges", -0.7, 0.5),
    ("slump", -0.6, 0.5),
    ("slumps", -0.6, 0.5),
    ("tumble", -0.6, 0.5),
    ("tumbles", -0.6, 0.5),
    ("decline", -0.3, 0.2),
    ("declines", -0.3, 0.2),
    ("loss", -0.4, 0.3),
    ("losses", -0.4, 0.3),
    ("lower", -0.2, 0.4),
    ("low", -0.15, 0.4),
    ("downgrade", -0.5, 0.3),
    ("downgrades", -0.5, 0.3),
    ("downgraded", -0.5, 0.3),
    ("underperform", -0.5, 0.4),
    ("bearish", -0.6, 0.6),
    ("sell", -0.2, 0.2),
    ("lawsuit", -0.4, 0.3),
    ("investigation", -0.3, 0.3),
    ("probe", -0.3, 0.3),
    ("fraud", -0.8, 0.7),
    ("recall", -0.3, 0.2),
    ("layoffs", -0.5, 0.4),
    ("cut", -0.3, 0.2),
    ("cuts", -0.3, 0.2),
    ("concern", -0.3, 0.5),
    ("concerns", -0.3, 0.5),
    ("risk", -0.2, 0.4),
    ("risks", -0.2, 0.4),
    ("warning", -0.4, 0.4),
    ("warns", -0.4, 0.4),
    ("crash", -0.8, 0.6),
    ("bankruptcy", -0.9, 0.5),
    ("negative", -0.3, 0.4),
    ("fears", -0.5, 0.6),
    ("volatile", -0.2, 0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("really", 1.2),
    ("sharply", 1.4),
    ("significantly", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.8),
    ("modestly", 0.7),
];

/// Tokens a negator reaches forward.
pub const NEGATION_WINDOW: usize = 3;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "without", "neither", "nor", "cannot",
];

/// Word-list sentiment scorer tuned for market headlines.
///
/// Polarity is the mean of the matched opinion words. An intensifier scales
/// the next opinion word; a negator flips and halves the next opinion word
/// within [`NEGATION_WINDOW`] tokens.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    entries: HashMap<String, LexiconEntry>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        let entries = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|(word, polarity, subjectivity)| {
                (
                    (*word).to_owned(),
                    LexiconEntry {
                        polarity: *polarity,
                        subjectivity: *subjectivity,
                    },
                )
            })
            .collect();

        Self {
            entries,
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(word, factor)| ((*word).to_owned(), *factor))
                .collect(),
            negations: NEGATIONS.iter().map(|word| (*word).to_owned()).collect(),
        }
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an opinion word.
    pub fn with_entry(mut self, word: &str, polarity: f64, subjectivity: f64) -> Self {
        self.entries.insert(
            word.to_lowercase(),
            LexiconEntry {
                polarity,
                subjectivity,
            },
        );
        self
    }

    pub fn entry(&self, word: &str) -> Option<LexiconEntry> {
        self.entries.get(word).copied()
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;
        let mut modifier = 1.0;
        let mut negation_left = 0usize;

        for token in tokenize(text) {
            if self.is_negation(&token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(&token) {
                modifier = *factor;
                continue;
            }

            let word = token.replace('\'', "");
            if let Some(entry) = self.entries.get(&word) {
                let mut polarity = entry.polarity * modifier;
                if negation_left > 0 {
                    polarity *= NEGATION_DAMPING;
                    negation_left = 0;
                }
                polarity_sum += polarity;
                subjectivity_sum += entry.subjectivity;
                matched += 1;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            modifier = 1.0;
        }

        if matched == 0 {
            return SentimentScore::default();
        }
        SentimentScore::new(
            polarity_sum / matched as f64,
            subjectivity_sum / matched as f64,
        )
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
        .map(|token| token.trim_matches('\'').to_lowercase())
        .filter(|token| !token.is_empty())
}
