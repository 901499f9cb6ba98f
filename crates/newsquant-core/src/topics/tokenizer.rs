use std::collections::HashSet;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "also", "am", "among",
    "an", "and", "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "else", "ever", "every", "few", "for", "from", "further", "get",
    "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "however", "if", "in", "into", "is", "it", "its", "itself", "just", "least",
    "less", "may", "me", "might", "more", "most", "much", "must", "my", "myself", "neither",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "per", "rather", "same", "she", "should", "since", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "though", "through", "thus", "to", "too",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "were", "what", "when",
    "where", "whether", "which", "while", "who", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Lowercasing word splitter for headline topic modeling.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_len: usize,
    stop_words: HashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Tokenizer {
    /// English stop words removed.
    pub fn english() -> Self {
        Self {
            min_len: 2,
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Keeps stop words.
    pub fn plain() -> Self {
        Self {
            min_len: 2,
            stop_words: HashSet::new(),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|ch: char| !ch.is_alphanumeric())
            .filter(|token| token.chars().count() >= self.min_len)
            .filter(|token| !token.chars().all(|ch| ch.is_numeric()))
            .map(str::to_lowercase)
            .filter(|token| !self.stop_words.contains(token.as_str()))
            .collect()
    }
}
