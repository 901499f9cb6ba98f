use std::path::PathBuf;

use thiserror::Error;

/// Validation errors raised while constructing records or checking batches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("unparseable date '{value}'")]
    InvalidDate { value: String },
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },
    #[error("field '{field}' must be a non-negative whole number")]
    InvalidVolume { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("price series cannot be empty")]
    EmptySeries,
    #[error("row {index}: price {field} must be positive and finite (date {date})")]
    InvalidPrice {
        index: usize,
        date: String,
        field: &'static str,
    },
    #[error("row {index}: date {date} is not after previous date {previous}")]
    UnsortedDates {
        index: usize,
        previous: String,
        date: String,
    },
    #[error("row {index}: duplicate date {date}")]
    DuplicateDate { index: usize, date: String },

    #[error("command name cannot be empty")]
    EmptyCommand,
    #[error("schema version must look like v<major>.<minor>.<patch>: '{value}'")]
    InvalidSchemaVersion { value: String },
}

/// A window or join did not have enough rows to produce a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("insufficient data for {context}: required {required}, got {available}")]
pub struct InsufficientDataError {
    pub context: &'static str,
    pub required: usize,
    pub available: usize,
}

impl InsufficientDataError {
    pub fn new(context: &'static str, required: usize, available: usize) -> Self {
        Self {
            context,
            required,
            available,
        }
    }
}

/// Failures of the sentiment/return correlation step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CorrelationError {
    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),
    #[error("{series} is constant over the {sample_size} aligned dates; correlation is undefined")]
    ConstantSeries {
        series: &'static str,
        sample_size: usize,
    },
    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Failures of the headline topic model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopicError {
    #[error("corpus contains no documents")]
    EmptyCorpus,
    #[error("no terms remain after pruning (min_df={min_df}, max_df={max_df})")]
    EmptyVocabulary { min_df: usize, max_df: f64 },
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
