use newsquant_core::{CoreError, CorrelationError, TopicError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("strict mode failed: {warning_count} warning(s)")]
    StrictModeViolation { warning_count: usize },
}

impl From<ValidationError> for CliError {
    fn from(error: ValidationError) -> Self {
        Self::Core(error.into())
    }
}

impl From<CorrelationError> for CliError {
    fn from(error: CorrelationError) -> Self {
        Self::Core(error.into())
    }
}

impl From<TopicError> for CliError {
    fn from(error: TopicError) -> Self {
        Self::Core(error.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Core(error.into())
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(core) => match core {
                CoreError::Validation(_)
                | CoreError::Config { .. }
                | CoreError::Topic(TopicError::InvalidParameter { .. }) => 2,
                CoreError::Correlation(_)
                | CoreError::Topic(_) => 3,
                CoreError::Serialization(_) => 4,
                CoreError::Io { .. } | CoreError::Csv { .. } => 10,
            },
            Self::StrictModeViolation { .. } => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsquant_core::InsufficientDataError;

    #[test]
    fn exit_codes_follow_error_category() {
        assert_eq!(CliError::from(ValidationError::EmptySeries).exit_code(), 2);
        assert_eq!(
            CliError::from(CorrelationError::from(InsufficientDataError::new("join", 2, 0)))
                .exit_code(),
            3
        );
        assert_eq!(
            CliError::from(TopicError::EmptyVocabulary {
                min_df: 20,
                max_df: 0.95
            })
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::StrictModeViolation { warning_count: 1 }.exit_code(),
            5
        );
        let missing = CoreError::Io {
            path: "prices.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(CliError::from(missing).exit_code(), 10);
    }

    #[test]
    fn serialization_errors_exit_with_four() {
        let err = serde_json::from_str::<u32>("nope").expect_err("invalid json");
        assert_eq!(CliError::from(err).exit_code(), 4);
    }
}
