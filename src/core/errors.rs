use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A single day's parameters are out of range or unparseable. The day is
    /// skipped and the run continues.
    #[error("invalid input on day {day}: {reason}")]
    InvalidInput { day: String, reason: String },

    /// The input source cannot be read at all. Fatal to the run.
    #[error("input source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to write report: {0}")]
    Output(String),

    /// Run or generator settings cannot be used. Raised before any day runs.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SimError {
    pub fn invalid(day: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::InvalidInput {
            day: day.into(),
            reason: reason.into(),
        }
    }

    /// Whether the driver may skip this error and move on to the next day
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SimError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::invalid("2023-01-02", "cycle time must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid input on day 2023-01-02: cycle time must be greater than zero"
        );
        assert!(err.is_recoverable());

        let err = SimError::SourceUnavailable("missing.csv".to_string());
        assert_eq!(err.to_string(), "input source unavailable: missing.csv");
        assert!(!err.is_recoverable());

        let err = SimError::Config("Poisson mean must be positive".to_string());
        assert_eq!(err.to_string(), "invalid configuration: Poisson mean must be positive");
        assert!(!err.is_recoverable());
    }
}
