use thiserror::Error;

/// Errors raised at the input boundary.
///
/// The pricing engine itself never fails; everything here comes from
/// loading, validating or rendering a scenario.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// A form field is outside its allowed range or not a finite number
    #[error("Invalid value for {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Currency code not in the lookup table
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Commitment term other than 1, 2, 3 or 5 years
    #[error("Invalid commitment term: {0} years (expected 1, 2, 3 or 5)")]
    InvalidCommitment(u32),

    /// Scenario file or environment could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Report or scenario could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimulatorError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SimulatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {}", err))
    }
}

impl From<toml::ser::Error> for SimulatorError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(format!("TOML error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SimulatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SimulatorError::invalid("project.sprints", "must be between 1 and 50");
        assert_eq!(
            error.to_string(),
            "Invalid value for project.sprints: must be between 1 and 50"
        );
    }

    #[test]
    fn test_invalid_commitment_display() {
        let error = SimulatorError::InvalidCommitment(4);
        assert!(error.to_string().contains("4 years"));
    }
}
