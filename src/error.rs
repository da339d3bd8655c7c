use thiserror::Error;

/// Errors raised by the matching engine
///
/// Sub-scores never produce errors; they degrade to a neutral value. Only
/// structurally invalid input or an invalid trait model is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    /// Short machine-readable kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidInput(_) => "invalid_input",
            EngineError::NotFound(_) => "not_found",
            EngineError::Configuration(_) => "configuration_error",
        }
    }
}
