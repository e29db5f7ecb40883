//! Generation error types.

/// Why a generation did not produce a scenario.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The user input was missing or empty. No upstream call was made.
    #[error("invalid input: description must be a non-empty string")]
    InvalidInput,

    /// The provider call itself failed (network, auth, rate limit, provider error).
    #[error("upstream failure: {reason}")]
    UpstreamFailure { reason: String },

    /// The provider answered, but not with a valid scenario.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl GenerationError {
    /// Short machine-readable category, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::InvalidInput => "invalid_input",
            GenerationError::UpstreamFailure { .. } => "upstream_failure",
            GenerationError::MalformedResponse { .. } => "malformed_response",
        }
    }
}
