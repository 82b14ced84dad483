//! Analysis error types.

use thiserror::Error;
use vidinsight_models::GENERIC_FAILURE_REASON;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Gemini API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Gemini response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The most specific human-readable message for this failure.
    ///
    /// Service-side messages are returned verbatim; an error with no usable
    /// text yields [`GENERIC_FAILURE_REASON`].
    pub fn failure_reason(&self) -> String {
        let reason = match self {
            AnalysisError::Api { status, message } if message.trim().is_empty() => {
                format!("Gemini API returned {}", status)
            }
            AnalysisError::Api { message, .. } => message.clone(),
            AnalysisError::Transport(err) => err.to_string(),
            AnalysisError::Decode(msg) | AnalysisError::Config(msg) => msg.clone(),
        };

        if reason.trim().is_empty() {
            GENERIC_FAILURE_REASON.to_string()
        } else {
            reason
        }
    }
}
