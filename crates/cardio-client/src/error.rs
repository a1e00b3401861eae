//! Error types for prediction requests.

use thiserror::Error;

/// Errors that can occur while requesting a prediction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PredictError {
    /// The predictor answered with a non-success status.
    #[error("Prediction request failed with status: {status}, message: {body}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The predictor answered 2xx but the body is not a prediction.
    #[error("Invalid response format from server")]
    Format {
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (DNS, connection, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The record could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl PredictError {
    /// Returns a user-friendly message suitable for an alert.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport { .. } => {
                "The prediction service rejected the request. Please check the values and try again."
            }
            Self::Format { .. } => {
                "The prediction service returned a malformed response. Please try again later."
            }
            Self::Network(_) => {
                "Could not reach the prediction service. Please check your connection."
            }
            Self::Encode(_) => "An unexpected error occurred.",
        }
    }

    /// Raw response body, when a response was received.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Transport { body, .. } | Self::Format { body } => Some(body),
            Self::Network(_) | Self::Encode(_) => None,
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for prediction requests.
pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let transport = PredictError::Transport {
            status: 500,
            body: "boom".to_string(),
        };
        let format = PredictError::Format {
            body: "not json".to_string(),
        };
        assert!(transport.user_message().contains("rejected"));
        assert!(format.user_message().contains("malformed"));
        assert_ne!(transport.user_message(), format.user_message());
    }

    #[test]
    fn test_display_and_raw_body() {
        let err = PredictError::Transport {
            status: 422,
            body: "{\"error\":\"bad\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Prediction request failed with status: 422, message: {\"error\":\"bad\"}"
        );
        assert_eq!(err.raw_body(), Some("{\"error\":\"bad\"}"));
        assert!(PredictError::Network("refused".to_string()).raw_body().is_none());
    }
}
