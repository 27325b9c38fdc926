use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the catalog service on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    #[serde(alias = "error")]
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts a message from a raw response body, if it is a JSON error body.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|err| !err.message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_message_or_error_field() {
        assert_eq!(
            ApiError::from_body(r#"{"message":"lesson not found"}"#)
                .expect("message body")
                .message,
            "lesson not found"
        );
        assert_eq!(
            ApiError::from_body(r#"{"error":"bad id"}"#)
                .expect("error body")
                .message,
            "bad id"
        );
    }

    #[test]
    fn ignores_non_json_and_blank_bodies() {
        assert!(ApiError::from_body("<html>502</html>").is_none());
        assert!(ApiError::from_body(r#"{"message":"  "}"#).is_none());
    }
}
