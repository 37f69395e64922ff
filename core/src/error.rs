//! Error types for the FAQ client and store.
//!
//! # Design
//! `ApiError` describes what went wrong on one request. `StoreError` is what
//! store operations return; it carries the normalized, human-readable message
//! that also lands in `FaqCollectionState::last_error`.
//!
//! Normalization prefers the backend's `message` field, then the transport
//! message, then a per-operation fallback.

use thiserror::Error;

pub const DUPLICATE_QUESTION: &str = "A FAQ with this question already exists";

/// Errors returned by `FaqClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound { body: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The `message` field of a JSON error body, if the backend sent one.
    pub fn backend_message(&self) -> Option<String> {
        let body = match self {
            ApiError::NotFound { body } | ApiError::Http { body, .. } => body,
            _ => return None,
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// Human-readable message: backend message, else transport message,
    /// else `fallback`.
    pub fn normalized(&self, fallback: &str) -> String {
        if let Some(message) = self.backend_message() {
            return message;
        }
        match self {
            ApiError::Transport(message) if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errors returned by `FaqStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already uses this question.
    #[error("{}", DUPLICATE_QUESTION)]
    Duplicate,

    /// The request failed; `message` is the normalized text.
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl StoreError {
    pub fn from_api(source: ApiError, fallback: &str) -> Self {
        StoreError::Api {
            message: source.normalized(fallback),
            source,
        }
    }

    /// The text recorded in `last_error`.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Api {
                source: ApiError::NotFound { .. },
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins() {
        let err = ApiError::Http {
            status: 409,
            body: r#"{"message":"Question taken"}"#.to_string(),
        };
        assert_eq!(err.normalized("Failed to add FAQ"), "Question taken");
    }

    #[test]
    fn transport_message_preserved_verbatim() {
        let err = ApiError::Transport("Network error".to_string());
        assert_eq!(err.normalized("Failed to fetch FAQs"), "Network error");
    }

    #[test]
    fn falls_back_when_nothing_useful() {
        let err = ApiError::Http {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.normalized("Failed to delete FAQ"), "Failed to delete FAQ");
        let err = ApiError::Transport(String::new());
        assert_eq!(err.normalized("Failed to delete FAQ"), "Failed to delete FAQ");
    }

    #[test]
    fn store_error_message_matches_display() {
        assert_eq!(StoreError::Duplicate.message(), DUPLICATE_QUESTION);
        let err = StoreError::from_api(
            ApiError::NotFound {
                body: r#"{"message":"FAQ not found"}"#.to_string(),
            },
            "Failed to fetch FAQ",
        );
        assert_eq!(err.message(), "FAQ not found");
        assert!(err.is_not_found());
    }
}
