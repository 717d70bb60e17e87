use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-reported failure, sent by the itinerary service as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.error
    }
}

#[derive(Debug, Error)]
#[error("itinerary service error: {message}")]
pub struct ApiException {
    pub message: String,
}

impl ApiException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
