use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the analysis service attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// A non-2xx response from the analysis service, with the decoded error body
/// when one was present.
#[derive(Debug, Clone, Error)]
#[error("service returned {status}: {message}")]
pub struct ServiceError {
    pub status: u16,
    pub message: String,
}

impl ServiceError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
