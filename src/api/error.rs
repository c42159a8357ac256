use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a call to the portfolio API.
///
/// Errors travel inside UI messages, so they are `Clone` and keep
/// only a description of the underlying transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("not authorized (status {0})")]
    Unauthorized(u16),
    #[error("not found")]
    NotFound,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not read upload: {0}")]
    Upload(String),
}

impl ApiError {
    /// Classify a non-success status
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Unauthorized(status.as_u16())
            }
            StatusCode::NOT_FOUND => ApiError::NotFound,
            other => ApiError::Status(other.as_u16()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status)
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
