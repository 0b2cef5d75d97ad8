//! Error types for talking to the character API

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} answered HTTP {status}")]
    Status { status: u16, url: String },
}

impl ApiError {
    /// The remote answers 404 when a filter/page combination has no results.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
