use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timeout for URL: {0}")]
    RequestTimeout(String),

    #[error("HTTP error {status} for URL: {url}")]
    HttpError { status: u16, url: String },

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("No valid content ID found in: {0}")]
    InvalidReference(String),

    #[error("Unsupported site: {0}")]
    UnsupportedSite(String),

    #[error("Content not found or unavailable")]
    ContentUnavailable { id: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

impl MediaError {
    /// HTTP status reported to the caller for this error
    pub fn status(&self) -> StatusCode {
        match self {
            MediaError::InvalidUrl(_)
            | MediaError::InvalidReference(_)
            | MediaError::UnsupportedSite(_) => StatusCode::BAD_REQUEST,
            MediaError::ContentUnavailable { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to a caller. Internal faults stay generic.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Content id to echo back, if the failure is tied to one
    pub fn content_id(&self) -> Option<&str> {
        match self {
            MediaError::ContentUnavailable { id } => Some(id),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MediaError>;
