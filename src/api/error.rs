use dashboard_shared::codec::CodecError;
use thiserror::Error;

/// Errors returned by the fleet service clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Body error: {0}")]
    Codec(#[from] CodecError),
}
