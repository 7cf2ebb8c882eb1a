use pricedb_core::CanonicalField;
use thiserror::Error;

use crate::decode::DecodeAttempt;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unrecognized catalog filename format: {filename}")]
    UnrecognizedFormat { filename: String },

    #[error("no candidate encoding could decode {url}: {}", summarize_attempts(.attempts))]
    Decode {
        url: String,
        attempts: Vec<DecodeAttempt>,
    },

    #[error("missing required column \"{column}\" for {field}")]
    MissingRequiredField {
        column: String,
        field: CanonicalField,
    },

    #[error("no products could be normalized from {url}")]
    NoProducts { url: String },
}

fn summarize_attempts(attempts: &[DecodeAttempt]) -> String {
    if attempts.is_empty() {
        return "no encodings configured".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
