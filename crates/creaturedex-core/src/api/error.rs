//! Failures while fetching the catalog. Every variant sends the fetcher
//! to its cache fallback; the distinction only matters for logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of a response body carried into an error.
const BODY_SNIPPET_LIMIT: usize = 500;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Catalog not published at this URL ({0})")]
    CatalogMissing(String),

    #[error("Catalog host is rate limiting requests")]
    RateLimited,

    #[error("Catalog host failed with {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Unexpected catalog response {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Could not reach catalog: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog body is not a creature list: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Offline: {0}")]
    Offline(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = snippet(body);
        if status == StatusCode::NOT_FOUND {
            ApiError::CatalogMissing(body)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimited
        } else if status.is_server_error() {
            ApiError::Upstream { status, body }
        } else {
            ApiError::UnexpectedStatus { status, body }
        }
    }
}

/// Keep error messages readable when the host answers with a full HTML page.
fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.len() <= BODY_SNIPPET_LIMIT {
        return body.to_string();
    }
    let cut = body
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= BODY_SNIPPET_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... ({} bytes)", &body[..cut], body.len())
}
