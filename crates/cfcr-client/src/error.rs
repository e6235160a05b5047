//! Client error types.

use thiserror::Error;

/// Errors raised while talking to the widget or the booking site.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote site returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The remote site returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },

    /// The widget envelope could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] cfcr_parser::ParseError),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Login form missing or credentials rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A single add-to-cart action failed.
    #[error("could not add '{signup}' to the cart: {reason}")]
    CartAction { signup: String, reason: String },

    /// The cart could not be committed.
    #[error("checkout failed: {0}")]
    Checkout(String),
}

impl ClientError {
    pub(crate) fn invalid_url(url: &str, error: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}
