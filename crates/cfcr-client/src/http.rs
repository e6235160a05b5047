//! Shared HTTP plumbing: client construction and status-code checks.
//!
//! Responses are checked once here (429 with `Retry-After`, other
//! non-success -> [`ClientError::Api`]) so the widget and account modules
//! stay focused on navigation. Nothing here retries.

use cfcr_config::HttpConfig;
use cfcr_parser::HtmlDocument;
use reqwest::Url;

use crate::error::ClientError;

/// Build the client shared by the widget fetch and the booking account.
///
/// The cookie store carries the login session and the remote cart.
///
/// # Errors
///
/// Returns [`ClientError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .cookie_store(true);
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** -> [`ClientError::RateLimited`], reading
///   `Retry-After` as seconds (60 s when absent or unparseable).
/// - **Non-success status** -> [`ClientError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// An HTML page together with the URL it was finally served from.
pub(crate) struct Page {
    pub url: Url,
    pub document: HtmlDocument,
}

impl Page {
    pub(crate) async fn read(resp: reqwest::Response) -> Result<Self, ClientError> {
        let resp = check_response(resp).await?;
        let url = resp.url().clone();
        let body = resp.text().await?;
        Ok(Self {
            url,
            document: HtmlDocument::parse(&body),
        })
    }

    /// Resolve a link found on this page.
    pub(crate) fn resolve(&self, href: &str) -> Result<Url, ClientError> {
        self.url
            .join(href)
            .map_err(|e| ClientError::invalid_url(href, e))
    }
}

/// Parse `raw` as a base URL that relative paths extend rather than replace.
pub(crate) fn base_url(raw: &str) -> Result<Url, ClientError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|e| ClientError::invalid_url(raw, e))
}
