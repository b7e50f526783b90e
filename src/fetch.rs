//! Fetching pages over HTTP.
//!
//! Requests are blocking and unauthenticated. Each call fetches a fresh copy
//! of the page; nothing is cached between calls.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::{HtmlParser, ParseOptions};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("unwiki/", env!("CARGO_PKG_VERSION"));

/// Options for fetching a page.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// User-Agent header value
    pub user_agent: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl FetchOptions {
    /// Create new fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Drop everything from the first `#` onward.
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    }
}

/// Check that a URL is an absolute http(s) URL, fragment removed.
pub fn validate_url(url: &str) -> Result<Url> {
    let trimmed = strip_fragment(url.trim());
    let parsed = Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}

/// Fetch a page's raw bytes.
pub fn fetch_html(url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    let url = validate_url(url)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()?;

    log::debug!("GET {}", url);
    let response = client.get(url.as_str()).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    log::info!("Fetched {} ({})", url, status);

    Ok(response.bytes()?.to_vec())
}

/// Fetch and parse a page.
pub fn fetch_document(
    url: &str,
    parse_options: ParseOptions,
    fetch_options: &FetchOptions,
) -> Result<Document> {
    let bytes = fetch_html(url, fetch_options)?;
    let parser = HtmlParser::from_bytes_with_options(&bytes, parse_options)?
        .with_origin(strip_fragment(url.trim()));
    Ok(parser.parse())
}
