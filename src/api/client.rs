//! MediaWiki API HTTP client
//!
//! Issues the two read-only `action=query` requests the gallery needs:
//! - a generator search returning up to a page of thumbnails and intros
//! - a single-page lookup with a larger thumbnail and a longer extract
//!
//! No retries and no timeouts are configured; a failed call is reported once.

use thiserror::Error;

use super::response::ApiResponse;
use crate::query::ComposedTerm;

// =============================================================================
// Error Types
// =============================================================================

/// Gallery API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// Network error (connection failed, TLS, body read, etc.)
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("API error (status {status})")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Well-formed response without a page mapping
    #[error("No results found")]
    EmptyResult,
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        GalleryError::Transport(err.to_string())
    }
}

impl GalleryError {
    /// Message for a failed list search
    pub const FETCH_FAILED: &'static str = "Failed to fetch. Try again.";

    /// Message for a search that matched nothing
    pub const NO_RESULTS: &'static str = "No results found.";

    /// Whether this is a transport, status or parse failure
    pub fn is_network(&self) -> bool {
        !matches!(self, GalleryError::EmptyResult)
    }

    /// Text shown to the user in place of the result count
    pub fn user_message(&self) -> &'static str {
        if self.is_network() {
            Self::FETCH_FAILED
        } else {
            Self::NO_RESULTS
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Identifier of a wiki page
pub type PageId = u64;

/// Matches requested per search
pub const PAGE_SIZE: usize = 12;

/// Thumbnail edge for grid entries
pub const LIST_THUMB_SIZE: u32 = 600;

/// Character cap for grid excerpts
pub const LIST_EXCERPT_CHARS: u32 = 220;

/// Thumbnail edge for the detail view
pub const DETAIL_THUMB_SIZE: u32 = 1200;

/// Character cap for the detail excerpt
pub const DETAIL_EXCERPT_CHARS: u32 = 2000;

/// Query-string parameters for a list search
pub fn list_params(term: &ComposedTerm) -> Vec<(&'static str, String)> {
    vec![
        ("action", "query".to_string()),
        ("generator", "search".to_string()),
        ("gsrsearch", term.as_str().to_string()),
        ("gsrlimit", PAGE_SIZE.to_string()),
        ("prop", "pageimages|extracts".to_string()),
        ("piprop", "thumbnail".to_string()),
        ("pithumbsize", LIST_THUMB_SIZE.to_string()),
        ("exintro", "1".to_string()),
        ("explaintext", "1".to_string()),
        ("exchars", LIST_EXCERPT_CHARS.to_string()),
        ("format", "json".to_string()),
        ("origin", "*".to_string()),
    ]
}

/// Query-string parameters for a single-page detail lookup
pub fn detail_params(id: PageId) -> Vec<(&'static str, String)> {
    vec![
        ("action", "query".to_string()),
        ("pageids", id.to_string()),
        ("prop", "pageimages|extracts".to_string()),
        ("piprop", "thumbnail".to_string()),
        ("pithumbsize", DETAIL_THUMB_SIZE.to_string()),
        ("exlimit", "1".to_string()),
        ("explaintext", "1".to_string()),
        ("exchars", DETAIL_EXCERPT_CHARS.to_string()),
        ("format", "json".to_string()),
        ("origin", "*".to_string()),
    ]
}

// =============================================================================
// Wiki Client
// =============================================================================

/// MediaWiki API client
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiClient {
    /// English Wikipedia API endpoint
    pub const DEFAULT_ENDPOINT: &'static str = "https://en.wikipedia.org/w/api.php";

    /// Create a client for the default endpoint
    pub fn new() -> Self {
        Self::with_config(None, None)
    }

    /// Create client with custom endpoint and user agent
    pub fn with_config(endpoint: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.unwrap_or_else(|| Self::DEFAULT_ENDPOINT.to_string()),
            user_agent: user_agent.unwrap_or_else(default_user_agent),
        }
    }

    /// Run a generator search for `term`
    pub async fn search_pages(&self, term: &ComposedTerm) -> Result<ApiResponse, GalleryError> {
        tracing::debug!("search request: gsrsearch={:?}", term.as_str());
        self.get(&list_params(term)).await
    }

    /// Look up one page with the detail-sized image and extract
    pub async fn fetch_page(&self, id: PageId) -> Result<ApiResponse, GalleryError> {
        tracing::debug!("detail request: pageids={}", id);
        self.get(&detail_params(id)).await
    }

    async fn get(&self, params: &[(&'static str, String)]) -> Result<ApiResponse, GalleryError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GalleryError::Decode(e.to_string()))
    }

    /// Get endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the User-Agent sent with each request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// `freight-gallery/<version>`
pub fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}
