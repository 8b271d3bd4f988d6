//! Crate-wide error hierarchy for changed-lines.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ChangedLinesResult<T> = Result<T, ChangedLinesError>;

/// Root error type for the changed-lines crate.
#[derive(Debug, Error)]
pub enum ChangedLinesError {
    /// Source-control host failure while listing pull request files.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Unified diff parsing failure.
    #[error(transparent)]
    DiffParse(#[from] DiffParseError),

    /// Configuration problems (missing token, bad base URL, bad repo slug).
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Provider-specific error used inside the retrieval layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403) with quota left.
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429, or 403 with an exhausted quota).
    #[error("rate limited")]
    RateLimited {
        /// Optional `Retry-After` hint in seconds when available.
        retry_after_secs: Option<u64>,
    },

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Unified diff parser errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffParseError {
    /// Hunk header had no destination range or its numbers did not parse.
    #[error("invalid hunk header in {file}: {header:?}")]
    InvalidHunkHeader {
        /// File whose patch contained the header.
        file: String,
        /// The offending header line, verbatim.
        header: String,
    },

    /// Line number arithmetic left the `u32` range.
    #[error("line number overflow in {file}")]
    Overflow { file: String },
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required provider access token.
    #[error("missing provider token")]
    MissingToken,

    /// Invalid base API URL.
    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),

    /// Repository slug was not `owner/repo`.
    #[error("invalid repository '{0}', expected 'owner/repo'")]
    InvalidRepository(String),
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for ChangedLinesError {
    fn from(e: reqwest::Error) -> Self {
        ChangedLinesError::Provider(ProviderError::from(e))
    }
}

// ===== Mapping from reqwest::Error into ProviderError =====

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }

        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }

        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16(), None);
        }

        ProviderError::Network(e.to_string())
    }
}

impl ProviderError {
    /// Maps a non-2xx HTTP status into a provider error.
    ///
    /// `retry_after_secs` is only kept for rate-limit responses.
    pub fn from_status(code: u16, retry_after_secs: Option<u64>) -> Self {
        match code {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited { retry_after_secs },
            500..=599 => ProviderError::Server(code),
            _ => ProviderError::HttpStatus(code),
        }
    }
}
