//! Retrieval of per-file patch records from the source-control host.
//!
//! Only GitHub (REST v3) is implemented. The rest of the crate sees nothing
//! but [`PatchRecord`]s, so the index builder stays independent of HTTP.

pub mod types;
pub use types::*;

pub mod github;

use crate::errors::{ConfigError, ChangedLinesResult};

/// Default GitHub REST API base.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Runtime configuration for the provider client.
///
/// Usually injected from the environment by the binary.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com" or a GHES "https://host/api/v3".
    pub base_api: String,
    /// Access token (PAT, app or workflow token), sent as a bearer token.
    pub token: String,
}

impl ProviderConfig {
    /// Validates and normalizes the configuration (trailing `/` removed).
    ///
    /// # Errors
    /// [`ConfigError::MissingToken`] for a blank token and
    /// [`ConfigError::InvalidBaseUrl`] for a non-HTTP base.
    pub fn validated(self) -> ChangedLinesResult<Self> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken.into());
        }

        let base = self.base_api.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_api).into());
        }

        Ok(Self {
            base_api: base.to_string(),
            token: self.token.trim().to_string(),
        })
    }
}
