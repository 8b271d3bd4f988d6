//! GitHub provider (REST v3) for pull request file listings.
//!
//! Endpoint used (as of 2025):
//!   * GET /repos/{owner}/{repo}/pulls/{number}/files
//!
//! The listing is paginated through the `Link` response header. GitHub caps
//! it at 3000 files; everything the host returns is collected.

use reqwest::header::{HeaderMap, ACCEPT, LINK, RETRY_AFTER};
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::{ChangedLinesResult, ProviderError};
use crate::git_providers::types::{PatchRecord, PullRequestRef};
use crate::git_providers::ProviderConfig;

/// Files requested per page (GitHub maximum).
const PER_PAGE: u32 = 100;

/// GitHub HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // "https://api.github.com"
    token: String,
}

impl GitHubClient {
    /// Constructs a GitHub client with a shared HTTP instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        debug!("Creating GitHubClient with base_api={}", base_api);
        Self {
            http,
            base_api,
            token,
        }
    }

    /// Builds a client from configuration with a stable user agent.
    pub fn from_config(cfg: ProviderConfig) -> ChangedLinesResult<Self> {
        let cfg = cfg.validated()?;
        let http = Client::builder()
            .user_agent(concat!("pr-lint-gate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(http, cfg.base_api, cfg.token))
    }

    /// Lists every file changed by the pull request, following pagination.
    ///
    /// A failing page fails the whole call; no partial list is returned.
    pub async fn list_pull_request_files(
        &self,
        pr: &PullRequestRef,
    ) -> ChangedLinesResult<Vec<PatchRecord>> {
        let mut url = format!(
            "{}/repos/{}/{}/pulls/{}/files?per_page={}",
            self.base_api, pr.owner, pr.repo, pr.number, PER_PAGE
        );
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            debug!("GitHub list files: page={}, url={}", page, url);

            let resp = self
                .http
                .get(&url)
                .bearer_auth(&self.token)
                .header(ACCEPT, "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28")
                .send()
                .await?;

            if !resp.status().is_success() {
                let code = resp.status().as_u16();
                warn!(status = code, page, "GitHub list files failed");
                return Err(status_error(code, resp.headers()).into());
            }

            let next = resp
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);

            let batch: Vec<PatchRecord> = resp.json().await?;
            debug!("GitHub list files: page={} returned {} files", page, batch.len());
            records.extend(batch);

            match next {
                Some(n) => {
                    url = n;
                    page += 1;
                }
                None => break,
            }
        }

        Ok(records)
    }
}

/// Maps a non-2xx response into a provider error.
///
/// GitHub signals an exhausted primary quota with 403 and
/// `x-ratelimit-remaining: 0`, and secondary limits with `retry-after`.
fn status_error(code: u16, headers: &HeaderMap) -> ProviderError {
    let retry_after = retry_after_secs(headers);

    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    if code == 403 && (exhausted || retry_after.is_some()) {
        return ProviderError::RateLimited {
            retry_after_secs: retry_after,
        };
    }

    ProviderError::from_status(code, retry_after)
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header.
///
/// `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;
        parts
            .any(|p| p.trim() == r#"rel="next""#)
            .then(|| url.to_string())
    })
}
