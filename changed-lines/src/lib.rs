//! Added-line indexing for pull request diffs.
//!
//! Pipeline per changed file:
//!   1. [`parser`] splits the host's per-file patch into destination-side hunks
//!   2. [`resolver`] turns each hunk into absolute added line numbers
//!   3. [`index`] collects the numbers of all files into a [`ChangedLineIndex`]
//!
//! [`git_providers`] fetches the per-file patch records from GitHub; the
//! first three steps never touch the network.

pub mod errors;
pub mod git_providers;
pub mod index;
pub mod parser;
pub mod resolver;
pub mod telemetry;

use tracing::info;

pub use crate::errors::{ChangedLinesError, ChangedLinesResult};
pub use crate::git_providers::{PatchRecord, ProviderConfig, PullRequestRef};
pub use crate::index::ChangedLineIndex;

use crate::git_providers::github::GitHubClient;

/// Fetches the pull request's patch records and indexes their added lines.
///
/// Retrieval errors are returned unchanged and no partial index is built.
pub async fn fetch_changed_lines(
    cfg: ProviderConfig,
    pr: &PullRequestRef,
) -> ChangedLinesResult<ChangedLineIndex> {
    info!(
        owner = %pr.owner,
        repo = %pr.repo,
        number = pr.number,
        "fetching pull request files"
    );

    let client = GitHubClient::from_config(cfg)?;
    let records = client.list_pull_request_files(pr).await?;
    let index = ChangedLineIndex::from_records(&records)?;

    info!(
        files = records.len(),
        indexed = index.len(),
        "changed line index built"
    );

    Ok(index)
}
