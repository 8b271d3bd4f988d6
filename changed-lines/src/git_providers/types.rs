//! Provider-facing data model: pull request references and per-file patches.

use serde::{Deserialize, Serialize};

/// A unique reference to a pull request on the host.
///
/// * `owner` / `repo` – repository identity, e.g. `octo-org` / `web-app`.
/// * `number`         – pull request number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestRef {
    /// Builds a reference from an `owner/repo` slug.
    ///
    /// Returns `None` when the slug does not have exactly two non-empty parts.
    pub fn from_slug(slug: &str, number: u64) -> Option<Self> {
        let mut parts = slug.split('/');
        let owner = parts.next().unwrap_or("").trim();
        let repo = parts.next().unwrap_or("").trim();

        if owner.is_empty() || repo.is_empty() || parts.next().is_some() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }
}

/// One file changed by a pull request, as listed by the host.
///
/// `patch` is missing for binary files, pure renames and diffs the host
/// considered too large. Unknown response fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRecord {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub patch: Option<String>,
    /// `added`, `modified`, `removed`, `renamed`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub previous_filename: Option<String>,
}

impl PatchRecord {
    /// Shorthand used by tests and callers that already hold raw patch text.
    pub fn new(filename: impl Into<String>, additions: u64, patch: Option<&str>) -> Self {
        Self {
            filename: filename.into(),
            additions,
            patch: patch.map(str::to_string),
            status: None,
            previous_filename: None,
        }
    }

    /// Patch text when the record can contribute added lines at all.
    pub fn reviewable_patch(&self) -> Option<&str> {
        if self.additions == 0 {
            return None;
        }
        self.patch.as_deref().filter(|p| !p.is_empty())
    }
}
