//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use changed_lines::git_providers::DEFAULT_GITHUB_API;
use changed_lines::{ProviderConfig, PullRequestRef};
use thiserror::Error;

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is absent or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// Variable is present but malformed.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        var: &'static str,
        reason: &'static str,
    },
}

/// Everything one gate run needs, passed explicitly to the pipeline.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub provider: ProviderConfig,
    pub pull_request: PullRequestRef,
    /// Absolute checkout root, stripped from linter file paths. May be empty.
    pub workspace_root: String,
    /// ESLint `--format json` output to filter.
    pub report_path: PathBuf,
}

impl GateConfig {
    /// Build from the process environment.
    ///
    /// | variable            | required | default                  |
    /// |---------------------|----------|--------------------------|
    /// | `GITHUB_TOKEN`      | yes      |                          |
    /// | `GITHUB_REPOSITORY` | yes      | (`owner/repo`)           |
    /// | `PR_NUMBER`         | yes      |                          |
    /// | `GITHUB_WORKSPACE`  | no       | empty                    |
    /// | `GITHUB_API_URL`    | no       | `https://api.github.com` |
    /// | `ESLINT_REPORT`     | no       | `eslint_report.json`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`GateConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| get(k).filter(|v| !v.trim().is_empty());
        let must = |k: &'static str| non_empty(k).ok_or(ConfigError::MissingVar(k));

        let token = must("GITHUB_TOKEN")?;
        let slug = must("GITHUB_REPOSITORY")?;
        let number = must("PR_NUMBER")?
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid {
                var: "PR_NUMBER",
                reason: "expected a positive integer",
            })?;

        let pull_request =
            PullRequestRef::from_slug(&slug, number).ok_or(ConfigError::Invalid {
                var: "GITHUB_REPOSITORY",
                reason: "expected 'owner/repo'",
            })?;

        Ok(Self {
            provider: ProviderConfig {
                base_api: non_empty("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API.into()),
                token,
            },
            pull_request,
            workspace_root: get("GITHUB_WORKSPACE").unwrap_or_default(),
            report_path: non_empty("ESLINT_REPORT")
                .unwrap_or_else(|| "eslint_report.json".into())
                .into(),
        })
    }
}
