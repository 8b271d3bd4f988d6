//! ESLint JSON report model.
//!
//! Only the fields this crate reads are typed. Everything else ESLint writes
//! (`fix`, `suggestions`, `source`, `usedDeprecatedRules`, ...) is kept in
//! `extra` so a filtered report serializes back with no field lost.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ESLint severity of a rule that reports a warning.
pub const SEVERITY_WARNING: u8 = 1;
/// ESLint severity of a rule that reports an error.
pub const SEVERITY_ERROR: u8 = 2;

/// One diagnostic reported by the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMessage {
    /// `null` for parser/fatal errors.
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub severity: u8,
    #[serde(default)]
    pub message: String,
    /// 1-based line in the linted file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiagnosticMessage {
    pub fn is_error(&self) -> bool {
        self.severity >= SEVERITY_ERROR
    }

    pub fn is_warning(&self) -> bool {
        self.severity == SEVERITY_WARNING
    }
}

/// All diagnostics of one linted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiagnostics {
    /// Usually absolute (`/home/runner/work/repo/repo/src/a.ts`).
    pub file_path: String,
    #[serde(default)]
    pub messages: Vec<DiagnosticMessage>,
    /// `errorCount`, `warningCount`, `source`, ... as ESLint wrote them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A whole ESLint report, in linter output order.
pub type DiagnosticReport = Vec<FileDiagnostics>;
