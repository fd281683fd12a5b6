use serde::{Deserialize, Serialize};

/// Errors from interpreting article metadata.
///
/// Markup-level anomalies are never errors (they degrade to literal text);
/// this type covers the metadata that downstream consumers rely on being
/// well-formed, like feed timestamps.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("invalid article date '{value}': {source}")]
    Date {
        value: String,
        source: time::error::Parse,
    },

    #[error("failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
}

/// A diagnostic message produced while reading an article.
///
/// Diagnostics are non-fatal: the parser continues and produces a
/// best-effort article even when diagnostics are emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}
