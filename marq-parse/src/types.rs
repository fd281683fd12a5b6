use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{Diagnostic, MetaError, Severity};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const ATOM_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T00:00:00Z");
const RSS_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] 00:00:00 +0000"
);

/// A parsed article: preamble metadata plus the markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub meta: Metadata,
    /// Body text with the preamble stripped and line endings normalized.
    pub body: String,
}

/// Article metadata from the `@key: value` preamble.
///
/// Known keys are typed; unknown keys are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    pub lang: String,
    /// Output name override; defaults to the normalized title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Hidden articles render but stay out of indexes and feeds.
    pub hidden: bool,
    /// Suppress the navigation chrome on this article's page.
    pub nonav: bool,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "article".to_string(),
            date: "1970-01-01".to_string(),
            lang: "en".to_string(),
            filename: None,
            hidden: false,
            nonav: false,
            categories: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl Metadata {
    /// Output file stem: the explicit `@filename`, or the normalized title.
    pub fn slug(&self) -> String {
        match &self.filename {
            Some(name) => normalize(name),
            None => normalize(&self.title),
        }
    }

    fn parsed_date(&self) -> Result<time::Date, MetaError> {
        time::Date::parse(&self.date, DATE_FORMAT).map_err(|source| MetaError::Date {
            value: self.date.clone(),
            source,
        })
    }

    /// The date as an Atom `<updated>` timestamp (midnight UTC).
    pub fn date_atom(&self) -> Result<String, MetaError> {
        Ok(self.parsed_date()?.format(ATOM_FORMAT)?)
    }

    /// The date as an RSS `<pubDate>` timestamp (RFC 2822, midnight UTC).
    pub fn date_rfc2822(&self) -> Result<String, MetaError> {
        Ok(self.parsed_date()?.format(RSS_FORMAT)?)
    }

    /// Sort key for article listings: newest first, ties by title.
    pub fn index_key(&self) -> (std::cmp::Reverse<String>, String) {
        (std::cmp::Reverse(self.date.clone()), self.title.clone())
    }

    /// Check the metadata for problems worth reporting. All findings are
    /// warnings; the article still renders.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if self.title == Metadata::default().title {
            diagnostics.push(warning(
                "article has no @title; using the default".to_string(),
                "W101",
            ));
        }
        if let Err(e) = self.parsed_date() {
            diagnostics.push(warning(format!("{e}; feeds will reject this article"), "W102"));
        }
        for category in &self.categories {
            if normalize(category).is_empty() {
                diagnostics.push(warning(
                    format!("category '{category}' normalizes to an empty name"),
                    "W103",
                ));
            }
        }

        diagnostics
    }
}

fn warning(message: String, code: &str) -> Diagnostic {
    Diagnostic {
        severity: Severity::Warning,
        message,
        line: None,
        code: Some(code.to_string()),
    }
}

/// Turn a free-form name into a filename-safe slug: alphanumerics are kept,
/// whitespace runs collapse to a single `_`, everything else is dropped.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else if ch.is_alphanumeric() {
            out.push(ch);
        }
    }
    out
}
