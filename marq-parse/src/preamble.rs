//! Article preamble parser.
//!
//! An article may open with `@key: value` lines before the body:
//!
//! ```text
//! @title: My First Post
//! @date: 2024-03-09
//! @categories: rust, parsing
//!
//! # My First Post
//! ...
//! ```
//!
//! Blank lines inside the preamble are skipped; the first non-blank line
//! that does not start with `@` begins the body. `@hidden` and `@nonav` are
//! bare flags without a value.

use crate::error::{Diagnostic, Severity};
use crate::types::{Article, Metadata};

/// Result of parsing an article.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed article.
    pub article: Article,
    /// Non-fatal diagnostics collected during parsing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse an article string into a `ParseResult`.
///
/// This function never panics. Malformed preamble lines produce diagnostics
/// and a best-effort `Article`.
pub fn parse(input: &str) -> ParseResult {
    let mut diagnostics = Vec::new();

    // Normalise CRLF → LF.
    let normalised = input.replace("\r\n", "\n");

    let mut meta = Metadata::default();
    let mut body_start = normalised.len();
    let mut offset = 0;

    for (idx, line) in normalised.split('\n').enumerate() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !trimmed.starts_with('@') {
                body_start = offset;
                break;
            }
            apply_directive(trimmed, idx + 1, &mut meta, &mut diagnostics);
        }
        offset += line.len() + 1; // +1 for '\n'
    }

    let body = normalised
        .get(body_start..)
        .unwrap_or_default()
        .to_string();

    ParseResult {
        article: Article { meta, body },
        diagnostics,
    }
}

/// Apply one `@key: value` line to the metadata.
fn apply_directive(
    trimmed: &str,
    line_no: usize,
    meta: &mut Metadata,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let rest = &trimmed[1..];
    let Some((key, value)) = rest.split_once(':') else {
        // Bare flags carry no value.
        match rest.trim() {
            "hidden" => meta.hidden = true,
            "nonav" => meta.nonav = true,
            other => diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                message: format!("preamble line '@{other}' has no ':' and is not a known flag"),
                line: Some(line_no),
                code: Some("W001".to_string()),
            }),
        }
        return;
    };

    let key = key.trim();
    let value = value.trim();
    match key {
        "title" => meta.title = value.to_string(),
        "date" => meta.date = value.to_string(),
        "lang" => meta.lang = value.to_string(),
        "filename" => meta.filename = Some(value.to_string()),
        "hidden" => meta.hidden = true,
        "nonav" => meta.nonav = true,
        "categories" => {
            meta.categories = value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }
        "" => diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: "preamble line has an empty key".to_string(),
            line: Some(line_no),
            code: Some("W002".to_string()),
        }),
        other => {
            meta.extra.insert(other.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let result = parse("");
        assert_eq!(result.article.meta, Metadata::default());
        assert!(result.article.body.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn body_without_preamble_is_untouched() {
        let result = parse("# Hello\n\nSome text.\n");
        assert_eq!(result.article.body, "# Hello\n\nSome text.\n");
        assert_eq!(result.article.meta.title, "article");
    }

    #[test]
    fn preamble_keys_populate_metadata() {
        let input = "@title: My Post\n@date: 2024-03-09\n@lang: de\n@filename: custom\n\n# Body\n";
        let result = parse(input);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let meta = &result.article.meta;
        assert_eq!(meta.title, "My Post");
        assert_eq!(meta.date, "2024-03-09");
        assert_eq!(meta.lang, "de");
        assert_eq!(meta.filename.as_deref(), Some("custom"));
        assert_eq!(result.article.body, "# Body\n");
    }

    #[test]
    fn categories_are_comma_split_and_trimmed() {
        let result = parse("@categories: rust,  parsing , , web\nbody\n");
        assert_eq!(
            result.article.meta.categories,
            vec!["rust", "parsing", "web"]
        );
    }

    #[test]
    fn bare_flags() {
        let result = parse("@hidden\n@nonav\nbody\n");
        assert!(result.article.meta.hidden);
        assert!(result.article.meta.nonav);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn flags_with_colon_also_work() {
        let result = parse("@hidden: yes\nbody\n");
        assert!(result.article.meta.hidden);
    }

    #[test]
    fn unknown_keys_land_in_extra() {
        let result = parse("@author: Someone\nbody\n");
        assert_eq!(
            result.article.meta.extra.get("author").map(String::as_str),
            Some("Someone")
        );
    }

    #[test]
    fn malformed_preamble_line_warns() {
        let result = parse("@mystery\nbody\n");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code.as_deref(), Some("W001"));
        assert_eq!(result.diagnostics[0].line, Some(1));
    }

    #[test]
    fn blank_lines_inside_preamble_are_skipped() {
        let result = parse("@title: A\n\n@date: 2024-01-01\n\nbody text\n");
        assert_eq!(result.article.meta.title, "A");
        assert_eq!(result.article.meta.date, "2024-01-01");
        assert_eq!(result.article.body, "body text\n");
    }

    #[test]
    fn crlf_input_is_normalised() {
        let result = parse("@title: A\r\n\r\nbody\r\n");
        assert_eq!(result.article.meta.title, "A");
        assert_eq!(result.article.body, "body\n");
    }

    #[test]
    fn preamble_only_input_has_empty_body() {
        let result = parse("@title: A\n@date: 2024-01-01\n");
        assert_eq!(result.article.meta.title, "A");
        assert!(result.article.body.is_empty());
    }

    #[test]
    fn at_sign_later_in_body_is_not_a_directive() {
        let result = parse("body first\n@not: preamble\n");
        assert_eq!(result.article.body, "body first\n@not: preamble\n");
        assert!(result.article.meta.extra.is_empty());
    }
}
