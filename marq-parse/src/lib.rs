//! `marq-parse` — parser and HTML renderer for the marq article format.
//!
//! A marq article is a lightweight markdown dialect preceded by an optional
//! `@key: value` preamble carrying metadata (title, date, categories, ...).
//! This crate parses the preamble into [`Metadata`], renders the body to an
//! HTML fragment, and can wrap the fragment in full page chrome.
//!
//! # Quick start
//!
//! ```
//! let result = marq_parse::parse("@title: Hello\n@date: 2024-05-01\n\n# Hello\n\nHi *there*.\n");
//! assert!(result.diagnostics.is_empty());
//! assert_eq!(result.article.meta.title, "Hello");
//! assert!(result.article.to_html().contains("<em>there</em>"));
//! ```

pub mod blocks;
pub mod error;
pub mod inline;
pub mod line;
pub mod page;
pub mod preamble;
pub mod tags;
pub mod types;

pub use error::*;
pub use preamble::{parse, ParseResult};
pub use types::*;

pub use page::PageChrome;

impl Article {
    /// Render the article body as an HTML fragment.
    pub fn to_html(&self) -> String {
        blocks::render_body(&self.body)
    }

    /// Render the article as a complete HTML page.
    pub fn to_html_page(&self, chrome: &PageChrome) -> String {
        page::to_html_page(self, chrome)
    }
}
