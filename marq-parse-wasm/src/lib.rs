//! WASM bindings for `marq-parse`.
//!
//! Exposes the marq article parser to JavaScript via wasm-bindgen.
//! Call `parse()` with a string to get parsed metadata as JSON, or use
//! `render_html()` / `render_html_page()` for rendered output.

use wasm_bindgen::prelude::*;

/// Parse a marq article and return its structure as JSON.
///
/// Returns a JSON object with `{ meta, body, diagnostics }`.
/// `meta` holds the preamble metadata, `body` the raw markdown body,
/// and `diagnostics` an array of parse warnings.
#[wasm_bindgen]
pub fn parse(input: &str) -> String {
    let result = marq_parse::parse(input);
    serde_json::json!({
        "meta": result.article.meta,
        "body": result.article.body,
        "diagnostics": result.diagnostics,
    })
    .to_string()
}

/// Parse a marq article and return the body as an HTML fragment.
#[wasm_bindgen]
pub fn render_html(input: &str) -> String {
    let result = marq_parse::parse(input);
    result.article.to_html()
}

/// Parse a marq article and return a complete HTML page.
///
/// Uses the default page chrome; a `title` argument overrides the
/// preamble title.
#[wasm_bindgen]
pub fn render_html_page(input: &str, title: Option<String>) -> String {
    let mut result = marq_parse::parse(input);
    if let Some(title) = title {
        result.article.meta.title = title;
    }
    result.article.to_html_page(&marq_parse::PageChrome::default())
}

/// Check a marq article and return diagnostics as JSON.
///
/// Returns a JSON array of `{ severity, message, line, code }` objects.
/// An empty array means the article is clean.
#[wasm_bindgen]
pub fn check(input: &str) -> String {
    let result = marq_parse::parse(input);
    let mut all = result.diagnostics;
    all.extend(result.article.meta.validate());
    serde_json::to_string(&all).unwrap_or_else(|_| "[]".to_string())
}
