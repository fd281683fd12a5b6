//! Full-page HTML assembly.
//!
//! The block parser produces a body fragment; this module wraps it in the
//! document chrome: doctype, `<head>` metadata, navigation, the category
//! link strip, and the footer. Index pages reuse `wrap_fragment` with a
//! fragment they build themselves.

use crate::types::{normalize, Metadata};
use crate::{blocks, Article};

/// Site-level configuration for page chrome.
#[derive(Debug, Clone)]
pub struct PageChrome {
    /// Absolute URL of the article index, used for the "index" nav link.
    pub base_url: String,
    /// Stylesheet hrefs emitted as `<link rel="stylesheet">` tags.
    pub stylesheets: Vec<String>,
    /// Optional script href included at the end of `<body>`.
    pub script: Option<String>,
    /// Meta description. Falls back to "{date} - {title}".
    pub description: Option<String>,
}

impl Default for PageChrome {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            stylesheets: vec!["/css/colors.css".to_string(), "/css/main.css".to_string()],
            script: Some("/main.js".to_string()),
            description: None,
        }
    }
}

/// Render an article as a complete HTML page.
pub fn to_html_page(article: &Article, chrome: &PageChrome) -> String {
    let body = blocks::render_body(&article.body);
    wrap_fragment(&article.meta, chrome, &body)
}

/// Wrap an already-rendered HTML fragment in the page chrome.
pub fn wrap_fragment(meta: &Metadata, chrome: &PageChrome, body: &str) -> String {
    let mut page = String::new();

    let description = chrome
        .description
        .clone()
        .unwrap_or_else(|| format!("{} - {}", meta.date, meta.title));

    page.push_str(&format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{}\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <meta name=\"robots\" content=\"index, follow\">\n",
        escape_html(&meta.lang)
    ));
    for href in &chrome.stylesheets {
        page.push_str(&format!(
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\n",
            escape_html(href)
        ));
    }
    page.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         <main>\n",
        escape_html(&description),
        escape_html(&meta.title)
    ));

    if !meta.nonav {
        page.push_str(&nav(&chrome.base_url));
        page.push_str("<hr>\n");
        page.push_str(&category_strip(&meta.categories));
    }

    page.push_str(body);

    if !meta.nonav {
        page.push_str("<hr>\n");
        page.push_str(&nav(&chrome.base_url));
    }
    page.push_str("</main>\n");
    if let Some(script) = &chrome.script {
        page.push_str(&format!("<script src=\"{}\"></script>\n", escape_html(script)));
    }
    page.push_str("</body>\n</html>\n");

    page
}

fn nav(base_url: &str) -> String {
    format!(
        "<nav><a href=\"javascript: history.go(-1)\">&lt;-- back</a>\
         <a href=\"{}\">index</a>\
         <a href=\"/\">home --&gt;</a></nav>\n",
        escape_html(base_url)
    )
}

/// The strip of category links shown under the nav. Empty when the article
/// declares no categories.
fn category_strip(categories: &[String]) -> String {
    if categories.is_empty() {
        return String::new();
    }
    let mut sorted: Vec<&String> = categories.iter().collect();
    sorted.sort();

    let mut strip = String::from("<div class=\"categories\"><h3>Categories:</h3><p>\n");
    for category in sorted {
        strip.push_str(&format!(
            "<a href=\"./{}.html\">{}</a>\n",
            normalize(category),
            escape_html(category)
        ));
    }
    strip.push_str("</p></div>\n");
    strip
}

/// Escape text for use in HTML attribute values and chrome text. Unlike the
/// body escaping, this also covers `&` and `"` since it never re-processes
/// its own output.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(meta: Metadata) -> Article {
        Article {
            meta,
            body: "# Hello\n\nText with *em*.\n".to_string(),
        }
    }

    #[test]
    fn page_carries_title_lang_and_body() {
        let meta = Metadata {
            title: "A Post".to_string(),
            lang: "de".to_string(),
            ..Metadata::default()
        };
        let html = to_html_page(&article(meta), &PageChrome::default());
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"de\">"));
        assert!(html.contains("<title>A Post</title>"));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn nav_links_point_at_base_url() {
        let chrome = PageChrome {
            base_url: "https://example.com/blog".to_string(),
            ..PageChrome::default()
        };
        let html = to_html_page(&article(Metadata::default()), &chrome);
        assert!(html.contains("<a href=\"https://example.com/blog\">index</a>"));
    }

    #[test]
    fn nonav_suppresses_navigation_and_categories() {
        let meta = Metadata {
            nonav: true,
            categories: vec!["rust".to_string()],
            ..Metadata::default()
        };
        let html = to_html_page(&article(meta), &PageChrome::default());
        assert!(!html.contains("<nav>"));
        assert!(!html.contains("class=\"categories\""));
    }

    #[test]
    fn categories_render_sorted_with_normalized_links() {
        let meta = Metadata {
            categories: vec!["web dev".to_string(), "rust".to_string()],
            ..Metadata::default()
        };
        let html = to_html_page(&article(meta), &PageChrome::default());
        let rust = html.find("<a href=\"./rust.html\">rust</a>").unwrap();
        let web = html.find("<a href=\"./web_dev.html\">web dev</a>").unwrap();
        assert!(rust < web);
    }

    #[test]
    fn description_defaults_to_date_and_title() {
        let meta = Metadata {
            title: "T".to_string(),
            date: "2024-01-02".to_string(),
            ..Metadata::default()
        };
        let html = to_html_page(&article(meta), &PageChrome::default());
        assert!(html.contains("<meta name=\"description\" content=\"2024-01-02 - T\">"));
    }

    #[test]
    fn chrome_text_is_attribute_escaped() {
        let meta = Metadata {
            title: "Tom & \"Jerry\" <3".to_string(),
            ..Metadata::default()
        };
        let html = to_html_page(&article(meta), &PageChrome::default());
        assert!(html.contains("<title>Tom &amp; &quot;Jerry&quot; &lt;3</title>"));
    }

    #[test]
    fn escape_html_covers_attribute_characters() {
        assert_eq!(escape_html(r#"a&b<c>"d""#), "a&amp;b&lt;c&gt;&quot;d&quot;");
    }
}
