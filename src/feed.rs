//! Feed and crawler output: Atom, RSS, sitemap.xml, robots.txt.
//!
//! All four are plain string assembly over the already-sorted visible
//! article list. Articles with unparseable dates abort feed generation;
//! `marq check` reports them before a build normally gets here.

use anyhow::{Context, Result};
use marq_parse::page::escape_html;
use marq_parse::Article;

use crate::config::SiteConfig;

/// Atom feed for the visible articles, newest first.
pub fn atom(config: &SiteConfig, articles: &[&Article]) -> Result<String> {
    let base = config.base_trimmed();
    let updated = match articles.first() {
        Some(a) => a
            .meta
            .date_atom()
            .with_context(|| format!("Bad date in '{}'", a.meta.title))?,
        None => "1970-01-01T00:00:00Z".to_string(),
    };

    let mut feed = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <feed xmlns=\"http://www.w3.org/2005/Atom\">\n\
         <title>{}</title>\n\
         <link href=\"{}/\"/>\n\
         <link rel=\"self\" href=\"{}/atom.xml\"/>\n\
         <id>{}/</id>\n\
         <updated>{}</updated>\n",
        escape_html(&config.title),
        base,
        base,
        base,
        updated
    );

    for article in articles {
        let url = format!("{}/{}.html", base, article.meta.slug());
        let date = article
            .meta
            .date_atom()
            .with_context(|| format!("Bad date in '{}'", article.meta.title))?;
        feed.push_str(&format!(
            "<entry>\n\
             <title>{}</title>\n\
             <link href=\"{}\"/>\n\
             <id>{}</id>\n\
             <updated>{}</updated>\n\
             <summary>{} - {}</summary>\n\
             </entry>\n",
            escape_html(&article.meta.title),
            url,
            url,
            date,
            article.meta.date,
            escape_html(&article.meta.title)
        ));
    }

    feed.push_str("</feed>\n");
    Ok(feed)
}

/// RSS 2.0 feed for the visible articles, newest first.
pub fn rss(config: &SiteConfig, articles: &[&Article]) -> Result<String> {
    let base = config.base_trimmed();
    let description = config
        .description
        .clone()
        .unwrap_or_else(|| config.title.clone());

    let mut feed = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <rss version=\"2.0\">\n\
         <channel>\n\
         <title>{}</title>\n\
         <link>{}/</link>\n\
         <description>{}</description>\n",
        escape_html(&config.title),
        base,
        escape_html(&description)
    );

    for article in articles {
        let url = format!("{}/{}.html", base, article.meta.slug());
        let date = article
            .meta
            .date_rfc2822()
            .with_context(|| format!("Bad date in '{}'", article.meta.title))?;
        feed.push_str(&format!(
            "<item>\n\
             <title>{}</title>\n\
             <link>{}</link>\n\
             <guid>{}</guid>\n\
             <pubDate>{}</pubDate>\n\
             </item>\n",
            escape_html(&article.meta.title),
            url,
            url,
            date
        ));
    }

    feed.push_str("</channel>\n</rss>\n");
    Ok(feed)
}

/// Sitemap listing the index and every visible article.
pub fn sitemap(config: &SiteConfig, articles: &[&Article]) -> String {
    let base = config.base_trimmed();

    let mut map = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         <url><loc>{}/</loc></url>\n",
        base
    );

    for article in articles {
        map.push_str(&format!(
            "<url><loc>{}/{}.html</loc><lastmod>{}</lastmod></url>\n",
            base,
            article.meta.slug(),
            article.meta.date
        ));
    }

    map.push_str("</urlset>\n");
    map
}

pub fn robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        config.base_trimmed()
    )
}
