//! `marq build` — compile a directory of articles into a static site.
//!
//! Walks the site root for `.md` files, renders each to `<slug>.html`,
//! then generates the article index, one index page per category, and the
//! feed/crawler files (atom.xml, rss.xml, sitemap.xml, robots.txt).

use anyhow::{Context, Result};
use colored::Colorize;
use marq_parse::page::{escape_html, wrap_fragment};
use marq_parse::{Article, Metadata, Severity};
use notify::{EventKind, RecursiveMode, Watcher};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use crate::config::{load_config, SiteConfig};
use crate::feed;

pub fn handle_build(dir: &str, out_dir: &str, quiet: bool) -> Result<()> {
    let site_root = Path::new(dir);
    let out_path = Path::new(out_dir);
    let config = load_config(site_root)?;

    std::fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create '{}'", out_dir))?;

    let sources = collect_sources(site_root, out_path);
    let mut articles: Vec<Article> = Vec::new();

    for source in &sources {
        let content = std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read '{}'", source.display()))?;

        let result = marq_parse::parse(&content);
        let mut diagnostics = result.diagnostics;
        diagnostics.extend(result.article.meta.validate());
        for diag in &diagnostics {
            let line_info = match diag.line {
                Some(line) => format!("{}:{}", source.display(), line),
                None => source.display().to_string(),
            };
            eprintln!("{}: {}", line_info, diag.message);
        }

        let html = result.article.to_html_page(&config.chrome());
        let page_path = out_path.join(format!("{}.html", result.article.meta.slug()));
        std::fs::write(&page_path, &html)
            .with_context(|| format!("Failed to write '{}'", page_path.display()))?;

        if !quiet {
            println!(
                "  {} {} → {}",
                "page".dimmed(),
                source.display(),
                page_path.display()
            );
        }

        articles.push(result.article);
    }

    // Hidden articles get pages but stay out of every index and feed.
    let mut visible: Vec<&Article> = articles.iter().filter(|a| !a.meta.hidden).collect();
    visible.sort_by_key(|a| a.meta.index_key());

    write_index(&config, &visible, None, &out_path.join("index.html"))?;

    let mut by_category: BTreeMap<String, (String, Vec<&Article>)> = BTreeMap::new();
    for article in &visible {
        for category in &article.meta.categories {
            let normalized = marq_parse::normalize(category);
            by_category
                .entry(normalized)
                .or_insert_with(|| (category.clone(), Vec::new()))
                .1
                .push(article);
        }
    }
    for (normalized, (display, members)) in &by_category {
        let path = out_path.join(format!("{normalized}.html"));
        write_index(&config, members, Some(display), &path)?;
    }

    std::fs::write(out_path.join("atom.xml"), feed::atom(&config, &visible)?)?;
    std::fs::write(out_path.join("rss.xml"), feed::rss(&config, &visible)?)?;
    std::fs::write(out_path.join("sitemap.xml"), feed::sitemap(&config, &visible))?;
    std::fs::write(out_path.join("robots.txt"), feed::robots(&config))?;

    if !quiet {
        println!(
            "{} {} articles, {} categories → {}",
            "Built".green().bold(),
            articles.len(),
            by_category.len(),
            out_path.display()
        );
    }

    Ok(())
}

/// All `.md` files under the site root, excluding the output directory,
/// in path order so builds are deterministic.
fn collect_sources(site_root: &Path, out_path: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(site_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .filter(|p| !p.starts_with(out_path))
        .collect();
    sources.sort();
    sources
}

/// Write an article index page. `category` is `None` for the main index.
fn write_index(
    config: &SiteConfig,
    articles: &[&Article],
    category: Option<&str>,
    path: &Path,
) -> Result<()> {
    let heading = match category {
        Some(name) => format!("{} - {}", config.title, name),
        None => config.title.clone(),
    };

    let mut fragment = format!("<h1>{}</h1>\n", escape_html(&heading));
    if category.is_none() {
        if let Some(description) = &config.description {
            fragment.push_str(&format!("<p>{}</p>\n", escape_html(description)));
        }
    }
    fragment.push_str("<ul class=\"articles\">\n");
    for article in articles {
        fragment.push_str(&format!(
            "<li><a href=\"./{}.html\">{} - {}</a></li>\n",
            article.meta.slug(),
            article.meta.date,
            escape_html(&article.meta.title)
        ));
    }
    fragment.push_str("</ul>\n");

    let meta = Metadata {
        title: heading,
        lang: "en".to_string(),
        nonav: true,
        ..Metadata::default()
    };
    let page = wrap_fragment(&meta, &config.chrome(), &fragment);
    std::fs::write(path, page).with_context(|| format!("Failed to write '{}'", path.display()))
}

/// Watch the site root for changes and rebuild on each save.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms
/// window. Ctrl+C exits cleanly.
pub fn watch_and_rebuild(dir: &str, out_dir: &str, quiet: bool) -> Result<()> {
    let site_root = std::fs::canonicalize(dir)
        .with_context(|| format!("Cannot resolve path '{}'", dir))?;
    let out_path = std::fs::canonicalize(out_dir).unwrap_or_else(|_| PathBuf::from(out_dir));

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        dir
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&site_root, RecursiveMode::Recursive)?;

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant_kind = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                // Ignore our own writes into the output directory.
                let affects_sources = event.paths.iter().any(|p| {
                    !p.starts_with(&out_path)
                        && (p.extension().is_some_and(|ext| ext == "md")
                            || p.file_name().is_some_and(|n| n == "marq.json"))
                });

                if relevant_kind && affects_sources && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));

                    match handle_build(dir, out_dir, quiet) {
                        Ok(()) => {
                            last_rebuild = Instant::now();
                        }
                        Err(e) => {
                            eprintln!("{} {}", "Build error:".red().bold(), e);
                        }
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Keep looping
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Print diagnostics the way `marq check` does, with colored severities.
pub fn print_diagnostic(file: &str, diag: &marq_parse::Diagnostic) -> bool {
    let severity_str = match diag.severity {
        Severity::Error => format!("{}", "error".red().bold()),
        Severity::Warning => format!("{}", "warning".yellow().bold()),
        Severity::Info => format!("{}", "info".cyan().bold()),
    };

    let line_info = match diag.line {
        Some(line) => format!("{file}:{line}"),
        None => file.to_string(),
    };

    let code_str = match &diag.code {
        Some(c) => format!("[{}] ", c),
        None => String::new(),
    };

    println!("{line_info}: {severity_str}: {code_str}{}", diag.message);
    matches!(diag.severity, Severity::Error)
}
