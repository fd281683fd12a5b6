//! Integration tests for `marq build` site generation.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn marq_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_marq"))
}

fn temp_site(name: &str) -> (PathBuf, PathBuf) {
    let root = std::env::temp_dir().join("marq-build-test").join(name);
    // Clean up from previous runs
    let _ = fs::remove_dir_all(&root);
    let site = root.join("site");
    let out = root.join("dist");
    fs::create_dir_all(&site).unwrap();
    (site, out)
}

fn write_site(site: &PathBuf) {
    fs::write(
        site.join("marq.json"),
        r#"{
  "title": "Test Site",
  "baseUrl": "https://example.com",
  "description": "Notes on testing"
}
"#,
    )
    .unwrap();

    fs::write(
        site.join("first.md"),
        "@title: First Post\n@date: 2024-01-10\n@categories: rust\n\n# First Post\n\nHello *world*.\n",
    )
    .unwrap();

    fs::write(
        site.join("second.md"),
        "@title: Second Post\n@date: 2024-02-20\n@categories: rust, web dev\n\n# Second Post\n\nMore text.\n",
    )
    .unwrap();

    fs::write(
        site.join("secret.md"),
        "@title: Secret Draft\n@date: 2024-03-01\n@hidden\n\n# Secret Draft\n\nNot listed.\n",
    )
    .unwrap();
}

fn run_build(site: &PathBuf, out: &PathBuf) {
    let status = Command::new(marq_bin())
        .args([
            "build",
            site.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--quiet",
        ])
        .status()
        .expect("failed to run marq build");
    assert!(status.success(), "marq build should succeed");
}

#[test]
fn build_produces_expected_file_tree() {
    let (site, out) = temp_site("file-tree");
    write_site(&site);
    run_build(&site, &out);

    for name in [
        "First_Post.html",
        "Second_Post.html",
        "Secret_Draft.html",
        "index.html",
        "rust.html",
        "web_dev.html",
        "atom.xml",
        "rss.xml",
        "sitemap.xml",
        "robots.txt",
    ] {
        assert!(out.join(name).exists(), "{name} should exist");
    }

    let _ = fs::remove_dir_all(out.parent().unwrap());
}

#[test]
fn index_lists_articles_newest_first_and_skips_hidden() {
    let (site, out) = temp_site("index-order");
    write_site(&site);
    run_build(&site, &out);

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("<h1>Test Site</h1>"));
    assert!(index.contains("Notes on testing"));

    let second = index.find("Second Post").expect("Second Post listed");
    let first = index.find("First Post").expect("First Post listed");
    assert!(second < first, "newer article should come first");

    assert!(!index.contains("Secret Draft"), "hidden article stays off the index");
    // The hidden article still gets its own page.
    let secret = fs::read_to_string(out.join("Secret_Draft.html")).unwrap();
    assert!(secret.contains("Not listed."));

    let _ = fs::remove_dir_all(out.parent().unwrap());
}

#[test]
fn category_pages_list_their_members() {
    let (site, out) = temp_site("categories");
    write_site(&site);
    run_build(&site, &out);

    let rust = fs::read_to_string(out.join("rust.html")).unwrap();
    assert!(rust.contains("Test Site - rust"));
    assert!(rust.contains("First Post"));
    assert!(rust.contains("Second Post"));

    let web = fs::read_to_string(out.join("web_dev.html")).unwrap();
    assert!(web.contains("Second Post"));
    assert!(!web.contains("First Post"));

    let _ = fs::remove_dir_all(out.parent().unwrap());
}

#[test]
fn article_pages_carry_site_chrome() {
    let (site, out) = temp_site("chrome");
    write_site(&site);
    run_build(&site, &out);

    let html = fs::read_to_string(out.join("First_Post.html")).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>First Post</title>"));
    assert!(html.contains("<a href=\"https://example.com\">index</a>"));
    assert!(html.contains("<a href=\"./rust.html\">rust</a>"));
    assert!(html.contains("<em>world</em>"));

    let _ = fs::remove_dir_all(out.parent().unwrap());
}

#[test]
fn feeds_use_the_base_url_and_skip_hidden() {
    let (site, out) = temp_site("feeds");
    write_site(&site);
    run_build(&site, &out);

    let atom = fs::read_to_string(out.join("atom.xml")).unwrap();
    assert!(atom.contains("https://example.com/First_Post.html"));
    assert!(atom.contains("<updated>2024-02-20T00:00:00Z</updated>"));
    assert!(!atom.contains("Secret_Draft"));

    let rss = fs::read_to_string(out.join("rss.xml")).unwrap();
    assert!(rss.contains("<pubDate>Tue, 20 Feb 2024 00:00:00 +0000</pubDate>"));

    let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
    assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));

    let _ = fs::remove_dir_all(out.parent().unwrap());
}

#[test]
fn check_reports_warnings_without_failing() {
    let (site, _out) = temp_site("check");
    let bad = site.join("bad.md");
    fs::write(&bad, "@date: soon\n@mystery\n\nBody text.\n").unwrap();

    let output = Command::new(marq_bin())
        .args(["check", bad.to_str().unwrap()])
        .output()
        .expect("failed to run marq check");

    // Warnings only, so the exit code stays zero.
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("W001"), "stdout was: {stdout}");
    assert!(stdout.contains("W102"), "stdout was: {stdout}");

    let _ = fs::remove_dir_all(site.parent().unwrap());
}

#[test]
fn init_scaffolds_a_buildable_site() {
    let root = std::env::temp_dir().join("marq-build-test").join("init");
    let _ = fs::remove_dir_all(&root);

    let status = Command::new(marq_bin())
        .args(["init", root.to_str().unwrap(), "--quiet"])
        .status()
        .expect("failed to run marq init");
    assert!(status.success());

    let articles = root.join("articles");
    assert!(articles.join("marq.json").exists());
    assert!(articles.join("welcome.md").exists());

    let out = root.join("dist");
    run_build(&articles, &out);
    assert!(out.join("Welcome.html").exists());

    let _ = fs::remove_dir_all(&root);
}
