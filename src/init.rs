use anyhow::Result;
use colored::Colorize;
use std::fs;

const WELCOME: &str = "\
@title: Welcome
@date: 1970-01-01
@categories: meta

# Welcome

Your site is ready. This article lives in `articles/welcome.md`.

## Writing

Articles are markdown with an `@key: value` preamble:

- `@title` and `@date` drive the index ordering
- `@categories` groups articles onto category pages
- `@hidden` keeps an article out of the index and feeds

Run `marq build articles` to regenerate the site.
";

/// Scaffold a new marq site at the given path.
pub fn init_site(path: Option<&str>, quiet: bool) -> Result<()> {
    let target = match path {
        Some(p) => std::path::PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let site_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "my-site".to_string());

    if !quiet {
        println!(
            "{} {} at {}",
            "Initializing".green().bold(),
            site_name,
            target.display()
        );
    }

    fs::create_dir_all(&target)?;

    let articles_dir = target.join("articles");
    fs::create_dir_all(&articles_dir)?;

    let config = format!(
        r#"{{
  "title": "{site_name}",
  "baseUrl": "/",
  "stylesheets": ["/css/colors.css", "/css/main.css"]
}}
"#
    );
    fs::write(articles_dir.join("marq.json"), config)?;
    if !quiet {
        println!("  {} articles/marq.json", "Created".green());
    }

    fs::write(articles_dir.join("welcome.md"), WELCOME)?;
    if !quiet {
        println!("  {} articles/welcome.md", "Created".green());
    }

    if !quiet {
        println!();
        println!("{}", "Done! Next steps:".bold());
        println!("  1. Edit articles/marq.json with your site details");
        println!("  2. Run `marq build {}/articles` to build the site", site_name);
    }

    Ok(())
}
