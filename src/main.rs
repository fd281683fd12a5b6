use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::Path;

mod build;
mod config;
mod feed;
mod init;

#[derive(Parser)]
#[command(name = "marq", version, about = "Static site generator for plain-text articles")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a directory of articles into a static site
    Build {
        /// Site root containing .md articles and an optional marq.json
        dir: String,

        /// Output directory
        #[arg(long, default_value = "dist")]
        out: String,

        /// Rebuild whenever a source file changes
        #[arg(long)]
        watch: bool,
    },

    /// Render a single article to HTML on stdout
    Render {
        /// Path to the .md file
        file: String,

        /// Emit a complete page instead of a body fragment
        #[arg(long)]
        page: bool,
    },

    /// Check article file(s) for problems
    Check {
        /// Path to the .md file(s)
        files: Vec<String>,
    },

    /// Scaffold a new site
    Init {
        /// Directory to initialize (default: current directory)
        path: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { dir, out, watch } => {
            build::handle_build(&dir, &out, cli.quiet)?;
            if watch {
                build::watch_and_rebuild(&dir, &out, cli.quiet)?;
            }
        }
        Commands::Render { file, page } => {
            handle_render(&file, page)?;
        }
        Commands::Check { files } => {
            handle_check(&files)?;
        }
        Commands::Init { path } => {
            init::init_site(path.as_deref(), cli.quiet)?;
        }
    }

    Ok(())
}

fn handle_render(file: &str, page: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file, e))?;

    let result = marq_parse::parse(&content);

    // Print parse diagnostics to stderr
    for diag in &result.diagnostics {
        let line_info = match diag.line {
            Some(line) => format!("{}:{}", file, line),
            None => file.to_string(),
        };
        eprintln!("{}: {}", line_info, diag.message);
    }

    let output = if page {
        let site_root = Path::new(file).parent().unwrap_or(Path::new("."));
        let config = config::load_config(site_root)?;
        result.article.to_html_page(&config.chrome())
    } else {
        result.article.to_html()
    };

    println!("{output}");
    Ok(())
}

fn handle_check(files: &[String]) -> Result<()> {
    let mut has_errors = false;

    for file in files {
        let content = std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file, e))?;

        let result = marq_parse::parse(&content);

        // Combine parse diagnostics with metadata validation
        let mut all_diagnostics = result.diagnostics;
        all_diagnostics.extend(result.article.meta.validate());

        if all_diagnostics.is_empty() {
            println!("{}: {}", file, "OK".green());
        } else {
            for diag in &all_diagnostics {
                if build::print_diagnostic(file, diag) {
                    has_errors = true;
                }
            }
        }
    }

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}
