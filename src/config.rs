use anyhow::{Context, Result};
use marq_parse::PageChrome;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level marq.json schema.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title, shown on the article index.
    #[serde(default = "default_title")]
    pub title: String,

    /// Absolute URL the site is served from. Used for feed links and the
    /// "index" navigation link on article pages.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_stylesheets")]
    pub stylesheets: Vec<String>,

    #[serde(default)]
    pub script: Option<String>,

    /// Site description, used on the index page and in feeds.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_title() -> String {
    "Articles".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_stylesheets() -> Vec<String> {
    vec!["/css/colors.css".to_string(), "/css/main.css".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            stylesheets: default_stylesheets(),
            script: None,
            description: None,
        }
    }
}

impl SiteConfig {
    /// Page chrome for rendering articles of this site.
    pub fn chrome(&self) -> PageChrome {
        PageChrome {
            base_url: self.base_url.clone(),
            stylesheets: self.stylesheets.clone(),
            script: self.script.clone(),
            description: None,
        }
    }

    /// The base URL without a trailing slash, for joining page paths.
    pub fn base_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Load config from a marq.json file in the site root, or return defaults
/// if missing.
pub fn load_config(site_root: &Path) -> Result<SiteConfig> {
    let config_path = site_root.join("marq.json");

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config)
    } else {
        Ok(SiteConfig::default())
    }
}
