//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::BasePath;

/// Environment variable that overrides `base_path` at build time
pub const BASE_PATH_ENV: &str = "SCHOLAR_BASE_PATH";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    /// Deployment sub-path, e.g. `/aca-web-html`; empty at the domain root
    pub base_path: String,
    /// Asset URL segment used to detect the base path from exported pages
    pub asset_marker: String,

    // Directory
    pub notes_dir: String,
    pub papers_dir: String,
    pub data_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Homepage".to_string(),
            author: String::new(),

            base_path: String::new(),
            asset_marker: "/_next/".to_string(),

            notes_dir: "_notes".to_string(),
            papers_dir: "_papers".to_string(),
            data_dir: "_data".to_string(),
            public_dir: "public".to_string(),

            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// The active base path: `SCHOLAR_BASE_PATH` if set, else `base_path`
    pub fn base_path(&self) -> BasePath {
        self.base_path_with(std::env::var(BASE_PATH_ENV).ok())
    }

    fn base_path_with(&self, env_override: Option<String>) -> BasePath {
        match env_override {
            Some(value) => {
                tracing::debug!("Using base path from {}: {:?}", BASE_PATH_ENV, value);
                BasePath::new(&value)
            }
            None => BasePath::new(&self.base_path),
        }
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Render `$...$` / `$$...$$` with KaTeX
    pub math: bool,
    pub highlight_theme: String,
    pub line_numbers: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            math: true,
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: true,
        }
    }
}
