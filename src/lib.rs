//! scholar-pages: the content pipeline behind a static academic homepage
//!
//! Notes and papers live as markdown files with YAML front-matter. This
//! crate lists them for index pages, renders them for detail pages, and
//! makes every site-relative link correct under the deployment base path.

pub mod commands;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentStore, DocumentRenderer, MarkdownRenderer};
use helpers::BasePath;

/// A homepage checkout and its resolved settings
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Notes directory
    pub notes_dir: PathBuf,
    /// Papers directory
    pub papers_dir: PathBuf,
    /// Data (JSON) directory
    pub data_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Active deployment base path
    pub base_path: BasePath,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let notes_dir = base_dir.join(&config.notes_dir);
        let papers_dir = base_dir.join(&config.papers_dir);
        let data_dir = base_dir.join(&config.data_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let base_path = config.base_path();

        Self {
            config,
            base_dir,
            notes_dir,
            papers_dir,
            data_dir,
            public_dir,
            base_path,
        }
    }

    pub fn notes(&self) -> ContentStore {
        ContentStore::new(&self.notes_dir)
    }

    pub fn papers(&self) -> ContentStore {
        ContentStore::new(&self.papers_dir)
    }

    /// Markdown renderer configured from `markdown:` in the site config
    pub fn markdown_renderer(&self) -> MarkdownRenderer {
        let md = &self.config.markdown;
        MarkdownRenderer::with_options(&md.highlight_theme, md.line_numbers).with_math(md.math)
    }

    /// Document renderer bound to this site's base path
    pub fn document_renderer(&self) -> DocumentRenderer {
        DocumentRenderer::new(self.markdown_renderer(), self.base_path.clone())
    }

    /// Export listing and detail data
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
