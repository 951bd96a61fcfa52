//! Content records and the metadata derived from them

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;
use crate::error::ValidationError;

/// A content file as read from disk, before any validation
#[derive(Debug, Clone)]
pub struct ContentRecord {
    /// File stem, unique within its directory
    pub id: String,

    /// Full source file path
    pub path: PathBuf,

    /// Front-matter block
    pub front_matter: FrontMatter,

    /// Markdown after the front-matter
    pub body: String,
}

/// Validated front-matter of a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
}

impl NoteMetadata {
    pub const REQUIRED: [&'static str; 3] = ["title", "date", "summary"];

    pub fn from_record(record: &ContentRecord) -> Result<Self, ValidationError> {
        let fm = &record.front_matter;
        let [title, date, summary] = require(record, Self::REQUIRED)?;

        Ok(Self {
            title,
            date,
            summary,
            tags: fm.list("tags"),
        })
    }
}

/// Validated front-matter of a paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperMetadata {
    pub title: String,
    pub date: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub authors: String,
    pub venue: String,
    pub summary: String,
    pub url: String,
    pub arxiv_url: String,
    pub github_url: String,
    pub huggingface_url: String,
}

impl PaperMetadata {
    pub const REQUIRED: [&'static str; 2] = ["title", "date"];

    pub fn from_record(record: &ContentRecord) -> Result<Self, ValidationError> {
        let fm = &record.front_matter;
        let [title, date] = require(record, Self::REQUIRED)?;
        let text = |key: &str| fm.text(key).unwrap_or_default();

        Ok(Self {
            title,
            date,
            image: fm.text("image"),
            video: fm.text("video"),
            authors: authors(fm),
            venue: text("venue"),
            summary: text("summary"),
            url: text("url"),
            arxiv_url: text("arxiv_url"),
            github_url: text("github_url"),
            huggingface_url: text("huggingface_url"),
        })
    }
}

/// `authors` may be written as one string or as a list
fn authors(fm: &FrontMatter) -> String {
    fm.text("authors")
        .unwrap_or_else(|| fm.list("authors").join(", "))
}

/// Look up every required field, reporting all that are missing at once
fn require<const N: usize>(
    record: &ContentRecord,
    keys: [&'static str; N],
) -> Result<[String; N], ValidationError> {
    let values = keys.map(|key| record.front_matter.text(key));
    let absent: Vec<&'static str> = keys
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| *key)
        .collect();

    if !absent.is_empty() {
        return Err(ValidationError {
            id: record.id.clone(),
            missing: absent,
        });
    }
    Ok(values.map(Option::unwrap_or_default))
}

/// One entry of the notes index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
    /// First body image, base-path resolved; empty when there is none
    pub cover_image: String,
}

/// One entry of the papers list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub authors: String,
    pub venue: String,
    pub summary: String,
    pub url: String,
    pub arxiv_url: String,
    pub github_url: String,
    pub huggingface_url: String,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
}

/// Everything a detail page needs for one document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub cover_image: String,
    /// Rendered body with every rooted link under the base path
    pub content_html: String,

    /// Remaining front-matter fields, copied through
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}
