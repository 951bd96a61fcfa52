//! Document renderer - the full HTML of one content item for its detail page

use super::{ContentStore, MarkdownRenderer, RenderedDocument};
use crate::error::Result;
use crate::helpers::{cover_image, rewrite_links, BasePath};

/// Front-matter keys that never reach `RenderedDocument::extra`: the ones
/// lifted into dedicated fields, and the names of computed fields.
const NOT_EXTRA: &[&str] = &[
    "title",
    "date",
    "summary",
    "tags",
    "id",
    "coverImage",
    "cover_image",
    "contentHtml",
    "content_html",
];

/// Renders single documents under a fixed base path
pub struct DocumentRenderer {
    markdown: MarkdownRenderer,
    base: BasePath,
}

impl DocumentRenderer {
    pub fn new(markdown: MarkdownRenderer, base: BasePath) -> Self {
        Self { markdown, base }
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base
    }

    /// Render the document `id` of `store`.
    ///
    /// The id must exist (callers enumerate ids with `list_ids`). Malformed
    /// front-matter or math is an error for this document.
    pub fn render(&self, store: &ContentStore, id: &str) -> Result<RenderedDocument> {
        let record = store.read_record(id)?;
        let fm = &record.front_matter;

        let html = self.markdown.render(&record.body)?;
        let content_html = rewrite_links(&html, &self.base);

        tracing::debug!("Rendered {} ({} bytes)", id, content_html.len());

        Ok(RenderedDocument {
            id: record.id.clone(),
            title: fm.text("title"),
            date: fm.text("date"),
            summary: fm.text("summary"),
            tags: fm.list("tags"),
            cover_image: cover_image(&record.body, &self.base),
            content_html,
            extra: fm.extra(NOT_EXTRA),
        })
    }
}
