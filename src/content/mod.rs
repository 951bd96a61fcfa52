//! Content module - scanning, listing and rendering of notes and papers

mod document;
mod frontmatter;
mod listing;
mod markdown;
mod models;
mod scanner;

pub use document::DocumentRenderer;
pub use frontmatter::FrontMatter;
pub use listing::{assemble, Listing, ListingEntry};
pub use markdown::MarkdownRenderer;
pub use models::{
    ContentRecord, NoteMetadata, NoteSummary, PaperMetadata, PaperSummary, RenderedDocument,
};
pub use scanner::ContentStore;
