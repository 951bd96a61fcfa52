//! Listing assembler - validated, date-ordered summaries for index pages

use std::collections::HashSet;

use super::{ContentRecord, ContentStore, NoteMetadata, NoteSummary, PaperMetadata, PaperSummary};
use crate::error::{Result, ValidationError};
use crate::helpers::{cover_image, BasePath};

/// An entry that can be built from a content record and listed by date
pub trait ListingEntry: Sized {
    fn from_record(record: &ContentRecord, base: &BasePath) -> Result<Self, ValidationError>;

    fn id(&self) -> &str;

    /// Sort key; lexically comparable
    fn date(&self) -> &str;
}

impl ListingEntry for NoteSummary {
    fn from_record(record: &ContentRecord, base: &BasePath) -> Result<Self, ValidationError> {
        let meta = NoteMetadata::from_record(record)?;
        Ok(NoteSummary {
            id: record.id.clone(),
            title: meta.title,
            date: meta.date,
            summary: meta.summary,
            tags: meta.tags,
            cover_image: cover_image(&record.body, base),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> &str {
        &self.date
    }
}

impl ListingEntry for PaperSummary {
    fn from_record(record: &ContentRecord, base: &BasePath) -> Result<Self, ValidationError> {
        let meta = PaperMetadata::from_record(record)?;
        let image = meta.image.as_deref().map(|image| base.with_base_path(image));
        let video = meta.video.as_deref().map(|video| base.with_base_path(video));

        // Papers without a body image fall back to their declared thumbnail
        let mut cover = cover_image(&record.body, base);
        if cover.is_empty() {
            cover = image.clone().unwrap_or_default();
        }

        Ok(PaperSummary {
            id: record.id.clone(),
            title: meta.title,
            date: meta.date,
            image,
            video,
            authors: meta.authors,
            venue: meta.venue,
            summary: meta.summary,
            url: meta.url,
            arxiv_url: meta.arxiv_url,
            github_url: meta.github_url,
            huggingface_url: meta.huggingface_url,
            cover_image: cover,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> &str {
        &self.date
    }
}

/// Build the listing for a sequence of records.
///
/// Invalid records and repeated ids are dropped with a warning. The result
/// is sorted by date, newest first; entries with equal dates keep their
/// input order.
pub fn assemble<T: ListingEntry>(records: &[ContentRecord], base: &BasePath) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        match T::from_record(record, base) {
            Ok(entry) => {
                if !seen.insert(entry.id().to_string()) {
                    tracing::warn!("Duplicate id '{}' will be skipped", entry.id());
                    continue;
                }
                if record.front_matter.parse_date().is_none() {
                    tracing::debug!(
                        "'{}' has an unrecognized date {:?}; ordering is lexical",
                        entry.id(),
                        entry.date()
                    );
                }
                entries.push(entry);
            }
            Err(e) => tracing::warn!("{}; it will be skipped", e),
        }
    }

    // `sort_by` is stable
    entries.sort_by(|a, b| b.date().cmp(a.date()));
    entries
}

/// Listings for each content kind
pub struct Listing;

impl Listing {
    /// Notes index, newest first
    pub fn notes(store: &ContentStore, base: &BasePath) -> Result<Vec<NoteSummary>> {
        Ok(assemble(&store.list_records()?, base))
    }

    /// Papers list, newest first
    pub fn papers(store: &ContentStore, base: &BasePath) -> Result<Vec<PaperSummary>> {
        Ok(assemble(&store.list_records()?, base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn record(id: &str, content: &str) -> ContentRecord {
        let path = PathBuf::from(format!("{}.md", id));
        let (front_matter, body) = FrontMatter::parse(content, &path).unwrap();
        ContentRecord {
            id: id.to_string(),
            path,
            front_matter,
            body: body.to_string(),
        }
    }

    fn note(id: &str, date: &str) -> ContentRecord {
        record(
            id,
            &format!("---\ntitle: {id}\ndate: {date}\nsummary: about {id}\n---\n"),
        )
    }

    fn ids<T: ListingEntry>(entries: &[T]) -> Vec<&str> {
        entries.iter().map(|e| e.id()).collect()
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_sorted_newest_first() {
        let records = vec![
            note("old", "2023-01-01"),
            note("new", "2024-06-01"),
            note("mid", "2024-01-01"),
        ];
        let notes: Vec<NoteSummary> = assemble(&records, &BasePath::root());
        assert_eq!(ids(&notes), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let records = vec![
            note("first", "2024-01-01"),
            note("newest", "2024-02-01"),
            note("second", "2024-01-01"),
            note("third", "2024-01-01"),
        ];
        let notes: Vec<NoteSummary> = assemble(&records, &BasePath::root());
        assert_eq!(ids(&notes), vec!["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_missing_required_fields_are_dropped() {
        let records = vec![
            note("ok", "2024-01-01"),
            record("no-summary", "---\ntitle: T\ndate: 2024-01-01\n---\n"),
            record("no-title", "---\ndate: 2024-01-01\nsummary: s\n---\n"),
            record("empty-date", "---\ntitle: T\ndate: ''\nsummary: s\n---\n"),
            record("bare", "just a body"),
        ];
        let notes: Vec<NoteSummary> = assemble(&records, &BasePath::root());
        assert_eq!(ids(&notes), vec!["ok"]);
        for n in &notes {
            assert!(!n.title.is_empty() && !n.date.is_empty() && !n.summary.is_empty());
        }
    }

    #[test]
    fn test_validation_reports_every_missing_field() {
        let err = NoteMetadata::from_record(&record("bare", "body")).unwrap_err();
        assert_eq!(err.id, "bare");
        assert_eq!(err.missing, vec!["title", "date", "summary"]);

        let zero = record("zero", "---\ndate: 2024-01-01\nsummary: 0\n---\n");
        let err = NoteMetadata::from_record(&zero).unwrap_err();
        assert_eq!(err.missing, vec!["title", "summary"]);

        let meta = NoteMetadata::from_record(&note("ok", "2024-01-01")).unwrap();
        assert_eq!(
            (meta.title.as_str(), meta.date.as_str(), meta.summary.as_str()),
            ("ok", "2024-01-01", "about ok")
        );
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let records = vec![note("a", "2024-01-01"), note("a", "2025-01-01")];
        let notes: Vec<NoteSummary> = assemble(&records, &BasePath::root());
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].date, "2024-01-01");
    }

    #[test]
    fn test_tags_and_cover_image() {
        let records = vec![record(
            "tagged",
            "---\ntitle: T\ndate: 2024-01-01\nsummary: s\ntags: [ml, math]\n---\nIntro\n\n![cover](/img/cover.png)\n\n![second](/img/2.png)\n",
        )];
        let notes: Vec<NoteSummary> = assemble(&records, &BasePath::new("/site"));
        assert_eq!(notes[0].tags, vec!["ml", "math"]);
        assert_eq!(notes[0].cover_image, "/site/img/cover.png");

        let untagged: Vec<NoteSummary> = assemble(&[note("plain", "2024-01-01")], &BasePath::root());
        assert!(untagged[0].tags.is_empty());
        assert_eq!(untagged[0].cover_image, "");
    }

    #[test]
    fn test_papers() {
        let records = vec![
            record(
                "diffusion",
                "---\ntitle: Diffusion\ndate: 2023-05-01\nimage: /img/diffusion.png\nauthors: [A. Author, B. Author]\nvenue: NeurIPS\narxiv_url: https://arxiv.org/abs/0000.0000\n---\n",
            ),
            record("undated", "---\ntitle: Undated\n---\n"),
            record("transformer", "---\ntitle: Transformer\ndate: 2024-02-01\n---\n![fig](/img/fig.png)"),
        ];
        let papers: Vec<PaperSummary> = assemble(&records, &BasePath::new("/site"));
        assert_eq!(ids(&papers), vec!["transformer", "diffusion"]);

        let diffusion = &papers[1];
        assert_eq!(diffusion.image.as_deref(), Some("/site/img/diffusion.png"));
        assert_eq!(diffusion.cover_image, "/site/img/diffusion.png");
        assert_eq!(diffusion.authors, "A. Author, B. Author");
        assert_eq!(diffusion.summary, "");
        assert_eq!(diffusion.arxiv_url, "https://arxiv.org/abs/0000.0000");

        assert_eq!(papers[0].image, None);
        assert_eq!(papers[0].cover_image, "/site/img/fig.png");
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = ContentStore::new(tmp.path().join("_notes"));
        assert!(Listing::notes(&store, &BasePath::root()).unwrap().is_empty());
        assert!(Listing::papers(&store, &BasePath::root()).unwrap().is_empty());
    }

    #[test]
    fn test_notes_directory_newest_first() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.md",
            "---\ntitle: A\ndate: 2024-01-01\nsummary: s1\n---\n",
        );
        write(
            tmp.path(),
            "b.md",
            "---\ntitle: B\ndate: 2024-06-01\nsummary: s2\n---\n",
        );

        let notes = Listing::notes(&ContentStore::new(tmp.path()), &BasePath::root()).unwrap();
        assert_eq!(ids(&notes), vec!["b", "a"]);
    }

    #[test]
    fn test_note_without_summary_is_excluded() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "draft.md", "---\ntitle: Draft\ndate: 2024-01-01\n---\n");
        write(
            tmp.path(),
            "done.md",
            "---\ntitle: Done\ndate: 2024-01-02\nsummary: s\n---\n",
        );

        let notes = Listing::notes(&ContentStore::new(tmp.path()), &BasePath::root()).unwrap();
        assert_eq!(ids(&notes), vec!["done"]);
    }
}
