//! Content store scanner - enumerates and parses the files of one content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentRecord, FrontMatter};
use crate::error::{ContentError, Result};

/// Extensions recognized as content, in lookup priority order
const EXTENSIONS: &[&str] = &["md", "markdown"];

/// A flat directory of markdown files, one per item
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse every content file in the directory.
    ///
    /// A missing directory is an empty store. Malformed front-matter in any
    /// file fails the whole call.
    pub fn list_records(&self) -> Result<Vec<ContentRecord>> {
        self.content_files()
            .into_iter()
            .map(|(id, path)| read_record(id, path))
            .collect()
    }

    /// Ids of every content file, without parsing them
    pub fn list_ids(&self) -> Vec<String> {
        self.content_files().into_iter().map(|(id, _)| id).collect()
    }

    /// Read the record for one id
    pub fn read_record(&self, id: &str) -> Result<ContentRecord> {
        let path = self.path_for(id).ok_or_else(|| ContentError::NotFound {
            id: id.to_string(),
            dir: self.dir.clone(),
        })?;
        read_record(id.to_string(), path)
    }

    /// Locate the file behind an id
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let is_plain_stem = !id.is_empty()
            && !id.contains(['/', '\\'])
            && id != "."
            && id != "..";
        if !is_plain_stem {
            return None;
        }

        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", id, ext)))
            .find(|path| path.is_file())
    }

    /// (id, path) of every content file, sorted by file name.
    /// When two files share a stem, the extension earlier in `EXTENSIONS` wins.
    fn content_files(&self) -> Vec<(String, PathBuf)> {
        if !self.dir.is_dir() {
            tracing::warn!(
                "Content directory {:?} not found, nothing will be listed",
                self.dir
            );
            return Vec::new();
        }

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut files: Vec<(String, PathBuf)> = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_content_file(path) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping content file with a non UTF-8 name: {:?}", path);
                continue;
            };

            match index.get(id) {
                None => {
                    index.insert(id.to_string(), files.len());
                    files.push((id.to_string(), path.to_path_buf()));
                }
                Some(&i) => {
                    let ignored = if extension_rank(path) < extension_rank(&files[i].1) {
                        std::mem::replace(&mut files[i].1, path.to_path_buf())
                    } else {
                        path.to_path_buf()
                    };
                    tracing::warn!("Duplicate content id '{}', ignoring {:?}", id, ignored);
                }
            }
        }

        files
    }
}

fn read_record(id: String, path: PathBuf) -> Result<ContentRecord> {
    let content = fs::read_to_string(&path).map_err(|e| ContentError::read(&path, e))?;
    let (front_matter, body) = FrontMatter::parse(&content, &path)?;
    let body = body.to_string();

    tracing::debug!("Loaded {} ({} front-matter fields)", id, front_matter.len());

    Ok(ContentRecord {
        id,
        path,
        front_matter,
        body,
    })
}

/// Check if a file is a content (markdown) file
fn is_content_file(path: &Path) -> bool {
    extension_rank(path).is_some()
}

fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    EXTENSIONS.iter().position(|known| *known == ext)
}
