//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;

use crate::error::{ContentError, Result};

const DELIMITER: &str = "---";

/// Front-matter block of a content file, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter(IndexMap<String, Value>);

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A file without a leading `---` line has no front-matter and the whole
    /// file is the body. Once a block is opened it must close and hold a YAML
    /// mapping; anything else is an authoring error for `path`.
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let (first_line, rest) = match content.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (content, ""),
        };
        if first_line.trim_end() != DELIMITER {
            return Ok((FrontMatter::default(), content));
        }

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..offset];
                let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                let fm = Self::parse_yaml(yaml, path)?;
                return Ok((fm, remaining));
            }
            offset += line.len();
        }

        Err(malformed(path, "missing closing `---`"))
    }

    fn parse_yaml(yaml: &str, path: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| malformed(path, &e.to_string()))?;

        let mapping = match value {
            Value::Null => return Ok(FrontMatter::default()),
            Value::Mapping(mapping) => mapping,
            _ => return Err(malformed(path, "expected a mapping of `key: value` pairs")),
        };

        let mut fields = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            match key {
                Value::String(key) => {
                    fields.insert(key, value);
                }
                other => {
                    return Err(malformed(
                        path,
                        &format!("non-string key {}", describe(&other)),
                    ))
                }
            }
        }
        Ok(FrontMatter(fields))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A field as text. Missing, empty, zero and non-scalar values are `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()) => {
                Some(n.to_string())
            }
            _ => None,
        }
    }

    /// A field as a list of strings, accepting a single string too
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Every field except the `known` ones
    pub fn extra(&self, known: &[&str]) -> IndexMap<String, Value> {
        self.0
            .iter()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Parse the date field into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.text("date").and_then(|s| parse_date_string(&s))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "<unprintable>".to_string())
}

fn malformed(path: &Path, message: &str) -> ContentError {
    ContentError::FrontMatter {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        // Date-only formats
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    // RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<(FrontMatter, &str)> {
        FrontMatter::parse(content, Path::new("test.md"))
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
summary: A first note
tags:
  - rust
  - math
---

This is the content.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm.text("title"), Some("Hello World".to_string()));
        assert_eq!(fm.text("date"), Some("2024-01-15".to_string()));
        assert_eq!(fm.list("tags"), vec!["rust", "math"]);
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_keys_keep_declaration_order() {
        let (fm, _) = parse("---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody").unwrap();
        let keys: Vec<_> = fm.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_single_string_tags() {
        let (fm, _) = parse("---\ntitle: Single Tag\ntags: Notes\n---\nContent here.\n").unwrap();
        assert_eq!(fm.list("tags"), vec!["Notes"]);
        assert!(fm.list("missing").is_empty());
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\n---\n\nwith a rule";
        let (fm, remaining) = parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, remaining) = parse("---\n---\nbody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm.text("title"), Some("Windows".to_string()));
        assert_eq!(remaining, "body\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_fatal() {
        let err = parse("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_non_mapping_is_fatal() {
        let err = parse("---\n- just\n- a list\n---\nbody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_unclosed_block_is_fatal() {
        let err = parse("---\ntitle: Never closed\n\nbody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_falsy_values_are_absent() {
        let (fm, _) = parse(
            "---\ntitle: ''\nsummary: ~\nyear: 2024\ndraft: false\ncount: 0\nscore: 0.0\nnan: .nan\n---\n",
        )
        .unwrap();
        assert_eq!(fm.text("title"), None);
        assert_eq!(fm.text("count"), None);
        assert_eq!(fm.text("score"), None);
        assert_eq!(fm.text("nan"), None);
        assert_eq!(fm.text("summary"), None);
        assert_eq!(fm.text("draft"), None);
        assert_eq!(fm.text("year"), Some("2024".to_string()));
    }

    #[test]
    fn test_parse_date() {
        let (fm, _) = parse("---\ndate: 2024-01-15 10:30:00\n---\n").unwrap();
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");

        let (fm, _) = parse("---\ndate: sometime last spring\n---\n").unwrap();
        assert!(fm.parse_date().is_none());
    }
}
