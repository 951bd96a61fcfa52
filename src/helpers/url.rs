//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    /// `scheme://...` or protocol-relative `//...`
    static ref ABSOLUTE_URL: Regex = Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.\-]*:)?//").unwrap();
}

/// Deployment sub-path the whole site is served under.
///
/// Always either empty (served from the domain root) or a string starting
/// with `/` and never ending with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BasePath(String);

impl BasePath {
    /// Normalize a configured base path
    ///
    /// # Examples
    /// ```ignore
    /// BasePath::new("/site/").as_str() // -> "/site"
    /// BasePath::new("/").as_str()      // -> ""
    /// BasePath::new("site").as_str()   // -> "/site"
    /// ```
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::root();
        }
        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{}", trimmed))
        }
    }

    /// The empty base path (site served from the domain root)
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Recover the base path from asset URLs a page has already loaded.
    ///
    /// The prefix is whatever precedes `marker` (e.g. `/_next/`) in the first
    /// site-relative URL containing it. Falls back to `fallback` when no URL
    /// carries the marker.
    pub fn detect<'a, I>(asset_urls: I, marker: &str, fallback: &BasePath) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for url in asset_urls {
            if !url.starts_with('/') || ABSOLUTE_URL.is_match(url) {
                continue;
            }
            if let Some(pos) = url.find(marker) {
                let detected = Self::new(&url[..pos]);
                tracing::debug!("Detected base path {:?} from {}", detected.as_str(), url);
                return detected;
            }
        }
        fallback.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefix a site-relative path with this base path
    ///
    /// # Examples
    /// ```ignore
    /// let base = BasePath::new("/site");
    /// base.with_base_path("/img/1.jpg")          // -> "/site/img/1.jpg"
    /// base.with_base_path("/site/img/1.jpg")     // -> "/site/img/1.jpg"
    /// base.with_base_path("https://x.com/a")     // -> "https://x.com/a"
    /// base.with_base_path("img/1.jpg")           // -> "img/1.jpg"
    /// ```
    pub fn with_base_path(&self, input: &str) -> String {
        if input.is_empty() || is_absolute_url(input) || input.starts_with("data:") {
            return input.to_string();
        }
        if self.is_root() || self.is_prefix_of(input) {
            return input.to_string();
        }
        if input.starts_with('/') {
            format!("{}{}", self.0, input)
        } else {
            input.to_string()
        }
    }

    /// Whether `input` already lives under this base path
    fn is_prefix_of(&self, input: &str) -> bool {
        match input.strip_prefix(self.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a URL has a `scheme://` form or is protocol-relative
pub fn is_absolute_url(input: &str) -> bool {
    ABSOLUTE_URL.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "/",
        "/img/1.jpg",
        "/site",
        "/site/",
        "/site/img/1.jpg",
        "/sitemap.xml",
        "img/1.jpg",
        "./img/1.jpg",
        "#anchor",
        "https://x.com/a",
        "http://x.com/a",
        "//cdn.example.com/lib.js",
        "data:image/png;base64,AAA",
        "mailto:me@example.com",
    ];

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(BasePath::new("").as_str(), "");
        assert_eq!(BasePath::new("/").as_str(), "");
        assert_eq!(BasePath::new("  /site/ ").as_str(), "/site");
        assert_eq!(BasePath::new("site").as_str(), "/site");
        assert_eq!(BasePath::new("/a/b//").as_str(), "/a/b");
    }

    #[test]
    fn test_base_path_shape() {
        for raw in ["", "/", "//", "/site", "site/", "/a/b/"] {
            let base = BasePath::new(raw);
            let s = base.as_str();
            assert!(s.is_empty() || (s.starts_with('/') && !s.ends_with('/')), "{raw:?}");
        }
    }

    #[test]
    fn test_with_base_path() {
        let base = BasePath::new("/site");
        assert_eq!(base.with_base_path("/img/1.jpg"), "/site/img/1.jpg");
        assert_eq!(base.with_base_path("/site/img/1.jpg"), "/site/img/1.jpg");
        assert_eq!(base.with_base_path("/site"), "/site");
        assert_eq!(base.with_base_path("/sitemap.xml"), "/site/sitemap.xml");
        assert_eq!(base.with_base_path("img/1.jpg"), "img/1.jpg");
        assert_eq!(base.with_base_path(""), "");
    }

    #[test]
    fn test_absolute_passthrough() {
        let base = BasePath::new("/site");
        assert_eq!(base.with_base_path("https://x.com/a"), "https://x.com/a");
        assert_eq!(base.with_base_path("//cdn.example.com/a"), "//cdn.example.com/a");
        assert_eq!(base.with_base_path("ftp://files.example.com/a"), "ftp://files.example.com/a");
        assert_eq!(
            base.with_base_path("data:image/png;base64,AAA"),
            "data:image/png;base64,AAA"
        );
    }

    #[test]
    fn test_root_base_path_is_identity() {
        let base = BasePath::root();
        for s in SAMPLES {
            assert_eq!(base.with_base_path(s), *s);
        }
    }

    #[test]
    fn test_with_base_path_idempotent() {
        for raw in ["", "/site", "/a/b"] {
            let base = BasePath::new(raw);
            for s in SAMPLES {
                let once = base.with_base_path(s);
                assert_eq!(base.with_base_path(&once), once, "base={raw:?} input={s:?}");
            }
        }
    }

    #[test]
    fn test_detect_base_path() {
        let fallback = BasePath::new("/configured");
        let urls = [
            "https://cdn.example.com/_next/static/x.js",
            "/aca-web-html/_next/static/chunks/main.js",
        ];
        assert_eq!(
            BasePath::detect(urls, "/_next/", &fallback).as_str(),
            "/aca-web-html"
        );
        assert_eq!(
            BasePath::detect(["/_next/static/a.css"], "/_next/", &fallback).as_str(),
            ""
        );
        assert_eq!(
            BasePath::detect(["/img/a.png"], "/_next/", &fallback),
            fallback
        );
    }
}
