//! HTML helper functions

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser, Tag};
use regex::{Captures, Regex};

use super::url::BasePath;

lazy_static! {
    /// `src="/..."` / `href='/...'`
    static ref ROOTED_ATTR: Regex =
        Regex::new(r#"(\s(?:src|href))=(?:"(/[^"]*)"|'(/[^']*)')"#).unwrap();
}

/// Find the target of the first markdown image.
/// Image syntax inside code spans and code blocks does not count.
///
/// # Examples
/// ```ignore
/// first_image("intro ![cover](/img/a.png) ![b](/img/b.png)") // -> Some("/img/a.png")
/// ```
pub fn first_image(markdown: &str) -> Option<String> {
    Parser::new(markdown).find_map(|event| match event {
        Event::Start(Tag::Image { dest_url, .. }) => Some(dest_url.into_string()),
        _ => None,
    })
}

/// Cover image for a body: its first image, resolved under `base`
pub fn cover_image(markdown: &str, base: &BasePath) -> String {
    first_image(markdown)
        .map(|target| base.with_base_path(&target))
        .unwrap_or_default()
}

/// Prefix every rooted `src`/`href` attribute value with the base path.
///
/// Textual rewrite over rendered HTML. Protocol-relative, `data:` and
/// already-prefixed values are left alone, which also makes this idempotent.
pub fn rewrite_links(html: &str, base: &BasePath) -> String {
    if base.is_root() {
        return html.to_string();
    }

    ROOTED_ATTR
        .replace_all(html, |caps: &Captures| {
            let attr = &caps[1];
            match (caps.get(2), caps.get(3)) {
                (Some(value), _) => format!(r#"{}="{}""#, attr, base.with_base_path(value.as_str())),
                (_, Some(value)) => format!("{}='{}'", attr, base.with_base_path(value.as_str())),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
