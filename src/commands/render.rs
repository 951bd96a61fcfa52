//! Render a single note

use anyhow::{Context, Result};

use crate::Site;

/// Print the HTML fragment of note `id`, or its full JSON props with `json`
pub fn run(site: &Site, id: &str, json: bool) -> Result<()> {
    let doc = site
        .document_renderer()
        .render(&site.notes(), id)
        .with_context(|| format!("Failed to render note '{}'", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", doc.content_html);
    }

    Ok(())
}
