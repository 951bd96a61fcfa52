//! Export listing and detail-page data

use anyhow::{Context, Result};
use notify::Watcher;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::Listing;
use crate::data;
use crate::Site;

/// Write the data every page needs into the public directory:
/// `notes.json`, `notes/<id>.json`, `papers.json`, `honors.json` and
/// `travel.json`.
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();
    let base = &site.base_path;
    let public = &site.public_dir;

    fs::create_dir_all(public.join("notes"))?;

    let notes_store = site.notes();
    let notes = Listing::notes(&notes_store, base)?;
    write_json(&public.join("notes.json"), &notes)?;

    let renderer = site.document_renderer();
    let ids = notes_store.list_ids();
    for id in &ids {
        let doc = renderer
            .render(&notes_store, id)
            .with_context(|| format!("Failed to render note '{}'", id))?;
        write_json(&public.join("notes").join(format!("{}.json", id)), &doc)?;
    }

    let papers = Listing::papers(&site.papers(), base)?;
    write_json(&public.join("papers.json"), &papers)?;

    let honors = data::load_honors(&site.data_dir)?;
    write_json(&public.join(data::HONORS_FILE), &honors)?;

    let travel = data::load_travel(&site.data_dir)?;
    write_json(&public.join(data::TRAVEL_FILE), &travel)?;

    tracing::info!(
        "Exported {} notes ({} pages), {} papers, {} honors, {} places under base path {:?}",
        notes.len(),
        ids.len(),
        papers.len(),
        honors.len(),
        travel.len(),
        base.as_str()
    );

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Watch the content directories and regenerate on change
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&site.notes_dir, &site.papers_dir, &site.data_dir] {
        if dir.exists() {
            watcher.watch(dir.as_path(), notify::RecursiveMode::NonRecursive)?;
        }
    }

    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("Content changed, regenerating...");
                    if let Err(e) = run(site) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
