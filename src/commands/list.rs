//! List site content

use anyhow::Result;

use crate::content::Listing;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "note" | "notes" => {
            let notes = Listing::notes(&site.notes(), &site.base_path)?;
            println!("Notes ({}):", notes.len());
            for note in notes {
                println!("  {} - {} [{}]", note.date, note.title, note.id);
                if !note.tags.is_empty() {
                    println!("      tags: {}", note.tags.join(", "));
                }
            }
        }
        "paper" | "papers" => {
            let papers = Listing::papers(&site.papers(), &site.base_path)?;
            println!("Papers ({}):", papers.len());
            for paper in papers {
                if paper.venue.is_empty() {
                    println!("  {} - {} [{}]", paper.date, paper.title, paper.id);
                } else {
                    println!(
                        "  {} - {} ({}) [{}]",
                        paper.date, paper.title, paper.venue, paper.id
                    );
                }
            }
        }
        "id" | "ids" => {
            let ids = site.notes().list_ids();
            println!("Note pages ({}):", ids.len());
            for id in ids {
                println!("  {}", site.base_path.with_base_path(&format!("/notes/{}", id)));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: notes, papers, ids",
                content_type
            );
        }
    }

    Ok(())
}
