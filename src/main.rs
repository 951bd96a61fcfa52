//! CLI entry point for scholar-pages

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scholar-pages")]
#[command(version)]
#[command(about = "Content pipeline for a statically exported academic homepage", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export listing and note data into the public folder
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Print the rendered HTML of one note
    Render {
        /// Note id (file name without extension)
        id: String,

        /// Print the full page data as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// List site content
    List {
        /// Type of content to list (notes, papers, ids)
        #[arg(default_value = "notes")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "scholar_pages=debug,info"
    } else {
        "scholar_pages=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine site directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Generate { watch } => {
            let site = scholar_pages::Site::new(&base_dir)?;
            tracing::info!("Generating site data...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                scholar_pages::commands::generate::watch(&site)?;
            }
        }

        Commands::Render { id, json } => {
            let site = scholar_pages::Site::new(&base_dir)?;
            scholar_pages::commands::render::run(&site, &id, json)?;
        }

        Commands::List { r#type } => {
            let site = scholar_pages::Site::new(&base_dir)?;
            scholar_pages::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = scholar_pages::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("scholar-pages version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
