//! CLI for cataloging song decks and assembling new ones.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use praise_index::{search, DocumentStore, SearchMode};
use praise_pptx::DeckExtractor;
use praise_synth::Synthesizer;
use std::path::{Path, PathBuf};

/// Catalog song lyrics from PPTX decks and assemble new decks from them.
#[derive(Parser, Debug)]
#[command(name = "praise")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the JSON catalog file
    #[arg(long, global = true, default_value = "praise_index.json")]
    store: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the catalog from every .pptx file in a folder
    Index {
        /// Folder containing the song decks
        #[arg(short, long)]
        source: PathBuf,

        /// Drop repeated lines within a slide
        #[arg(long)]
        dedup: bool,
    },

    /// Add a single deck to an existing catalog
    Add {
        /// Deck to add
        file: PathBuf,

        /// Drop repeated lines within a slide
        #[arg(long)]
        dedup: bool,
    },

    /// Remove a song from the catalog by id
    Remove {
        /// Catalog id of the song
        id: u64,
    },

    /// Search the catalog
    Search {
        /// Query text
        query: String,

        /// Fields to match: title, lyrics, or both
        #[arg(short, long, default_value = "both")]
        mode: String,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Build a deck from cataloged songs
    Make {
        /// Song titles, in presentation order
        #[arg(required = true)]
        titles: Vec<String>,

        /// Deck whose styling and masters the output should reuse
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "praise_deck.pptx")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Index { source, dedup } => {
            let mut store = store_with_dedup(&args.store, dedup);
            if !store.rebuild_all(&source) {
                bail!("indexing {} failed", source.display());
            }
            println!(
                "Indexed {} decks into {}",
                store.documents().len(),
                args.store.display()
            );
        }
        Command::Add { file, dedup } => {
            let mut store = store_with_dedup(&args.store, dedup);
            store.load_from_store();
            if !store.add_single(&file) {
                bail!("could not add {}", file.display());
            }
            if !store.save_to_store() {
                bail!("could not save {}", args.store.display());
            }
            println!("Added {}", file.display());
        }
        Command::Remove { id } => {
            let mut store = DocumentStore::new(&args.store);
            if !store.load_from_store() {
                bail!("could not load {}", args.store.display());
            }
            store.remove_by_id(id);
            if !store.save_to_store() {
                bail!("could not save {}", args.store.display());
            }
            println!("Removed id {}", id);
        }
        Command::Search { query, mode, limit } => {
            let query = query.trim();
            if query.is_empty() {
                bail!("search query is empty");
            }
            let mode: SearchMode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;

            let mut store = DocumentStore::new(&args.store);
            if !store.load_from_store() {
                bail!("could not load {}", args.store.display());
            }

            let results = search(store.documents(), query, mode);
            if results.is_empty() {
                println!("No matches for '{}'", query);
            }
            for doc in results.iter().take(limit) {
                println!("{:>4}  {}  ({})", doc.id, doc.title, doc.filename);
                if args.verbose {
                    for line in doc.lyrics.lines().take(2) {
                        println!("      {}", line);
                    }
                }
            }
        }
        Command::Make {
            titles,
            template,
            output,
        } => {
            let mut synthesizer = Synthesizer::new(&args.store);
            if let Some(template) = template {
                synthesizer = synthesizer.with_template(template);
            }
            match synthesizer.synthesize(&titles, &output) {
                Some(written) => println!("Wrote {}", written.display()),
                None => bail!("no deck was written"),
            }
        }
    }

    Ok(())
}

fn store_with_dedup(store_path: &Path, dedup: bool) -> DocumentStore {
    DocumentStore::new(store_path).with_extractor(DeckExtractor::new().with_dedup(dedup))
}
