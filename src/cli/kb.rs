use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::store::{KnowledgeSeed, KnowledgeStore, StoreConfig};

#[derive(Args)]
pub struct KbArgs {
    #[command(subcommand)]
    pub command: KbCommand,
}

#[derive(Subcommand)]
pub enum KbCommand {
    /// Create an empty knowledge base (optionally seeded with demo data)
    Init {
        /// Path for the new knowledge base
        #[arg(long, default_value = "diagnostic.db")]
        db: PathBuf,

        /// Load the embedded demo knowledge base after creating the schema
        #[arg(long)]
        demo: bool,
    },

    /// Import a JSON seed file into a knowledge base
    Import {
        /// Path to the knowledge base (created if missing)
        #[arg(long, default_value = "diagnostic.db")]
        db: PathBuf,

        /// Seed file to import
        #[arg(required = true)]
        seed: PathBuf,
    },

    /// Export a knowledge base to a JSON seed file
    Export {
        /// Path to the knowledge base
        #[arg(long, default_value = "diagnostic.db")]
        db: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show row counts for a knowledge base
    Stats {
        /// Path to the knowledge base
        #[arg(long, default_value = "diagnostic.db")]
        db: PathBuf,
    },
}

/// Execute the kb subcommand.
///
/// # Errors
///
/// Returns an error if the database cannot be created or opened, or if a
/// seed file is missing or invalid.
pub fn run(args: &KbArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match &args.command {
        KbCommand::Init { db, demo } => {
            let mut store = KnowledgeStore::create(db, StoreConfig::default())?;
            if *demo {
                let seed = KnowledgeSeed::embedded_demo()?;
                let stats = store.import_seed(&seed)?;
                println!("Created {} with demo data: {stats}", db.display());
            } else {
                println!("Created empty knowledge base at {}", db.display());
            }
        }
        KbCommand::Import { db, seed } => {
            if verbose {
                eprintln!("Importing {} into {}", seed.display(), db.display());
            }
            let parsed = KnowledgeSeed::load_from_file(seed)?;
            let mut store = KnowledgeStore::create(db, StoreConfig::default())?;
            let stats = store.import_seed(&parsed)?;
            println!("Imported: {stats}");
        }
        KbCommand::Export { db, output } => {
            let store = KnowledgeStore::open(db, StoreConfig::default())?;
            let seed = store.export_seed()?;
            let json = serde_json::to_string_pretty(&seed)?;
            match output {
                Some(path) => {
                    std::fs::write(path, json)?;
                    println!("Exported knowledge base to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        KbCommand::Stats { db } => {
            let store = KnowledgeStore::open(db, StoreConfig::default())?;
            let stats = store.stats()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text | OutputFormat::Tsv => println!("{stats}"),
            }
        }
    }

    Ok(())
}
