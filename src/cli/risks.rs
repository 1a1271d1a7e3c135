use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::DiseaseId;
use crate::matching::MatchingEngine;
use crate::store::{KnowledgeStore, StoreConfig};

#[derive(Args)]
pub struct RisksArgs {
    /// Disease id (from `dx-solver diagnose`)
    #[arg(required = true)]
    pub disease_id: i64,

    /// Path to the knowledge base
    #[arg(long, default_value = "diagnostic.db")]
    pub db: PathBuf,
}

/// Execute the risks subcommand.
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be read. An unknown
/// disease id is not an error; it prints an empty result.
pub fn run(args: &RisksArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = KnowledgeStore::open(&args.db, StoreConfig::default())?;
    let engine = MatchingEngine::new(&store);
    let factors = engine.risk_factors(DiseaseId(args.disease_id))?;

    if verbose {
        eprintln!(
            "Found {} risk factors for disease {}",
            factors.len(),
            args.disease_id
        );
    }

    if factors.is_empty() {
        eprintln!("No risk factors recorded for disease {}.", args.disease_id);
        return Ok(());
    }

    match format {
        OutputFormat::Text => {
            for factor in &factors {
                println!("[{}] {}", factor.risk_level, factor.factor_name);
                println!("   {}", factor.description);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&factors)?),
        OutputFormat::Tsv => {
            println!("factor_name\trisk_level\tdescription");
            for factor in &factors {
                println!(
                    "{}\t{}\t{}",
                    factor.factor_name, factor.risk_level, factor.description
                );
            }
        }
    }

    Ok(())
}
