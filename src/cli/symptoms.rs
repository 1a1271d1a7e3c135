use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::MatchingEngine;
use crate::store::{KnowledgeStore, StoreConfig};

#[derive(Args)]
pub struct SymptomsArgs {
    /// Path to the knowledge base
    #[arg(long, default_value = "diagnostic.db")]
    pub db: PathBuf,
}

/// Execute the symptoms subcommand.
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be opened or read.
pub fn run(args: &SymptomsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = KnowledgeStore::open(&args.db, StoreConfig::default())?;
    let engine = MatchingEngine::new(&store);
    let symptoms = engine.list_symptoms()?;

    if verbose {
        eprintln!("Loaded {} symptoms from {}", symptoms.len(), args.db.display());
    }

    match format {
        OutputFormat::Text => {
            // Group under body-system headings, mirroring how a selection
            // tree would present them
            let mut current_system: Option<&str> = None;
            for symptom in &symptoms {
                if current_system != Some(symptom.system_name.as_str()) {
                    current_system = Some(symptom.system_name.as_str());
                    println!("\n{}", symptom.system_name);
                }
                println!(
                    "  [{}] {} ({}/5)",
                    symptom.symptom_id, symptom.symptom_name, symptom.severity_scale
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&symptoms)?);
        }
        OutputFormat::Tsv => {
            println!("symptom_id\tsymptom_name\tsystem_name\tseverity_scale");
            for symptom in &symptoms {
                println!(
                    "{}\t{}\t{}\t{}",
                    symptom.symptom_id,
                    symptom.symptom_name,
                    symptom.system_name,
                    symptom.severity_scale
                );
            }
        }
    }

    Ok(())
}
