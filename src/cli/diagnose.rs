use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::disease::DiseaseMatch;
use crate::core::types::SymptomId;
use crate::matching::MatchingEngine;
use crate::store::{KnowledgeStore, StoreConfig};

#[derive(Args)]
pub struct DiagnoseArgs {
    /// Path to the knowledge base
    #[arg(long, default_value = "diagnostic.db")]
    pub db: PathBuf,

    /// Selected symptom ids, comma-separated (from `dx-solver symptoms`)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub symptoms: Vec<i64>,
}

/// Execute the diagnose subcommand.
///
/// # Errors
///
/// Returns an error if the selection is empty or the knowledge base cannot
/// be read.
pub fn run(args: &DiagnoseArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // The empty case never reaches the engine: surface it as a user-facing
    // message here, at the boundary where the selection was produced.
    if args.symptoms.is_empty() {
        anyhow::bail!("select at least one symptom (see `dx-solver symptoms`)");
    }

    let selection: Vec<SymptomId> = args.symptoms.iter().map(|&id| SymptomId(id)).collect();

    let store = KnowledgeStore::open(&args.db, StoreConfig::default())?;
    let engine = MatchingEngine::new(&store);
    let ranked = engine.match_diseases(&selection)?;

    if verbose {
        eprintln!(
            "Ranked {} candidates from {} selected symptoms against {}",
            ranked.len(),
            selection.len(),
            args.db.display()
        );
    }

    if ranked.is_empty() {
        eprintln!("No disease matched at least two of the selected symptoms.");
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_results(&ranked),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranked)?),
        OutputFormat::Tsv => print_tsv_results(&ranked),
    }

    Ok(())
}

fn print_text_results(ranked: &[DiseaseMatch]) {
    for (i, candidate) in ranked.iter().enumerate() {
        if i > 0 {
            println!("{}", "-".repeat(50));
        }
        println!(
            "#{} {} ({}% match)",
            i + 1,
            candidate.disease_name,
            candidate.match_percentage
        );
        println!("   Specificity: {}%", candidate.specificity_score);
        println!(
            "   Symptoms: {} of {} in profile",
            candidate.matching_symptoms, candidate.total_disease_symptoms
        );
        println!("   {}", candidate.description);
    }
}

fn print_tsv_results(ranked: &[DiseaseMatch]) {
    println!(
        "disease_id\tdisease_name\tmatching_symptoms\ttotal_disease_symptoms\tmatch_percentage\tspecificity_score"
    );
    for candidate in ranked {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            candidate.disease_id,
            candidate.disease_name,
            candidate.matching_symptoms,
            candidate.total_disease_symptoms,
            candidate.match_percentage,
            candidate.specificity_score
        );
    }
}
