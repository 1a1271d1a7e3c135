//! Command-line interface for dx-solver.
//!
//! The CLI is the reference "external collaborator" of the core: it resolves
//! human input into symptom identifiers before invoking the engine and
//! renders the ranked output. It holds no decision logic of its own.
//!
//! ## Usage
//!
//! ```text
//! # Create a demo knowledge base
//! dx-solver kb init --db diagnostic.db --demo
//!
//! # Browse symptoms grouped by body system
//! dx-solver symptoms --db diagnostic.db
//!
//! # Rank plausible diseases for a symptom selection
//! dx-solver diagnose --db diagnostic.db --symptoms 1,12,14
//!
//! # Risk factors for a chosen disease, JSON output
//! dx-solver risks 2 --db diagnostic.db --format json
//! ```

use clap::{Parser, Subcommand};

pub mod diagnose;
pub mod kb;
pub mod risks;
pub mod symptoms;

#[derive(Parser)]
#[command(name = "dx-solver")]
#[command(version)]
#[command(about = "Narrow a differential diagnosis from selected symptoms")]
#[command(
    long_about = "dx-solver matches a set of selected symptoms against a relational knowledge base of diseases, symptoms, and risk factors.\n\nFor each plausible disease it reports how much of the disease's symptom profile the selection covers and how diagnostic the matched symptoms are, ranked by the product of the two."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all symptoms, grouped by body system
    Symptoms(symptoms::SymptomsArgs),

    /// Rank plausible diseases for a symptom selection
    Diagnose(diagnose::DiagnoseArgs),

    /// Show risk factors for a disease
    Risks(risks::RisksArgs),

    /// Manage the knowledge base
    Kb(kb::KbArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
