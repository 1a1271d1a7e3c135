use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod store;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("dx_solver=debug,info")
    } else {
        EnvFilter::new("dx_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match &cli.command {
        cli::Commands::Symptoms(args) => {
            cli::symptoms::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Diagnose(args) => {
            cli::diagnose::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Risks(args) => {
            cli::risks::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Kb(args) => {
            cli::kb::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
