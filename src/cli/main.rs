//! Command line interface for the retail ETL pipeline

use clap::{Parser, Subcommand};

mod commands;

use commands::init::InitArgs;
use commands::run::RunArgs;

#[derive(Parser)]
#[command(
    name = "retail-etl",
    version,
    about = "Batch ETL for retail sales records"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the extract-transform-load pipeline once
    Run(RunArgs),
    /// Create the sales table without running the pipeline
    Init(InitArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => commands::run::handle_run(&args),
        Command::Init(args) => commands::init::handle_init(&args),
    };

    if let Err(e) = result {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
