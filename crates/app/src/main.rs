//! Innkeeper administration CLI

use std::process;

use clap::{Parser, Subcommand};

mod cli;

#[derive(Debug, Parser)]
#[command(name = "innkeeper-app", about = "Innkeeper administration CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db(cli::db::DbCommand),
    /// Load the demo dataset
    Seed(cli::seed::SeedArgs),
    /// Operator management
    Operator(cli::operator::OperatorCommand),
    /// Hotel management
    Hotel(cli::hotel::HotelCommand),
    /// Access grant management
    Grant(cli::grant::GrantCommand),
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(command) => cli::db::run(command).await,
        Commands::Seed(args) => cli::seed::run(args).await,
        Commands::Operator(command) => cli::operator::run(command).await,
        Commands::Hotel(command) => cli::hotel::run(command).await,
        Commands::Grant(command) => cli::grant::run(command).await,
    }
}
