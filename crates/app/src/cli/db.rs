//! Database maintenance commands.

use clap::{Args, Subcommand};

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply the schema to the target database
    Init(InitArgs),
}

#[derive(Debug, Args)]
struct InitArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Init(args) => init(args).await,
    }
}

async fn init(args: InitArgs) -> Result<(), String> {
    let db = super::connect(&args.database_url).await?;

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(db.pool())
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema applied");

    Ok(())
}
