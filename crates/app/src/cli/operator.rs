//! Operator management commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use innkeeper::operators::OperatorUuid;
use innkeeper_app::catalog::{data::NewOperator, CatalogService, PgCatalogService};

#[derive(Debug, Args)]
pub(crate) struct OperatorCommand {
    #[command(subcommand)]
    command: OperatorSubcommand,
}

#[derive(Debug, Subcommand)]
enum OperatorSubcommand {
    /// Register a new operator
    Create(CreateOperatorArgs),
}

#[derive(Debug, Args)]
struct CreateOperatorArgs {
    /// Operator display name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Credential to hash and store
    #[arg(long)]
    password: String,

    /// Role label
    #[arg(long, default_value = "MANAGER")]
    role: String,

    /// Optional operator UUID; generated when omitted
    #[arg(long)]
    operator_uuid: Option<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(command: OperatorCommand) -> Result<(), String> {
    match command.command {
        OperatorSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateOperatorArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let db = super::connect(&args.database_url).await?;
    let service = PgCatalogService::new(db);

    let uuid = args
        .operator_uuid
        .map_or_else(OperatorUuid::new, OperatorUuid::from_uuid);

    let operator = service
        .create_operator(NewOperator {
            uuid,
            name: args.name,
            email: args.email,
            password_hash: super::hash_password(&args.password),
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create operator: {error}"))?;

    println!("operator_uuid: {}", operator.uuid);
    println!("operator_name: {}", operator.name);
    println!("operator_role: {}", operator.role);

    Ok(())
}
