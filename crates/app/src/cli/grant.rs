//! Access grant management commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use innkeeper::{access::AccessLevel, hotels::HotelUuid, operators::OperatorUuid};
use innkeeper_app::access::{data::NewAccessGrant, AccessService, PgAccessService};

#[derive(Debug, Args)]
pub(crate) struct GrantCommand {
    #[command(subcommand)]
    command: GrantSubcommand,
}

#[derive(Debug, Subcommand)]
enum GrantSubcommand {
    /// Grant an operator access to a hotel
    Create(CreateGrantArgs),
    /// Revoke an operator's access to a hotel
    Revoke(RevokeGrantArgs),
    /// List grants for an operator or a hotel
    List(ListGrantArgs),
}

#[derive(Debug, Args)]
struct CreateGrantArgs {
    /// UUID of the acting operator; must own the hotel
    #[arg(long)]
    acting: Uuid,

    /// UUID of the operator receiving the grant
    #[arg(long)]
    operator: Uuid,

    /// UUID of the hotel
    #[arg(long)]
    hotel: Uuid,

    /// Access level: VIEWER, MANAGER or OWNER
    #[arg(long)]
    level: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct RevokeGrantArgs {
    /// UUID of the acting operator; must own the hotel
    #[arg(long)]
    acting: Uuid,

    /// UUID of the operator losing the grant
    #[arg(long)]
    operator: Uuid,

    /// UUID of the hotel
    #[arg(long)]
    hotel: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct ListGrantArgs {
    /// List grants held by this operator UUID
    #[arg(long, conflicts_with = "hotel")]
    operator: Option<Uuid>,

    /// List grants attached to this hotel UUID
    #[arg(long)]
    hotel: Option<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(command: GrantCommand) -> Result<(), String> {
    match command.command {
        GrantSubcommand::Create(args) => create(args).await,
        GrantSubcommand::Revoke(args) => revoke(args).await,
        GrantSubcommand::List(args) => list(args).await,
    }
}

async fn create(args: CreateGrantArgs) -> Result<(), String> {
    let level = args
        .level
        .parse::<AccessLevel>()
        .map_err(|error| format!("{error}: {}", args.level))?;

    let db = super::connect(&args.database_url).await?;
    let service = PgAccessService::new(db);

    let grant = service
        .grant_access(
            OperatorUuid::from_uuid(args.acting),
            NewAccessGrant {
                operator: OperatorUuid::from_uuid(args.operator),
                hotel: HotelUuid::from_uuid(args.hotel),
                level,
            },
        )
        .await
        .map_err(|error| format!("failed to create grant: {error}"))?;

    println!(
        "granted {} on {} to {}",
        grant.level, grant.hotel, grant.operator
    );

    Ok(())
}

async fn revoke(args: RevokeGrantArgs) -> Result<(), String> {
    let db = super::connect(&args.database_url).await?;
    let service = PgAccessService::new(db);

    service
        .revoke_access(
            OperatorUuid::from_uuid(args.acting),
            OperatorUuid::from_uuid(args.operator),
            HotelUuid::from_uuid(args.hotel),
        )
        .await
        .map_err(|error| format!("failed to revoke grant: {error}"))?;

    println!("grant revoked");

    Ok(())
}

async fn list(args: ListGrantArgs) -> Result<(), String> {
    let db = super::connect(&args.database_url).await?;
    let service = PgAccessService::new(db);

    let grants = match (args.operator, args.hotel) {
        (Some(operator), None) => service
            .grants_for_operator(OperatorUuid::from_uuid(operator))
            .await
            .map_err(|error| format!("failed to list grants: {error}"))?,
        (None, Some(hotel)) => service
            .grants_for_hotel(HotelUuid::from_uuid(hotel))
            .await
            .map_err(|error| format!("failed to list grants: {error}"))?,
        _ => return Err("pass exactly one of --operator or --hotel".to_string()),
    };

    for grant in grants {
        println!(
            "{}\t{}\t{}\tgranted_at={}",
            grant.operator, grant.hotel, grant.level, grant.granted_at
        );
    }

    Ok(())
}
