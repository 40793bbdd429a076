//! Hotel management commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use innkeeper::{hotels::HotelUuid, operators::OperatorUuid};
use innkeeper_app::catalog::{data::NewHotel, CatalogService, PgCatalogService};

#[derive(Debug, Args)]
pub(crate) struct HotelCommand {
    #[command(subcommand)]
    command: HotelSubcommand,
}

#[derive(Debug, Subcommand)]
enum HotelSubcommand {
    /// Register a new hotel owned by an existing operator
    Create(CreateHotelArgs),
}

#[derive(Debug, Args)]
struct CreateHotelArgs {
    /// UUID of the operator creating the hotel; becomes its owner
    #[arg(long)]
    owner: Uuid,

    /// Hotel name
    #[arg(long)]
    name: String,

    /// Country
    #[arg(long)]
    country: String,

    /// City
    #[arg(long)]
    city: String,

    /// Street address
    #[arg(long)]
    street: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(command: HotelCommand) -> Result<(), String> {
    match command.command {
        HotelSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateHotelArgs) -> Result<(), String> {
    let db = super::connect(&args.database_url).await?;
    let service = PgCatalogService::new(db);

    let hotel = service
        .create_hotel(
            OperatorUuid::from_uuid(args.owner),
            NewHotel {
                uuid: HotelUuid::new(),
                name: args.name,
                country: args.country,
                city: args.city,
                street: args.street,
            },
        )
        .await
        .map_err(|error| format!("failed to create hotel: {error}"))?;

    println!("hotel_uuid: {}", hotel.uuid);
    println!("hotel_name: {}", hotel.name);

    Ok(())
}
