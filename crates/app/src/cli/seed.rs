//! Demo dataset loader.

use clap::Args;
use tracing::info;

use innkeeper::{
    hotels::{HotelUuid, RoomTypeUuid, RoomUuid},
    operators::OperatorUuid,
};
use innkeeper_app::catalog::{
    data::{NewHotel, NewOperator, NewRoom, NewRoomType},
    CatalogService, PgCatalogService,
};

/// Room types of the demo hotel: name, capacity, room count and room-number
/// prefix.
const ROOM_TYPES: [(&str, i32, u32, &str); 7] = [
    ("Standard", 2, 10, "ST"),
    ("Standard Sea View", 2, 8, "SV"),
    ("Deluxe", 3, 6, "DX"),
    ("Comfort", 2, 7, "CF"),
    ("King Size", 2, 5, "KS"),
    ("Presidential", 4, 2, "PR"),
    ("Economic", 1, 8, "EC"),
];

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let db = super::connect(&args.database_url).await?;
    let catalog = PgCatalogService::new(db);

    info!("loading demo dataset");

    let owner = catalog
        .create_operator(NewOperator {
            uuid: OperatorUuid::new(),
            name: "John Smith".to_string(),
            email: "admin@grandhotel.com".to_string(),
            password_hash: super::hash_password("secret"),
            role: "ADMIN".to_string(),
        })
        .await
        .map_err(|error| format!("failed to create demo operator: {error}"))?;

    let hotel = catalog
        .create_hotel(
            owner.uuid,
            NewHotel {
                uuid: HotelUuid::new(),
                name: "Grand Paradise Hotel".to_string(),
                country: "Maldives".to_string(),
                city: "Male".to_string(),
                street: "Paradise Island Resort, North Male Atoll".to_string(),
            },
        )
        .await
        .map_err(|error| format!("failed to create demo hotel: {error}"))?;

    let mut rooms = 0;
    for (name, capacity, count, prefix) in ROOM_TYPES {
        let room_type = catalog
            .create_room_type(NewRoomType {
                uuid: RoomTypeUuid::new(),
                hotel: hotel.uuid,
                name: name.to_string(),
                capacity,
            })
            .await
            .map_err(|error| format!("failed to create room type {name}: {error}"))?;

        for index in 1..=count {
            catalog
                .create_room(NewRoom {
                    uuid: RoomUuid::new(),
                    hotel: hotel.uuid,
                    room_type: room_type.uuid,
                    room_number: format!("{prefix}-{index:03}"),
                })
                .await
                .map_err(|error| format!("failed to create room {prefix}-{index:03}: {error}"))?;
            rooms += 1;
        }

        info!(room_type = name, count, "room type created");
    }

    println!("operator_uuid: {}", owner.uuid);
    println!("hotel_uuid: {}", hotel.uuid);
    println!("room_types: {}", ROOM_TYPES.len());
    println!("rooms: {rooms}");

    Ok(())
}
