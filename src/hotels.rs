//! Hotels, room types and rooms.
//!
//! Rooms exist in the core for exactly one reason: resolving which hotel a
//! booking belongs to, which is what every authorization decision keys on.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{errors::EngineError, ids::TypedUuid};

/// Hotel UUID
pub type HotelUuid = TypedUuid<Hotel>;

/// Room type UUID
pub type RoomTypeUuid = TypedUuid<RoomType>;

/// Room UUID
pub type RoomUuid = TypedUuid<Room>;

/// A property that holds rooms and access grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    /// Unique hotel identifier.
    pub uuid: HotelUuid,

    /// Hotel name.
    pub name: String,

    /// Country the hotel is located in.
    pub country: String,

    /// City the hotel is located in.
    pub city: String,

    /// Street address.
    pub street: String,
}

/// A category of rooms within one hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    /// Unique room type identifier.
    pub uuid: RoomTypeUuid,

    /// Hotel this type belongs to.
    pub hotel: HotelUuid,

    /// Type name, e.g. `Deluxe`.
    pub name: String,

    /// Guest capacity.
    pub capacity: i32,
}

/// A bookable room; belongs to exactly one hotel and one room type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub uuid: RoomUuid,

    /// Hotel this room belongs to.
    pub hotel: HotelUuid,

    /// Room type of this room.
    pub room_type: RoomTypeUuid,

    /// Human-readable room number, e.g. `ST-001`.
    pub room_number: String,
}

/// In-memory store of hotels and their rooms, keyed by identifier.
#[derive(Debug, Default)]
pub struct HotelDirectory {
    hotels: FxHashMap<HotelUuid, Hotel>,
    room_types: FxHashMap<RoomTypeUuid, RoomType>,
    rooms: FxHashMap<RoomUuid, Room>,
}

impl HotelDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hotel and returns its identifier.
    pub fn add_hotel(&mut self, hotel: Hotel) -> HotelUuid {
        let uuid = hotel.uuid;
        self.hotels.insert(uuid, hotel);
        uuid
    }

    /// Registers a room type.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::HotelNotFound`] when the referenced hotel
    /// does not resolve.
    pub fn add_room_type(&mut self, room_type: RoomType) -> Result<RoomTypeUuid, EngineError> {
        if !self.hotels.contains_key(&room_type.hotel) {
            return Err(EngineError::HotelNotFound);
        }
        let uuid = room_type.uuid;
        self.room_types.insert(uuid, room_type);
        Ok(uuid)
    }

    /// Registers a room.
    ///
    /// # Errors
    ///
    /// Fails when the referenced hotel or room type does not resolve, or
    /// when the room type belongs to a different hotel.
    pub fn add_room(&mut self, room: Room) -> Result<RoomUuid, EngineError> {
        if !self.hotels.contains_key(&room.hotel) {
            return Err(EngineError::HotelNotFound);
        }
        let Some(room_type) = self.room_types.get(&room.room_type) else {
            return Err(EngineError::RoomTypeNotFound);
        };
        if room_type.hotel != room.hotel {
            return Err(EngineError::InvalidArgument(
                "room type belongs to a different hotel",
            ));
        }
        let uuid = room.uuid;
        self.rooms.insert(uuid, room);
        Ok(uuid)
    }

    /// Looks up a hotel.
    #[must_use]
    pub fn hotel(&self, uuid: HotelUuid) -> Option<&Hotel> {
        self.hotels.get(&uuid)
    }

    /// Looks up a room.
    #[must_use]
    pub fn room(&self, uuid: RoomUuid) -> Option<&Room> {
        self.rooms.get(&uuid)
    }

    /// Resolves the hotel that owns a room.
    #[must_use]
    pub fn hotel_of_room(&self, room: RoomUuid) -> Option<HotelUuid> {
        self.rooms.get(&room).map(|r| r.hotel)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn sample_hotel() -> Hotel {
        Hotel {
            uuid: HotelUuid::new(),
            name: "Grand Paradise Hotel".to_string(),
            country: "Maldives".to_string(),
            city: "Male".to_string(),
            street: "Paradise Island Resort, North Male Atoll".to_string(),
        }
    }

    #[test]
    fn room_resolves_to_its_hotel() -> TestResult {
        let mut directory = HotelDirectory::new();
        let hotel = directory.add_hotel(sample_hotel());

        let room_type = directory.add_room_type(RoomType {
            uuid: RoomTypeUuid::new(),
            hotel,
            name: "Standard".to_string(),
            capacity: 2,
        })?;

        let room = directory.add_room(Room {
            uuid: RoomUuid::new(),
            hotel,
            room_type,
            room_number: "ST-001".to_string(),
        })?;

        assert_eq!(directory.hotel_of_room(room), Some(hotel));

        Ok(())
    }

    #[test]
    fn room_type_requires_existing_hotel() {
        let mut directory = HotelDirectory::new();

        let result = directory.add_room_type(RoomType {
            uuid: RoomTypeUuid::new(),
            hotel: HotelUuid::new(),
            name: "Deluxe".to_string(),
            capacity: 3,
        });

        assert_eq!(result, Err(EngineError::HotelNotFound));
    }

    #[test]
    fn room_rejects_type_of_another_hotel() -> TestResult {
        let mut directory = HotelDirectory::new();
        let hotel_a = directory.add_hotel(sample_hotel());
        let hotel_b = directory.add_hotel(Hotel {
            uuid: HotelUuid::new(),
            name: "City Stay".to_string(),
            country: "Latvia".to_string(),
            city: "Riga".to_string(),
            street: "Brivibas iela 1".to_string(),
        });

        let type_b = directory.add_room_type(RoomType {
            uuid: RoomTypeUuid::new(),
            hotel: hotel_b,
            name: "Economic".to_string(),
            capacity: 1,
        })?;

        let result = directory.add_room(Room {
            uuid: RoomUuid::new(),
            hotel: hotel_a,
            room_type: type_b,
            room_number: "EC-001".to_string(),
        });

        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));

        Ok(())
    }

    #[test]
    fn unknown_room_has_no_hotel() {
        let directory = HotelDirectory::new();

        assert_eq!(directory.hotel_of_room(RoomUuid::new()), None);
    }
}
