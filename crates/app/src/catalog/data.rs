//! Catalog Data

use innkeeper::{
    hotels::{HotelUuid, RoomTypeUuid, RoomUuid},
    operators::OperatorUuid,
};

/// New Operator Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOperator {
    /// UUID to assign to the operator row.
    pub uuid: OperatorUuid,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Hash of the operator's credential.
    pub password_hash: String,

    /// Role label.
    pub role: String,
}

/// New Hotel Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    /// UUID to assign to the hotel row.
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

/// New Room Type Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomType {
    /// UUID to assign to the room type row.
    pub uuid: RoomTypeUuid,

    /// Hotel this type belongs to.
    pub hotel: HotelUuid,

    /// Type name.
    pub name: String,

    /// Guest capacity.
    pub capacity: i32,
}

/// New Room Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    /// UUID to assign to the room row.
    pub uuid: RoomUuid,

    /// Hotel this room belongs to.
    pub hotel: HotelUuid,

    /// Room type of this room.
    pub room_type: RoomTypeUuid,

    /// Human-readable room number.
    pub room_number: String,
}
