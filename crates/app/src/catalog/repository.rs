//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use innkeeper::{
    hotels::{Hotel, HotelUuid, Room, RoomType, RoomTypeUuid, RoomUuid},
    operators::{Operator, OperatorUuid},
};

use crate::catalog::data::{NewHotel, NewOperator, NewRoom, NewRoomType};

const INSERT_OPERATOR_SQL: &str = include_str!("sql/insert_operator.sql");
const FIND_OPERATOR_SQL: &str = include_str!("sql/find_operator.sql");
const INSERT_HOTEL_SQL: &str = include_str!("sql/insert_hotel.sql");
const INSERT_ROOM_TYPE_SQL: &str = include_str!("sql/insert_room_type.sql");
const INSERT_ROOM_SQL: &str = include_str!("sql/insert_room.sql");

/// PostgreSQL-backed catalog repository for operators, hotels and rooms.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: &NewOperator,
    ) -> Result<Operator, sqlx::Error> {
        query_as::<Postgres, OperatorRow>(INSERT_OPERATOR_SQL)
            .bind(operator.uuid.into_uuid())
            .bind(&operator.name)
            .bind(&operator.email)
            .bind(&operator.password_hash)
            .bind(&operator.role)
            .fetch_one(&mut **tx)
            .await
            .map(OperatorRow::into_operator)
    }

    pub(crate) async fn find_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
    ) -> Result<Option<Operator>, sqlx::Error> {
        query_as::<Postgres, OperatorRow>(FIND_OPERATOR_SQL)
            .bind(operator.into_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map(|row| row.map(OperatorRow::into_operator))
    }

    pub(crate) async fn insert_hotel(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        hotel: &NewHotel,
    ) -> Result<Hotel, sqlx::Error> {
        query_as::<Postgres, HotelRow>(INSERT_HOTEL_SQL)
            .bind(hotel.uuid.into_uuid())
            .bind(&hotel.name)
            .bind(&hotel.country)
            .bind(&hotel.city)
            .bind(&hotel.street)
            .fetch_one(&mut **tx)
            .await
            .map(HotelRow::into_hotel)
    }

    pub(crate) async fn insert_room_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_type: &NewRoomType,
    ) -> Result<RoomType, sqlx::Error> {
        query_as::<Postgres, RoomTypeRow>(INSERT_ROOM_TYPE_SQL)
            .bind(room_type.uuid.into_uuid())
            .bind(room_type.hotel.into_uuid())
            .bind(&room_type.name)
            .bind(room_type.capacity)
            .fetch_one(&mut **tx)
            .await
            .map(RoomTypeRow::into_room_type)
    }

    pub(crate) async fn insert_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: &NewRoom,
    ) -> Result<Room, sqlx::Error> {
        query_as::<Postgres, RoomRow>(INSERT_ROOM_SQL)
            .bind(room.uuid.into_uuid())
            .bind(room.hotel.into_uuid())
            .bind(room.room_type.into_uuid())
            .bind(&room.room_number)
            .fetch_one(&mut **tx)
            .await
            .map(RoomRow::into_room)
    }
}

struct OperatorRow {
    uuid: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
}

impl OperatorRow {
    fn into_operator(self) -> Operator {
        Operator {
            uuid: OperatorUuid::from_uuid(self.uuid),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for OperatorRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
        })
    }
}

struct HotelRow {
    uuid: Uuid,
    name: String,
    country: String,
    city: String,
    street: String,
}

impl HotelRow {
    fn into_hotel(self) -> Hotel {
        Hotel {
            uuid: HotelUuid::from_uuid(self.uuid),
            name: self.name,
            country: self.country,
            city: self.city,
            street: self.street,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for HotelRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            country: row.try_get("country")?,
            city: row.try_get("city")?,
            street: row.try_get("street")?,
        })
    }
}

struct RoomTypeRow {
    uuid: Uuid,
    hotel_uuid: Uuid,
    name: String,
    capacity: i32,
}

impl RoomTypeRow {
    fn into_room_type(self) -> RoomType {
        RoomType {
            uuid: RoomTypeUuid::from_uuid(self.uuid),
            hotel: HotelUuid::from_uuid(self.hotel_uuid),
            name: self.name,
            capacity: self.capacity,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for RoomTypeRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            hotel_uuid: row.try_get("hotel_uuid")?,
            name: row.try_get("name")?,
            capacity: row.try_get("capacity")?,
        })
    }
}

struct RoomRow {
    uuid: Uuid,
    hotel_uuid: Uuid,
    room_type_uuid: Uuid,
    room_number: String,
}

impl RoomRow {
    fn into_room(self) -> Room {
        Room {
            uuid: RoomUuid::from_uuid(self.uuid),
            hotel: HotelUuid::from_uuid(self.hotel_uuid),
            room_type: RoomTypeUuid::from_uuid(self.room_type_uuid),
            room_number: self.room_number,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for RoomRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            hotel_uuid: row.try_get("hotel_uuid")?,
            room_type_uuid: row.try_get("room_type_uuid")?,
            room_number: row.try_get("room_number")?,
        })
    }
}
