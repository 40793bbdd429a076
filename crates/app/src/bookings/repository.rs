//! Bookings Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use innkeeper::{
    bookings::{Booking, BookingStatus, BookingUuid},
    hotels::{HotelUuid, RoomUuid},
    operators::OperatorUuid,
};

const FIND_BOOKING_SQL: &str = include_str!("sql/find_booking.sql");
const LIST_BOOKINGS_SQL: &str = include_str!("sql/list_bookings.sql");
const LIST_BOOKINGS_BY_STATUS_SQL: &str = include_str!("sql/list_bookings_by_status.sql");
const LIST_BOOKINGS_FOR_OPERATOR_SQL: &str = include_str!("sql/list_bookings_for_operator.sql");
const LIST_BOOKINGS_FOR_OPERATOR_BY_STATUS_SQL: &str =
    include_str!("sql/list_bookings_for_operator_by_status.sql");
const INSERT_BOOKING_SQL: &str = include_str!("sql/insert_booking.sql");
const APPLY_TRANSITION_SQL: &str = include_str!("sql/apply_transition.sql");

/// PostgreSQL-backed bookings repository.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetches one booking together with the hotel owning its room.
    pub(crate) async fn find_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<(Booking, HotelUuid), sqlx::Error> {
        query_as::<Postgres, BookingRow>(FIND_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
            .map(BookingRow::into_parts)
    }

    pub(crate) async fn list_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        query_as::<Postgres, BookingRow>(LIST_BOOKINGS_SQL)
            .fetch_all(&mut **tx)
            .await
            .map(into_bookings)
    }

    pub(crate) async fn list_bookings_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        query_as::<Postgres, BookingRow>(LIST_BOOKINGS_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_all(&mut **tx)
            .await
            .map(into_bookings)
    }

    pub(crate) async fn list_bookings_for_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        query_as::<Postgres, BookingRow>(LIST_BOOKINGS_FOR_OPERATOR_SQL)
            .bind(operator.into_uuid())
            .fetch_all(&mut **tx)
            .await
            .map(into_bookings)
    }

    pub(crate) async fn list_bookings_for_operator_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        query_as::<Postgres, BookingRow>(LIST_BOOKINGS_FOR_OPERATOR_BY_STATUS_SQL)
            .bind(operator.into_uuid())
            .bind(status.as_str())
            .fetch_all(&mut **tx)
            .await
            .map(into_bookings)
    }

    pub(crate) async fn insert_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &Booking,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.room.into_uuid())
            .bind(booking.client)
            .bind(SqlxTimestamp::from(booking.check_in))
            .bind(SqlxTimestamp::from(booking.check_out))
            .bind(&booking.guest_names)
            .bind(booking.special_requests.as_deref())
            .bind(booking.status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Writes a transition compare-on-write: the row is only updated while it
    /// still holds `prior`. Returns the number of rows affected; zero means a
    /// concurrent transition won.
    pub(crate) async fn apply_transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &Booking,
        prior: BookingStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = query(APPLY_TRANSITION_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.status.as_str())
            .bind(booking.refusal_reason.as_deref())
            .bind(booking.updated_by.map(Uuid::from))
            .bind(booking.last_updated_at.map(SqlxTimestamp::from))
            .bind(prior.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> Vec<Booking> {
    rows.into_iter().map(BookingRow::into_booking).collect()
}

/// One booking row joined with the hotel its room belongs to.
struct BookingRow {
    uuid: Uuid,
    room_uuid: Uuid,
    hotel_uuid: Uuid,
    client_uuid: Uuid,
    check_in: SqlxTimestamp,
    check_out: SqlxTimestamp,
    guest_names: String,
    special_requests: Option<String>,
    status: BookingStatus,
    refusal_reason: Option<String>,
    updated_by: Option<Uuid>,
    last_updated_at: Option<SqlxTimestamp>,
}

impl BookingRow {
    fn into_parts(self) -> (Booking, HotelUuid) {
        let hotel = HotelUuid::from_uuid(self.hotel_uuid);
        (self.into_booking(), hotel)
    }

    fn into_booking(self) -> Booking {
        Booking {
            uuid: BookingUuid::from_uuid(self.uuid),
            room: RoomUuid::from_uuid(self.room_uuid),
            client: self.client_uuid,
            check_in: self.check_in.to_jiff(),
            check_out: self.check_out.to_jiff(),
            guest_names: self.guest_names,
            special_requests: self.special_requests,
            status: self.status,
            refusal_reason: self.refusal_reason,
            updated_by: self.updated_by.map(Into::into),
            last_updated_at: self.last_updated_at.map(SqlxTimestamp::to_jiff),
        }
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<BookingStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            room_uuid: row.try_get("room_uuid")?,
            hotel_uuid: row.try_get("hotel_uuid")?,
            client_uuid: row.try_get("client_uuid")?,
            check_in: row.try_get("check_in")?,
            check_out: row.try_get("check_out")?,
            guest_names: row.try_get("guest_names")?,
            special_requests: row.try_get("special_requests")?,
            status,
            refusal_reason: row.try_get("refusal_reason")?,
            updated_by: row.try_get("updated_by")?,
            last_updated_at: row.try_get("last_updated_at")?,
        })
    }
}
