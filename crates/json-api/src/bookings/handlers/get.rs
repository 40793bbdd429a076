//! Get Booking Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use innkeeper::bookings::{Booking, BookingUuid};

use crate::{bookings::errors::into_status_error, extensions::*, state::State};

/// One booking as transported over the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    /// The unique identifier of the booking
    pub uuid: Uuid,

    /// The room the booking is for
    pub room_uuid: Uuid,

    /// The client the booking belongs to
    pub client_uuid: Uuid,

    /// Start of the stay
    pub check_in: String,

    /// End of the stay
    pub check_out: String,

    /// Names of the guests staying
    pub guest_names: String,

    /// Free-form special requests
    pub special_requests: Option<String>,

    /// Current lifecycle status
    pub status: String,

    /// Why the booking was refused, while refused
    pub refusal_reason: Option<String>,

    /// Operator that performed the last status change
    pub updated_by: Option<Uuid>,

    /// When the last status change happened
    pub last_updated_at: Option<String>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        BookingResponse {
            uuid: booking.uuid.into(),
            room_uuid: booking.room.into(),
            client_uuid: booking.client,
            check_in: booking.check_in.to_string(),
            check_out: booking.check_out.to_string(),
            guest_names: booking.guest_names,
            special_requests: booking.special_requests,
            status: booking.status.to_string(),
            refusal_reason: booking.refusal_reason,
            updated_by: booking.updated_by.map(Uuid::from),
            last_updated_at: booking.last_updated_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Get Booking Handler
///
/// Returns a single booking.
#[endpoint(tags("bookings"), summary = "Get Booking")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .get_booking(BookingUuid::from_uuid(uuid.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use innkeeper_app::bookings::{BookingsServiceError, MockBookingsService};

    use crate::test_helpers::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings").push(Router::with_path("{uuid}").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_get_booking_returns_the_booking() -> TestResult {
        let booking = make_booking();
        let uuid = booking.uuid;

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(booking));

        let response: BookingResponse = TestClient::get(format!("http://example.com/bookings/{uuid}"))
            .send(&make_service(bookings))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.status, "CREATED");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_booking_returns_404() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .return_once(|_| Err(BookingsServiceError::NotFound));

        let uuid = Uuid::nil();
        let res = TestClient::get(format!("http://example.com/bookings/{uuid}"))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
