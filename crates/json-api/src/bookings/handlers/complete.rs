//! Complete Booking Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use innkeeper::{bookings::BookingUuid, operators::OperatorUuid};

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    extensions::*,
    state::State,
};

/// Complete Booking Handler
///
/// Completes a `CONFIRMED` booking on behalf of the operator.
#[endpoint(tags("bookings"), summary = "Complete Booking")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .complete_booking(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

/// Complete Booking (Access-Controlled) Handler
///
/// As the plain complete, after verifying the operator may manage the
/// booking's hotel.
#[endpoint(tags("bookings"), summary = "Complete Booking With Access Control")]
pub(crate) async fn secure_handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .complete_booking_with_access_control(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use innkeeper::bookings::BookingStatus;
    use innkeeper_app::bookings::{BookingsServiceError, MockBookingsService};

    use crate::test_helpers::{bookings_service, completed_booking, TEST_OPERATOR_UUID};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings").push(
                Router::with_path("{uuid}").push(
                    Router::with_path("complete")
                        .patch(handler)
                        .push(Router::with_path("secure").patch(secure_handler)),
                ),
            ),
        )
    }

    #[tokio::test]
    async fn test_complete_returns_the_completed_booking() -> TestResult {
        let booking = completed_booking();
        let uuid = booking.uuid;

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_complete_booking()
            .once()
            .withf(move |requested, operator| {
                *requested == uuid && operator.into_uuid() == TEST_OPERATOR_UUID
            })
            .return_once(move |_, _| Ok(booking));

        let response: BookingResponse = TestClient::patch(format!(
            "http://example.com/bookings/{uuid}/complete?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await
        .take_json()
        .await?;

        assert_eq!(response.status, "COMPLETED");

        Ok(())
    }

    #[tokio::test]
    async fn test_complete_of_unconfirmed_booking_returns_400() -> TestResult {
        let booking = completed_booking();
        let uuid = booking.uuid;

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_complete_booking()
            .once()
            .return_once(|_, _| {
                Err(BookingsServiceError::InvalidState {
                    expected: BookingStatus::Confirmed,
                    actual: BookingStatus::Created,
                })
            });

        let res = TestClient::patch(format!(
            "http://example.com/bookings/{uuid}/complete?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_secure_complete_denied_returns_403() -> TestResult {
        let booking = completed_booking();
        let uuid = booking.uuid;

        let mut bookings = MockBookingsService::new();

        bookings.expect_complete_booking().never();
        bookings
            .expect_complete_booking_with_access_control()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::AccessDenied));

        let res = TestClient::patch(format!(
            "http://example.com/bookings/{uuid}/complete/secure?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
