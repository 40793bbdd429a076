//! Cancel Booking Handlers

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

/// Cancel Booking Handler
///
/// Cancels a `CREATED` or `CONFIRMED` booking on behalf of the operator.
#[endpoint(tags("bookings"), summary = "Cancel Booking")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .cancel_booking(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

/// Cancel Booking (Access-Controlled) Handler
///
/// As the plain cancel, after verifying the operator may manage the
/// booking's hotel.
#[endpoint(tags("bookings"), summary = "Cancel Booking With Access Control")]
pub(crate) async fn secure_handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .cancel_booking_with_access_control(
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

    use innkeeper_app::bookings::{BookingsServiceError, MockBookingsService};

    use crate::test_helpers::{bookings_service, cancelled_booking, TEST_OPERATOR_UUID};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings").push(
                Router::with_path("{uuid}").push(
                    Router::with_path("cancel")
                        .patch(handler)
                        .push(Router::with_path("secure").patch(secure_handler)),
                ),
            ),
        )
    }

    #[tokio::test]
    async fn test_cancel_returns_the_cancelled_booking() -> TestResult {
        let booking = cancelled_booking();
        let uuid = booking.uuid;

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_cancel_booking()
            .once()
            .withf(move |requested, operator| {
                *requested == uuid && operator.into_uuid() == TEST_OPERATOR_UUID
            })
            .return_once(move |_, _| Ok(booking));

        let response: BookingResponse = TestClient::patch(format!(
            "http://example.com/bookings/{uuid}/cancel?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await
        .take_json()
        .await?;

        assert_eq!(response.status, "CANCELLED");

        Ok(())
    }

    #[tokio::test]
    async fn test_secure_cancel_delegates_to_the_gated_operation() -> TestResult {
        let booking = cancelled_booking();
        let uuid = booking.uuid;

        let mut bookings = MockBookingsService::new();

        bookings.expect_cancel_booking().never();
        bookings
            .expect_cancel_booking_with_access_control()
            .once()
            .withf(move |requested, operator| {
                *requested == uuid && operator.into_uuid() == TEST_OPERATOR_UUID
            })
            .return_once(move |_, _| Ok(booking));

        let res = TestClient::patch(format!(
            "http://example.com/bookings/{uuid}/cancel/secure?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_unknown_booking_returns_404() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_cancel_booking()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::NotFound));

        let uuid = Uuid::nil();
        let res = TestClient::patch(format!(
            "http://example.com/bookings/{uuid}/cancel?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
