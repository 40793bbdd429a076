//! Visible Bookings Handlers
//!
//! Tenant-scoped reads: only bookings of hotels the operator holds any grant
//! for. View access suffices.

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use innkeeper::operators::OperatorUuid;

use crate::{
    bookings::{errors::into_status_error, index::BookingsResponse, parse_status},
    extensions::*,
    state::State,
};

/// Visible Bookings Handler
///
/// Returns every booking visible to the operator.
#[endpoint(tags("bookings"), summary = "List Visible Bookings")]
pub(crate) async fn handler(
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let bookings = state
        .app
        .bookings
        .list_bookings_for_operator(OperatorUuid::from_uuid(operator.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookingsResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// Visible Bookings By Status Handler
///
/// Returns the visible set, filtered to one status.
#[endpoint(tags("bookings"), summary = "List Visible Bookings By Status")]
pub(crate) async fn by_status_handler(
    status: PathParam<String>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = parse_status(&status.into_inner())?;

    let bookings = state
        .app
        .bookings
        .list_bookings_for_operator_by_status(
            OperatorUuid::from_uuid(operator.into_inner()),
            status,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookingsResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use innkeeper::bookings::BookingStatus;
    use innkeeper_app::bookings::MockBookingsService;

    use crate::test_helpers::{bookings_service, make_booking, TEST_OPERATOR_UUID};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings").push(
                Router::with_path("my-hotels")
                    .get(handler)
                    .push(Router::with_path("status/{status}").get(by_status_handler)),
            ),
        )
    }

    #[tokio::test]
    async fn test_my_hotels_scopes_to_the_operator() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings_for_operator()
            .once()
            .withf(|operator| operator.into_uuid() == TEST_OPERATOR_UUID)
            .return_once(|_| Ok(vec![make_booking()]));

        let response: BookingsResponse = TestClient::get(format!(
            "http://example.com/bookings/my-hotels?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await
        .take_json()
        .await?;

        assert_eq!(response.bookings.len(), 1, "expected one visible booking");

        Ok(())
    }

    #[tokio::test]
    async fn test_my_hotels_requires_the_operator_param() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_list_bookings_for_operator().never();

        let res = TestClient::get("http://example.com/bookings/my-hotels")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_my_hotels_by_status_forwards_both_filters() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings_for_operator_by_status()
            .once()
            .withf(|operator, status| {
                operator.into_uuid() == TEST_OPERATOR_UUID && *status == BookingStatus::Refused
            })
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get(format!(
            "http://example.com/bookings/my-hotels/status/REFUSED?operator={TEST_OPERATOR_UUID}"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
