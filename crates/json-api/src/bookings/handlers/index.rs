//! Booking Index Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse, parse_status},
    extensions::*,
    state::State,
};

/// A list of bookings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingsResponse {
    /// The list of bookings
    pub bookings: Vec<BookingResponse>,
}

/// Booking Index Handler
///
/// Returns every booking. Trusted administrative read.
#[endpoint(tags("bookings"), summary = "List Bookings")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let bookings = state
        .app
        .bookings
        .list_bookings()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookingsResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// Bookings By Status Handler
///
/// Returns every booking holding the given status.
#[endpoint(tags("bookings"), summary = "List Bookings By Status")]
pub(crate) async fn by_status_handler(
    status: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = parse_status(&status.into_inner())?;

    let bookings = state
        .app
        .bookings
        .list_bookings_by_status(status)
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

    use crate::test_helpers::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings")
                .get(handler)
                .push(Router::with_path("status/{status}").get(by_status_handler)),
        )
    }

    #[tokio::test]
    async fn test_index_returns_bookings() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .return_once(|| Ok(vec![make_booking(), make_booking()]));

        let response: BookingsResponse = TestClient::get("http://example.com/bookings")
            .send(&make_service(bookings))
            .await
            .take_json()
            .await?;

        assert_eq!(response.bookings.len(), 2, "expected two bookings");

        Ok(())
    }

    #[tokio::test]
    async fn test_by_status_forwards_the_parsed_status() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings_by_status()
            .once()
            .withf(|status| *status == BookingStatus::Confirmed)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/bookings/status/CONFIRMED")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_by_status_rejects_unknown_names() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_list_bookings_by_status().never();

        let res = TestClient::get("http://example.com/bookings/status/LOST")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
