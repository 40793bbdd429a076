//! Bookings endpoints.

use salvo::http::StatusError;

use innkeeper::bookings::BookingStatus;

pub(crate) mod errors;

mod handlers;

pub(crate) use handlers::*;

/// Parses a status path segment, rejecting unknown names with a 400.
pub(crate) fn parse_status(raw: &str) -> Result<BookingStatus, StatusError> {
    raw.parse::<BookingStatus>()
        .map_err(|_ignored| StatusError::bad_request().brief("Unrecognized booking status"))
}
