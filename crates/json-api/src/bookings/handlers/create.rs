//! Create Booking Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use innkeeper::{
    bookings::{BookingUuid, NewBooking},
    hotels::RoomUuid,
};

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    extensions::*,
    state::State,
};

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookingRequest {
    /// Room to book
    pub room_uuid: Uuid,

    /// Client the booking belongs to
    pub client_uuid: Uuid,

    /// Start of the stay, RFC 3339
    pub check_in: String,

    /// End of the stay, RFC 3339; must be after `check_in`
    pub check_out: String,

    /// Names of the guests staying
    pub guest_names: String,

    /// Free-form special requests
    pub special_requests: Option<String>,
}

/// Create Booking Handler
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let check_in = parse_timestamp(&request.check_in, "check_in")?;
    let check_out = parse_timestamp(&request.check_out, "check_out")?;

    let booking = state
        .app
        .bookings
        .create_booking(NewBooking {
            uuid: BookingUuid::new(),
            room: RoomUuid::from_uuid(request.room_uuid),
            client: request.client_uuid,
            check_in,
            check_out,
            guest_names: request.guest_names,
            special_requests: request.special_requests,
        })
        .await
        .map_err(into_status_error)?;

    let uuid = booking.uuid;

    res.add_header(LOCATION, format!("/bookings/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(booking.into()))
}

fn parse_timestamp(raw: &str, field: &str) -> Result<Timestamp, StatusError> {
    raw.parse::<Timestamp>()
        .map_err(|_ignored| StatusError::bad_request().brief(format!("Invalid {field} timestamp")))
}
