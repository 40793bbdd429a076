//! Confirm Booking Handlers

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

/// Confirm Booking Handler
///
/// Confirms a `CREATED` booking on behalf of the operator.
#[endpoint(tags("bookings"), summary = "Confirm Booking")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .confirm_booking(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

/// Confirm Booking (Access-Controlled) Handler
///
/// As the plain confirm, after verifying the operator may manage the
/// booking's hotel.
#[endpoint(tags("bookings"), summary = "Confirm Booking With Access Control")]
pub(crate) async fn secure_handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .confirm_booking_with_access_control(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}
