//! Refuse Booking Handlers

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use innkeeper::{bookings::BookingUuid, operators::OperatorUuid};

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    extensions::*,
    state::State,
};

/// Refuse Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefuseRequest {
    /// Why the booking is being refused; must not be blank
    pub reason: String,
}

/// Refuse Booking Handler
///
/// Refuses a `CREATED` booking with a reason.
#[endpoint(tags("bookings"), summary = "Refuse Booking")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    json: JsonBody<RefuseRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .refuse_booking(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
            json.into_inner().reason,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

/// Refuse Booking (Access-Controlled) Handler
///
/// As the plain refuse, after verifying the operator may manage the
/// booking's hotel.
#[endpoint(tags("bookings"), summary = "Refuse Booking With Access Control")]
pub(crate) async fn secure_handler(
    uuid: PathParam<Uuid>,
    operator: QueryParam<Uuid, true>,
    json: JsonBody<RefuseRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .refuse_booking_with_access_control(
            BookingUuid::from_uuid(uuid.into_inner()),
            OperatorUuid::from_uuid(operator.into_inner()),
            json.into_inner().reason,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}
